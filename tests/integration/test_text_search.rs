//! End-to-end text search with the built-in hashing embedder.

use protosearch::io::{OutputFormat, render_hits};
use protosearch::{
    EmbeddingGenerator, HashingEmbedder, SharedVectorIndex, SimilarityEngine, SimilarityMetric,
    VectorDimension, VectorError,
};

const DOCS: [(&str, &str); 4] = [
    ("notes/cat.txt", "The orange cat sleeps on the warm sofa all afternoon"),
    ("notes/dog.txt", "Our dog chases the ball across the park every morning"),
    ("notes/taxes.txt", "File the quarterly tax forms before the deadline"),
    ("notes/kitten.txt", "A tiny kitten and an old cat share the sofa"),
];

fn indexed_engine(metric: SimilarityMetric) -> (SimilarityEngine, HashingEmbedder) {
    let generator = HashingEmbedder::new(VectorDimension::new(256).unwrap());
    let engine = SimilarityEngine::new(SharedVectorIndex::new(), metric)
        .with_expected_dimension(generator.dimension());

    let ids: Vec<&str> = DOCS.iter().map(|(id, _)| *id).collect();
    let texts: Vec<&str> = DOCS.iter().map(|(_, text)| *text).collect();
    engine.index_texts(&ids, &texts, &generator).unwrap();

    (engine, generator)
}

#[test]
fn test_cat_queries_rank_cat_documents_first() {
    let (engine, generator) = indexed_engine(SimilarityMetric::Cosine);

    let hits = engine
        .search_texts(&["cat", "sofa"], &generator, Some(2))
        .unwrap();

    let mut top: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    top.sort_unstable();
    assert_eq!(top, vec!["notes/cat.txt", "notes/kitten.txt"]);
}

#[test]
fn test_tokenless_query_depends_on_metric() {
    let (engine, generator) = indexed_engine(SimilarityMetric::Cosine);

    // No tokens at all embeds to the zero vector
    let result = engine.search_texts(&["!!! ???"], &generator, None);
    assert!(matches!(result, Err(VectorError::DegenerateVector)));

    // Every unit vector is at distance 1 from zero
    let (euclidean, generator) = indexed_engine(SimilarityMetric::Euclidean);
    let hits = euclidean.search_texts(&["!!! ???"], &generator, None).unwrap();
    assert_eq!(hits.len(), DOCS.len());
    assert!(hits.iter().all(|h| (h.score.get() - 1.0).abs() < 1e-5));
}

#[test]
fn test_mismatched_provider_is_rejected() {
    let (engine, _) = indexed_engine(SimilarityMetric::Cosine);
    let other = HashingEmbedder::new(VectorDimension::new(32).unwrap());

    let result = engine.index_texts(&["extra.txt"], &["more text"], &other);
    assert!(matches!(
        result,
        Err(VectorError::PartialBatchFailure { position: 0, .. })
    ));
    assert_eq!(engine.index().size(), DOCS.len());

    assert!(matches!(
        engine.search_texts(&["cat"], &other, None),
        Err(VectorError::DimensionMismatch {
            expected: 256,
            actual: 32
        })
    ));
}

#[test]
fn test_json_rendering_of_results() {
    let (engine, generator) = indexed_engine(SimilarityMetric::Cosine);
    let hits = engine.search_texts(&["dog park"], &generator, Some(1)).unwrap();

    let json = render_hits(&hits, engine.metric(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["data"][0]["id"], "notes/dog.txt");
    assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
}
