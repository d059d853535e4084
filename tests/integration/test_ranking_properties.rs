//! Ranking properties of the public engine API: metric direction, tie
//! order, completeness and batch atomicity.

use protosearch::{
    SearchHit, SharedVectorIndex, SimilarityEngine, SimilarityMetric, VectorError, VectorIndex,
};

fn ids(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.id.as_str()).collect()
}

fn engine(metric: SimilarityMetric, entries: &[(&str, [f32; 2])]) -> SimilarityEngine {
    let index = SharedVectorIndex::new();
    index
        .append_batch(
            entries.iter().map(|(id, _)| *id),
            entries.iter().map(|(_, v)| v.to_vec()),
        )
        .unwrap();
    SimilarityEngine::new(index, metric)
}

#[test]
fn test_cosine_scores_sorted_descending() {
    let engine = engine(
        SimilarityMetric::Cosine,
        &[
            ("w", [0.2, 0.9]),
            ("x", [1.0, 0.1]),
            ("y", [-0.5, 0.5]),
            ("z", [0.7, 0.7]),
        ],
    );
    let hits = engine.search(&[vec![1.0, 0.2]], None).unwrap();

    assert_eq!(hits.len(), 4);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(hits[0].id, "x");
}

#[test]
fn test_euclidean_scores_sorted_ascending() {
    let engine = engine(
        SimilarityMetric::Euclidean,
        &[
            ("w", [0.2, 0.9]),
            ("x", [1.0, 0.1]),
            ("y", [-0.5, 0.5]),
            ("z", [5.0, 5.0]),
        ],
    );
    let hits = engine.search(&[vec![1.0, 0.2]], None).unwrap();

    for pair in hits.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
    assert!(hits.iter().all(|h| h.score.get() >= 0.0));
    assert_eq!(ids(&hits).last(), Some(&"z"));
}

#[test]
fn test_multi_query_prototype_ranks_between_concepts() {
    let engine = engine(
        SimilarityMetric::Cosine,
        &[("east", [1.0, 0.0]), ("north", [0.0, 1.0]), ("northeast", [1.0, 1.0])],
    );

    let hits = engine
        .search(&[vec![1.0, 0.0], vec![0.0, 1.0]], None)
        .unwrap();
    assert_eq!(hits[0].id, "northeast");
    assert!((hits[0].score.get() - 1.0).abs() < 1e-6);
    // east and north tie and keep insertion order
    assert_eq!(ids(&hits[1..]), vec!["east", "north"]);
}

#[test]
fn test_ranking_completeness_with_duplicates() {
    let engine = engine(
        SimilarityMetric::Euclidean,
        &[
            ("img.png", [0.0, 0.0]),
            ("img.png", [0.0, 0.0]),
            ("img.png", [3.0, 4.0]),
        ],
    );
    let hits = engine.query(&[0.0, 0.0]).unwrap();

    assert_eq!(hits.len(), engine.index().size());
    assert_eq!(
        hits.iter().map(|h| h.position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(hits[2].score.get(), 5.0);
}

#[test]
fn test_atomic_batch_third_of_five_invalid() {
    let mut index = VectorIndex::new();
    index.append("existing", vec![0.0, 1.0]).unwrap();
    let before = index.size();

    let result = index.append_batch(
        ["one", "two", "three", "four", "five"],
        vec![
            vec![1.0, 0.0],
            vec![0.5, 0.5],
            vec![f32::NAN, 0.0],
            vec![0.1, 0.9],
            vec![0.3, 0.3],
        ],
    );

    assert!(matches!(
        result,
        Err(VectorError::PartialBatchFailure { position: 2, .. })
    ));
    assert_eq!(index.size(), before);
    assert!(index.entries().all(|entry| entry.id() == "existing"));
}

#[test]
fn test_growth_between_queries() {
    let engine = engine(SimilarityMetric::Cosine, &[("a", [1.0, 0.0])]);
    assert_eq!(engine.query(&[0.0, 1.0]).unwrap().len(), 1);

    engine.index().append("b", vec![0.0, 1.0]).unwrap();
    let hits = engine.query(&[0.0, 1.0]).unwrap();
    assert_eq!(ids(&hits), vec!["b", "a"]);
}

#[test]
fn test_degenerate_prototype_never_scores() {
    let engine = engine(SimilarityMetric::Cosine, &[("a", [1.0, 0.0])]);

    // Opposite queries cancel to the zero vector
    let result = engine.search(&[vec![1.0, 0.0], vec![-1.0, 0.0]], None);
    assert!(matches!(result, Err(VectorError::DegenerateVector)));
}

#[test]
fn test_extreme_components_rank_correctly() {
    let index = SharedVectorIndex::new();
    index
        .append_batch(
            ["big", "tiny", "side", "far"],
            vec![
                vec![1e20, 0.0],
                vec![1e-30, 0.0],
                vec![0.0, 1.0],
                vec![3e38, 0.0],
            ],
        )
        .unwrap();

    let cosine = SimilarityEngine::new(index.clone(), SimilarityMetric::Cosine);
    let hits = cosine.query(&[1.0, 0.0]).unwrap();
    assert_eq!(ids(&hits), vec!["big", "tiny", "far", "side"]);
    assert!(hits[..3].iter().all(|h| (h.score.get() - 1.0).abs() < 1e-6));

    let euclidean = SimilarityEngine::new(index, SimilarityMetric::Euclidean);
    let hits = euclidean.query(&[-3e38, 0.0]).unwrap();
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[3].id, "far");
    assert_eq!(hits[3].score.get(), f32::MAX);
    assert!(hits.iter().all(|h| h.score.get().is_finite()));
}
