//! Settings files driving engine construction.

use protosearch::{
    HashingEmbedder, Settings, SharedVectorIndex, SimilarityEngine, SimilarityMetric,
    VectorDimension,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_settings_configure_engine() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(
        &config_path,
        "[search]\nmetric = \"l2\"\ntop_k = 1\n\n[embedding]\ndimension = 16\n",
    )
    .unwrap();

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.search.metric, SimilarityMetric::Euclidean);

    let dimension = VectorDimension::new(settings.embedding.dimension).unwrap();
    let generator = HashingEmbedder::new(dimension);
    let engine = SimilarityEngine::new(SharedVectorIndex::new(), settings.search.metric);
    engine
        .index_texts(&["a", "b"], &["red apple", "blue ocean"], &generator)
        .unwrap();

    let hits = engine
        .search_texts(&["red apple"], &generator, settings.search.top_k)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a");
    assert!(hits[0].score.get() < 1e-5);
}
