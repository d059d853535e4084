//! Output formatting for search results.
//!
//! Results go to stdout either as a human-readable table or as JSON for
//! scripts and transport adapters.

use comfy_table::{Attribute, Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde::Serialize;

use crate::io::exit_code::ExitCode;
use crate::vector::{SearchHit, SimilarityMetric, VectorError};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for tool integration
    Json,
}

impl OutputFormat {
    /// Create format from JSON flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    /// Check if format is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Standard JSON response format.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T: Serialize> {
    /// Status: "success" or "error"
    pub status: &'static str,

    /// Metric the scores were produced with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<SimilarityMetric>,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable error message (only for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Exit code for shell scripts
    pub exit_code: u8,
}

impl<T: Serialize> JsonResponse<T> {
    /// Create a success response with data.
    pub fn success(metric: SimilarityMetric, data: T) -> Self {
        Self {
            status: "success",
            metric: Some(metric),
            data: Some(data),
            message: None,
            exit_code: ExitCode::Success as u8,
        }
    }
}

impl JsonResponse<()> {
    /// Create an error response from a `VectorError`.
    pub fn from_error(error: &VectorError) -> Self {
        Self {
            status: "error",
            metric: None,
            data: None,
            message: Some(error.to_string()),
            exit_code: ExitCode::from_error(error) as u8,
        }
    }
}

/// Render ranked hits as a table: rank, identifier, score.
///
/// The score column is labelled by what the metric produces so a reader
/// knows which direction is better.
#[must_use]
pub fn render_table(hits: &[SearchHit], metric: SimilarityMetric) -> String {
    let score_label = match metric {
        SimilarityMetric::Cosine => "Similarity",
        SimilarityMetric::Euclidean => "Distance",
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new(score_label).add_attribute(Attribute::Bold),
    ]);

    for (rank, hit) in hits.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            hit.id.clone(),
            hit.score.to_string(),
        ]);
    }

    table.to_string()
}

/// Render hits in the requested format.
pub fn render_hits(
    hits: &[SearchHit],
    metric: SimilarityMetric,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(&JsonResponse::success(metric, hits)),
        OutputFormat::Text if hits.is_empty() => Ok("No results: the index is empty".to_string()),
        OutputFormat::Text => Ok(render_table(hits, metric)),
    }
}
