//! Parsing of interactive query lines.
//!
//! A line may carry several queries, each wrapped in double quotes:
//!
//! ```text
//! "orange cat" "sleeping on a sofa"
//! ```
//!
//! Each quoted segment is embedded separately and fused into one prototype.
//! A line without quotes is a single query.

/// What the user typed on one interactive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryLine {
    /// Leave the interactive loop.
    Quit,
    /// Blank line, nothing to do.
    Empty,
    /// One or more queries to fuse.
    Queries(Vec<String>),
}

/// Command that ends the interactive loop.
pub const QUIT_COMMAND: &str = "quit";

/// Parse one line of interactive input.
#[must_use]
pub fn parse_query_line(line: &str) -> QueryLine {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return QueryLine::Empty;
    }
    if trimmed == QUIT_COMMAND {
        return QueryLine::Quit;
    }

    if !trimmed.contains('"') {
        return QueryLine::Queries(vec![trimmed.to_string()]);
    }

    // Odd segments sit between quotes
    let queries: Vec<String> = trimmed
        .split('"')
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, segment)| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();

    if queries.is_empty() {
        QueryLine::Empty
    } else {
        QueryLine::Queries(queries)
    }
}
