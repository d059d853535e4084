//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Result formatting (text table, JSON)
//! - Exit codes derived from engine errors
//! - Interactive query line parsing

pub mod exit_code;
pub mod format;
pub mod input;

pub use exit_code::ExitCode;
pub use format::{JsonResponse, OutputFormat, render_hits};
pub use input::{QueryLine, parse_query_line};
