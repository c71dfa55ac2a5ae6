//! Output formatting for rule data.
//!
//! This module handles writing results as line-oriented text:
//! - [`text`] - range lines and subnet lines

mod text;

pub use text::{write_ranges, write_subnets, OutputMode};
