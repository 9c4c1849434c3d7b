//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the dreadboard binary.

mod commands;
mod segment;
mod status;

pub use commands::{Cli, Commands, SegmentArgs};
pub use segment::run_segment;
pub use status::{list_styles, reset_state, show_status};
