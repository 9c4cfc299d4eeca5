//! CLI module
//!
//! # Commands
//!
//! - `submissions` - List assignment submissions as JSON lines
//! - `students` - List active students in a course
//! - `download-zip` - Fetch submission zips via aria2c
//! - `question-bank` - Generate a QTI question bank from a YAML definition

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
