//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Canvas LMS / GitHub tooling
#[derive(Parser, Debug)]
#[command(name = "canvas-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (JSON); falls back to CANVAS_BASE_URL / CANVAS_TOKEN
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List assignment submissions as JSON lines
    Submissions {
        /// Assignment URL: https://canvas.example.edu/courses/:course_id/assignments/:id
        #[arg(short, long)]
        url: String,

        /// Include user objects
        #[arg(long)]
        user: bool,

        /// Include submission comments
        #[arg(long)]
        comments: bool,
    },

    /// List active students in a course
    Students {
        /// Course id
        #[arg(long)]
        course: u64,
    },

    /// Download submission zip attachments via aria2c
    DownloadZip {
        /// Assignment URL: https://canvas.example.edu/courses/:course_id/assignments/:id
        #[arg(short, long)]
        url: String,

        /// Directory to save zip files
        #[arg(short = 'd', long, default_value = "repo-zip")]
        output: PathBuf,

        /// JSON file to save meta info
        #[arg(short = 'j', long, default_value = "metainfo.json")]
        json: PathBuf,

        /// Execute aria2c in quiet mode
        #[arg(short, long)]
        quiet: bool,

        /// Execute aria2c in dry-run mode
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Generate a QTI question bank from a YAML definition
    QuestionBank {
        /// Bank definition (YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Output archive (.zip) or document (.xml)
        #[arg(short, long)]
        output: PathBuf,
    },
}
