//! CLI runner - executes commands

use crate::canvas::{Canvas, SubmissionIncludes};
use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{ClientConfig, HttpClient};
use crate::qti::load_bank;
use futures::stream::TryStreamExt;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Content types Canvas reports for zip uploads
const ZIP_CONTENT_TYPES: &[&str] = &["application/x-zip-compressed", "application/zip"];

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Submissions {
                url,
                user,
                comments,
            } => self.submissions(url, *user, *comments).await,
            Commands::Students { course } => self.students(*course).await,
            Commands::DownloadZip {
                url,
                output,
                json,
                quiet,
                dry_run,
            } => self.download_zip(url, output, json, *quiet, *dry_run).await,
            Commands::QuestionBank { input, output } => Self::question_bank(input, output),
        }
    }

    /// Build the Canvas facade from config file or environment
    fn canvas(&self) -> Result<Canvas> {
        let settings = Settings::load(self.cli.config.as_deref())?;
        let canvas = settings.canvas()?;
        let http = HttpClient::new(
            ClientConfig::builder()
                .base_url(&canvas.base_url)
                .token(&canvas.token)
                .build(),
        )?;
        Ok(Canvas::new(Arc::new(http)))
    }

    async fn submissions(&self, url: &str, user: bool, comments: bool) -> Result<()> {
        let (course_id, assignment_id) = parse_assignment_url(url)?;
        let canvas = self
            .canvas()?
            .with_course(course_id)
            .with_assignment(assignment_id);

        let include = SubmissionIncludes {
            user,
            submission_comments: comments,
            ..SubmissionIncludes::default()
        };

        let mut stream = std::pin::pin!(canvas.submissions()?.index(&include).stream());
        while let Some(submission) = stream.try_next().await? {
            println!("{}", serde_json::to_string(&submission)?);
        }
        Ok(())
    }

    async fn students(&self, course_id: u64) -> Result<()> {
        let canvas = self.canvas()?.with_course(course_id);
        for student in canvas.list_active_students().await? {
            println!("{}", serde_json::to_string(&student)?);
        }
        Ok(())
    }

    /// Collect submission attachment URLs into an aria2c input file, write
    /// the metainfo JSON, then hand the actual downloads to aria2c.
    async fn download_zip(
        &self,
        url: &str,
        output: &Path,
        meta_path: &Path,
        quiet: bool,
        dry_run: bool,
    ) -> Result<()> {
        let (course_id, assignment_id) = parse_assignment_url(url)?;
        let canvas = self
            .canvas()?
            .with_course(course_id)
            .with_assignment(assignment_id);

        if !output.is_dir() {
            std::fs::create_dir_all(output)?;
        }
        let aria_file = output.join(".index.aria2");
        let mut aria_entries = String::new();
        let mut meta = Vec::new();

        let include = SubmissionIncludes {
            user: true,
            ..SubmissionIncludes::default()
        };
        let submissions = canvas.submissions()?;
        let files = canvas.files();

        let mut stream = std::pin::pin!(submissions.index(&include).stream());
        while let Some(submission) = stream.try_next().await? {
            let Some(history) = latest_attempt(&submission) else {
                warn!("submission without history: {}", submission["id"]);
                continue;
            };
            if history["submission_type"].is_null() {
                continue;
            }

            let attachments = history["attachments"].as_array().cloned().unwrap_or_default();
            let [attachment] = attachments.as_slice() else {
                return Err(Error::other(format!(
                    "expected exactly one attachment, got {} (submission {})",
                    attachments.len(),
                    submission["id"]
                )));
            };

            let attachment_id = attachment["id"].as_u64().ok_or_else(|| {
                Error::response_shape("attachment id missing from submission history")
            })?;
            let file = files.show(attachment_id).await?;
            let content_type = file["content-type"].as_str().unwrap_or_default();
            if !ZIP_CONTENT_TYPES.contains(&content_type) {
                return Err(Error::other(format!(
                    "attachment {attachment_id} is not a zip (content-type: {content_type})"
                )));
            }
            let file_url = file["url"].as_str().ok_or_else(|| {
                Error::response_shape("file response missing download url")
            })?;

            let matric_no = submission["user"]["integration_id"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            meta.push(json!({
                "name": submission["user"]["sortable_name"],
                "matric_no": matric_no,
                "nusnet_id": submission["user"]["login_id"],
                "user_id": submission["user_id"],
                "submission_id": history["id"],
                "attachment_id": attachment_id,
            }));

            aria_entries.push_str(&format!(
                "{file_url}\n  out={matric_no}.zip\n  dir={}\n\n",
                output
                    .canonicalize()
                    .unwrap_or_else(|_| output.to_path_buf())
                    .display()
            ));
        }

        std::fs::write(&aria_file, aria_entries)?;
        std::fs::write(meta_path, serde_json::to_string_pretty(&meta)?)?;
        info!("Wrote {} entries to {}", meta.len(), aria_file.display());

        let mut cmd = tokio::process::Command::new("aria2c");
        cmd.arg("--input-file").arg(&aria_file);
        if quiet {
            cmd.arg("--quiet");
        }
        if dry_run {
            cmd.arg("--dry-run");
        }
        let status = cmd.status().await?;
        if !status.success() {
            return Err(Error::other(format!("aria2c exited with {status}")));
        }
        Ok(())
    }

    fn question_bank(input: &Path, output: &Path) -> Result<()> {
        let bank = load_bank(input)?;
        if output.extension().is_some_and(|ext| ext == "xml") {
            std::fs::write(output, bank.to_xml()?)?;
        } else {
            bank.write_zip(output)?;
        }
        info!(
            "Wrote bank '{}' ({} questions) to {}",
            bank.title,
            bank.questions.len(),
            output.display()
        );
        Ok(())
    }
}

/// Pick the submission history entry with the highest attempt number
fn latest_attempt(submission: &Value) -> Option<&Value> {
    submission["submission_history"]
        .as_array()?
        .iter()
        .max_by_key(|h| h["attempt"].as_u64().unwrap_or(0))
}

/// Extract course and assignment ids from an assignment URL
///
/// Expected shape: `https://host/courses/:course_id/assignments/:id`.
pub fn parse_assignment_url(raw: &str) -> Result<(u64, u64)> {
    let url = url::Url::parse(raw)?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(Iterator::collect)
        .unwrap_or_default();

    match segments.as_slice() {
        ["courses", course_id, "assignments", assignment_id, ..] => {
            let course_id = course_id
                .parse()
                .map_err(|_| Error::config(format!("invalid course id in URL: {course_id}")))?;
            let assignment_id = assignment_id.parse().map_err(|_| {
                Error::config(format!("invalid assignment id in URL: {assignment_id}"))
            })?;
            Ok((course_id, assignment_id))
        }
        _ => Err(Error::config(format!(
            "URL does not look like /courses/:course_id/assignments/:id: {raw}"
        ))),
    }
}
