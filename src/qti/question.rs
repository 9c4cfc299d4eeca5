//! Question model
//!
//! One struct for the shared fields, one enum for the per-type payload.
//! Collections are ordered so the emitted XML is deterministic.

use std::collections::BTreeSet;

/// A single assessment question
#[derive(Debug, Clone)]
pub struct Question {
    /// Display title
    pub title: String,
    /// Question statement as HTML
    pub html: String,
    /// Points possible
    pub points: f64,
    /// Type-specific payload
    pub kind: QuestionKind,
}

/// Question type payload
#[derive(Debug, Clone)]
pub enum QuestionKind {
    /// Free-text essay, manually graded
    Essay,
    /// File upload, manually graded
    FileUpload,
    /// Short answer graded against a set of accepted strings
    ShortAnswer {
        /// Accepted answers
        answers: BTreeSet<String>,
    },
    /// Fill-in-multiple-blanks; each blank has its own accepted answers
    ///
    /// Blank order is preserved in the emitted XML.
    FillInMultipleBlanks {
        /// `(blank name, accepted answers)` pairs
        blanks: Vec<(String, BTreeSet<String>)>,
    },
}

impl Question {
    /// Create an essay question
    pub fn essay(title: impl Into<String>, html: impl Into<String>, points: f64) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            points,
            kind: QuestionKind::Essay,
        }
    }

    /// Create a file upload question
    pub fn file_upload(title: impl Into<String>, html: impl Into<String>, points: f64) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            points,
            kind: QuestionKind::FileUpload,
        }
    }

    /// Create a short answer question
    pub fn short_answer(
        title: impl Into<String>,
        html: impl Into<String>,
        points: f64,
        answers: BTreeSet<String>,
    ) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            points,
            kind: QuestionKind::ShortAnswer { answers },
        }
    }

    /// Create a fill-in-multiple-blanks question
    pub fn fill_in_multiple_blanks(
        title: impl Into<String>,
        html: impl Into<String>,
        points: f64,
        blanks: Vec<(String, BTreeSet<String>)>,
    ) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            points,
            kind: QuestionKind::FillInMultipleBlanks { blanks },
        }
    }

    /// The Canvas question type string
    pub fn question_type(&self) -> &'static str {
        match self.kind {
            QuestionKind::Essay => "essay_question",
            QuestionKind::FileUpload => "file_upload_question",
            QuestionKind::ShortAnswer { .. } => "short_answer_question",
            QuestionKind::FillInMultipleBlanks { .. } => "fill_in_multiple_blanks_question",
        }
    }
}

/// Expand answers with their upper- and lower-case variants
///
/// Canvas short-answer matching is case sensitive; graders usually want
/// `0xAB` and `0xab` both accepted.
pub fn case_variants<I, S>(answers: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = BTreeSet::new();
    for answer in answers {
        let answer = answer.into();
        out.insert(answer.to_uppercase());
        out.insert(answer.to_lowercase());
        out.insert(answer);
    }
    out
}
