//! YAML bank definitions
//!
//! Lets question banks be described in a file instead of code:
//!
//! ```yaml
//! title: Midterm Bank
//! questions:
//!   - type: essay
//!     title: Question 1
//!     html: "<p>Explain paging.</p>"
//!     points: 2.0
//!   - type: short_answer
//!     title: Question 2
//!     html: "<p>Crash address?</p>"
//!     points: 3.0
//!     case_insensitive: true
//!     answers: ["0xffffffff81201150"]
//!   - type: fill_in_multiple_blanks
//!     title: Question 3
//!     html: "<p>This is [cr2] and [err].</p>"
//!     points: 4.0
//!     blanks:
//!       cr2: ["0x0000555555558008"]
//!       err: ["0x0000000000000007"]
//! ```

use super::question::{case_variants, Question};
use super::QuestionBank;
use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A whole bank as described in YAML
#[derive(Debug, Clone, Deserialize)]
pub struct BankDefinition {
    /// Bank title
    pub title: String,
    /// Question list, in order
    pub questions: Vec<QuestionDef>,
}

/// One question definition, tagged by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionDef {
    Essay {
        title: String,
        html: String,
        points: f64,
    },
    FileUpload {
        title: String,
        html: String,
        points: f64,
    },
    ShortAnswer {
        title: String,
        html: String,
        points: f64,
        answers: Vec<String>,
        /// Also accept upper/lower-case variants of each answer
        #[serde(default)]
        case_insensitive: bool,
    },
    FillInMultipleBlanks {
        title: String,
        html: String,
        points: f64,
        blanks: BTreeMap<String, Vec<String>>,
        #[serde(default)]
        case_insensitive: bool,
    },
}

impl From<QuestionDef> for Question {
    fn from(def: QuestionDef) -> Self {
        match def {
            QuestionDef::Essay {
                title,
                html,
                points,
            } => Question::essay(title, html, points),
            QuestionDef::FileUpload {
                title,
                html,
                points,
            } => Question::file_upload(title, html, points),
            QuestionDef::ShortAnswer {
                title,
                html,
                points,
                answers,
                case_insensitive,
            } => {
                let answers = if case_insensitive {
                    case_variants(answers)
                } else {
                    answers.into_iter().collect()
                };
                Question::short_answer(title, html, points, answers)
            }
            QuestionDef::FillInMultipleBlanks {
                title,
                html,
                points,
                blanks,
                case_insensitive,
            } => {
                let blanks = blanks
                    .into_iter()
                    .map(|(blank, answers)| {
                        let answers = if case_insensitive {
                            case_variants(answers)
                        } else {
                            answers.into_iter().collect()
                        };
                        (blank, answers)
                    })
                    .collect();
                Question::fill_in_multiple_blanks(title, html, points, blanks)
            }
        }
    }
}

impl From<BankDefinition> for QuestionBank {
    fn from(def: BankDefinition) -> Self {
        Self {
            title: def.title,
            questions: def.questions.into_iter().map(Question::from).collect(),
        }
    }
}

/// Load a bank definition from a YAML file
pub fn load_bank(path: impl AsRef<Path>) -> Result<QuestionBank> {
    let raw = std::fs::read_to_string(path)?;
    load_bank_from_str(&raw)
}

/// Load a bank definition from a YAML string
pub fn load_bank_from_str(raw: &str) -> Result<QuestionBank> {
    let def: BankDefinition = serde_yaml::from_str(raw)?;
    Ok(def.into())
}
