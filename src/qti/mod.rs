//! QTI question bank generation
//!
//! Emits IMS QTI 1.2 assessment XML consumable by Canvas's quiz import.
//! Entirely independent of the HTTP layer: callers build [`Question`]s,
//! collect them into a [`QuestionBank`], and write XML or a zip archive.

mod bank;
mod loader;
mod question;

pub use bank::{QuestionBank, QTI_NAMESPACE};
pub use loader::{load_bank, load_bank_from_str, BankDefinition, QuestionDef};
pub use question::{case_variants, Question, QuestionKind};
