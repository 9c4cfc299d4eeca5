//! QTI 1.2 XML emission
//!
//! Builds the `questestinterop` document element by element. The schema is
//! fixed (ims_qtiasiv1p2p1), so this is plain tree construction with a
//! conditional branch per question type.

use super::question::{Question, QuestionKind};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

/// Namespace of the QTI 1.2 schema
pub const QTI_NAMESPACE: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2p1";

/// An ordered collection of questions ready for export
#[derive(Debug, Clone)]
pub struct QuestionBank {
    /// Bank title shown in Canvas after import
    pub title: String,
    /// Questions in presentation order
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Create an empty bank
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            questions: Vec::new(),
        }
    }

    /// Append a question
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Render the bank as a QTI XML document
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("questestinterop");
        root.push_attribute(("xmlns", QTI_NAMESPACE));
        writer.write_event(Event::Start(root))?;

        let mut bank = BytesStart::new("objectbank");
        let ident = Uuid::new_v4().simple().to_string();
        bank.push_attribute(("ident", ident.as_str()));
        writer.write_event(Event::Start(bank))?;

        writer.write_event(Event::Start(BytesStart::new("qtimetadata")))?;
        write_metadata_field(&mut writer, "bank_title", &self.title)?;
        writer.write_event(Event::End(BytesEnd::new("qtimetadata")))?;

        for question in &self.questions {
            write_item(&mut writer, question)?;
        }

        writer.write_event(Event::End(BytesEnd::new("objectbank")))?;
        writer.write_event(Event::End(BytesEnd::new("questestinterop")))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::other(format!("QTI output is not valid UTF-8: {e}")))
    }

    /// Write the bank as a single-entry zip archive for Canvas import
    pub fn write_zip(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml()?;

        let entry = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("question_bank");

        let file = std::fs::File::create(path)?;
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(
            format!("{entry}.xml"),
            zip::write::SimpleFileOptions::default(),
        )?;
        zip.write_all(xml.as_bytes())?;
        zip.finish()?;
        Ok(())
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut el = BytesStart::new(name);
    for (key, value) in attrs {
        el.push_attribute((*key, *value));
    }
    el
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(element(name, attrs)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_metadata_field<W: Write>(
    writer: &mut Writer<W>,
    label: &str,
    entry: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("qtimetadatafield")))?;
    write_text_element(writer, "fieldlabel", &[], label)?;
    write_text_element(writer, "fieldentry", &[], entry)?;
    writer.write_event(Event::End(BytesEnd::new("qtimetadatafield")))?;
    Ok(())
}

/// One `item` element per question
fn write_item<W: Write>(writer: &mut Writer<W>, question: &Question) -> Result<()> {
    let ident = Uuid::new_v4().simple().to_string();
    writer.write_event(Event::Start(element(
        "item",
        &[("ident", ident.as_str()), ("title", &question.title)],
    )))?;

    // itemmetadata: question type and points
    writer.write_event(Event::Start(BytesStart::new("itemmetadata")))?;
    writer.write_event(Event::Start(BytesStart::new("qtimetadata")))?;
    write_metadata_field(writer, "question_type", question.question_type())?;
    write_metadata_field(writer, "points_possible", &question.points.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("qtimetadata")))?;
    writer.write_event(Event::End(BytesEnd::new("itemmetadata")))?;

    // presentation: statement plus the response declaration
    writer.write_event(Event::Start(BytesStart::new("presentation")))?;
    writer.write_event(Event::Start(BytesStart::new("material")))?;
    write_text_element(
        writer,
        "mattext",
        &[("texttype", "text/html")],
        &question.html,
    )?;
    writer.write_event(Event::End(BytesEnd::new("material")))?;

    match &question.kind {
        QuestionKind::Essay | QuestionKind::ShortAnswer { .. } => {
            write_fib_response(writer)?;
        }
        QuestionKind::FileUpload => {}
        QuestionKind::FillInMultipleBlanks { blanks } => {
            for (index, (blank, answers)) in blanks.iter().enumerate() {
                write_blank_response(writer, index, blank, answers)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new("presentation")))?;

    if let QuestionKind::ShortAnswer { answers } = &question.kind {
        write_short_answer_scoring(writer, answers)?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Single free-text response slot (essay and short answer)
fn write_fib_response<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Start(element(
        "response_str",
        &[("ident", "response1"), ("rcardinality", "Single")],
    )))?;
    writer.write_event(Event::Start(BytesStart::new("render_fib")))?;
    writer.write_event(Event::Empty(element(
        "response_label",
        &[("ident", "answer1"), ("rshuffle", "No")],
    )))?;
    writer.write_event(Event::End(BytesEnd::new("render_fib")))?;
    writer.write_event(Event::End(BytesEnd::new("response_str")))?;
    Ok(())
}

/// One labelled choice response per blank
fn write_blank_response<W: Write>(
    writer: &mut Writer<W>,
    blank_index: usize,
    blank: &str,
    answers: &std::collections::BTreeSet<String>,
) -> Result<()> {
    let response_ident = format!("response_{blank}");
    writer.write_event(Event::Start(element(
        "response_lid",
        &[("ident", response_ident.as_str())],
    )))?;

    writer.write_event(Event::Start(BytesStart::new("material")))?;
    write_text_element(writer, "mattext", &[], blank)?;
    writer.write_event(Event::End(BytesEnd::new("material")))?;

    writer.write_event(Event::Start(BytesStart::new("render_choice")))?;
    for (answer_index, answer) in answers.iter().enumerate() {
        let label_ident = format!("{:#x}", (blank_index << 8) + answer_index);
        writer.write_event(Event::Start(element(
            "response_label",
            &[("ident", label_ident.as_str())],
        )))?;
        writer.write_event(Event::Start(BytesStart::new("material")))?;
        write_text_element(writer, "mattext", &[("texttype", "text/plain")], answer)?;
        writer.write_event(Event::End(BytesEnd::new("material")))?;
        writer.write_event(Event::End(BytesEnd::new("response_label")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("render_choice")))?;
    writer.write_event(Event::End(BytesEnd::new("response_lid")))?;
    Ok(())
}

/// Auto-grading rule: full score when the response equals any accepted answer
fn write_short_answer_scoring<W: Write>(
    writer: &mut Writer<W>,
    answers: &std::collections::BTreeSet<String>,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("resprocessing")))?;

    writer.write_event(Event::Start(BytesStart::new("outcomes")))?;
    writer.write_event(Event::Empty(element(
        "decvar",
        &[
            ("vartype", "Decimal"),
            ("varname", "SCORE"),
            ("minvalue", "0"),
            ("maxvalue", "1"),
        ],
    )))?;
    writer.write_event(Event::End(BytesEnd::new("outcomes")))?;

    writer.write_event(Event::Start(element(
        "respcondition",
        &[("continue", "No")],
    )))?;
    writer.write_event(Event::Start(BytesStart::new("conditionvar")))?;
    for answer in answers {
        write_text_element(writer, "varequal", &[("respident", "response1")], answer)?;
    }
    writer.write_event(Event::End(BytesEnd::new("conditionvar")))?;
    write_text_element(
        writer,
        "setvar",
        &[("action", "Set"), ("varname", "SCORE")],
        "1",
    )?;
    writer.write_event(Event::End(BytesEnd::new("respcondition")))?;

    writer.write_event(Event::End(BytesEnd::new("resprocessing")))?;
    Ok(())
}
