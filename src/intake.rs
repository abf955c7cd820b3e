//! Document intake: uploaded blobs in, extracted text out.
//!
//! Intake runs before the pipeline. It converts the two opaque document
//! blobs into the `resume_text` and `jd_text` fields the extract stage
//! reads, and it fails loudly ([`ExtractionError`]) rather than ever handing
//! the pipeline silently empty text. Any temporary storage it spools a blob
//! through is released on every path, success or failure.

use std::io::Write;

use miette::Diagnostic;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::state::EvaluationState;

/// An uploaded document: a display name and its raw bytes.
#[derive(Clone, Debug)]
pub struct DocumentBlob {
    name: String,
    bytes: Vec<u8>,
}

impl DocumentBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Extracted plain text for both documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntakeOutput {
    pub resume_text: String,
    pub jd_text: String,
}

/// A document could not be turned into usable text.
///
/// Surfaced to the caller before any pipeline stage executes; there is no
/// automatic retry and no partial state escapes.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractionError {
    /// The blob's bytes are not decodable as text.
    #[error("document {name:?} could not be decoded as text")]
    #[diagnostic(
        code(hireflow::intake::unreadable),
        help("Upload the document again; the file appears corrupted or binary.")
    )]
    Unreadable { name: String },

    /// The blob decoded but contained nothing usable.
    #[error("document {name:?} contained no extractable text")]
    #[diagnostic(code(hireflow::intake::empty))]
    Empty { name: String },

    /// Temporary spool storage failed.
    #[error("temporary document storage failed")]
    #[diagnostic(code(hireflow::intake::io))]
    Io(#[from] std::io::Error),
}

/// Converts the two uploaded blobs into extracted text.
pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        resume: &DocumentBlob,
        jd: &DocumentBlob,
    ) -> Result<IntakeOutput, ExtractionError>;
}

/// Loader for plain-text documents.
///
/// Each blob is spooled through a named temporary file, mirroring how
/// format-specific extractors work with on-disk parsers; the file is
/// removed when the handle drops, so cleanup happens on error paths too.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextLoader;

impl PlainTextLoader {
    fn extract_one(&self, blob: &DocumentBlob) -> Result<String, ExtractionError> {
        let mut spool = NamedTempFile::new()?;
        spool.write_all(blob.bytes())?;
        spool.flush()?;

        let bytes = std::fs::read(spool.path())?;
        let text = String::from_utf8(bytes).map_err(|_| ExtractionError::Unreadable {
            name: blob.name().to_string(),
        })?;
        if text.trim().is_empty() {
            return Err(ExtractionError::Empty {
                name: blob.name().to_string(),
            });
        }
        Ok(text)
    }
}

impl DocumentLoader for PlainTextLoader {
    fn load(
        &self,
        resume: &DocumentBlob,
        jd: &DocumentBlob,
    ) -> Result<IntakeOutput, ExtractionError> {
        let resume_text = self.extract_one(resume)?;
        let jd_text = self.extract_one(jd)?;
        tracing::debug!(
            resume = resume.name(),
            jd = jd.name(),
            "documents extracted"
        );
        Ok(IntakeOutput {
            resume_text,
            jd_text,
        })
    }
}

/// Runs intake and seeds an [`EvaluationState`] with the extracted texts.
pub fn load_into_state(
    loader: &dyn DocumentLoader,
    resume: &DocumentBlob,
    jd: &DocumentBlob,
) -> Result<EvaluationState, ExtractionError> {
    let output = loader.load(resume, jd)?;
    Ok(EvaluationState::builder()
        .with_resume_text(output.resume_text)
        .with_jd_text(output.jd_text)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_round_trips() {
        let loader = PlainTextLoader;
        let out = loader
            .load(
                &DocumentBlob::new("resume.txt", "five years of Rust"),
                &DocumentBlob::new("jd.txt", "senior Rust engineer"),
            )
            .unwrap();
        assert_eq!(out.resume_text, "five years of Rust");
        assert_eq!(out.jd_text, "senior Rust engineer");
    }

    #[test]
    fn undecodable_blob_is_unreadable() {
        let loader = PlainTextLoader;
        let err = loader
            .load(
                &DocumentBlob::new("resume.bin", vec![0xff, 0xfe, 0x00, 0x80]),
                &DocumentBlob::new("jd.txt", "text"),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable { name } if name == "resume.bin"));
    }

    #[test]
    fn blank_blob_is_empty() {
        let loader = PlainTextLoader;
        let err = loader
            .load(
                &DocumentBlob::new("resume.txt", "real text"),
                &DocumentBlob::new("jd.txt", "   \n\t  "),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Empty { name } if name == "jd.txt"));
    }

    #[test]
    fn load_into_state_seeds_both_texts() {
        let state = load_into_state(
            &PlainTextLoader,
            &DocumentBlob::new("resume.txt", "resume body"),
            &DocumentBlob::new("jd.txt", "jd body"),
        )
        .unwrap();
        assert_eq!(state.resume_text(), Some("resume body"));
        assert_eq!(state.jd_text(), Some("jd body"));
        assert_eq!(state.recommendation(), None);
    }
}
