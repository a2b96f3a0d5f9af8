use crate::error::StartupError;
use std::fs;
use std::path::Path;

/// Biographical material the assistant answers from. Read once at startup,
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonaContext {
    pub name: String,
    pub summary: String,
    pub linkedin: String,
}

impl PersonaContext {
    pub fn new(name: impl Into<String>, summary: impl Into<String>, linkedin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            linkedin: linkedin.into(),
        }
    }

    pub fn load(name: &str, profile_pdf: &Path, summary_path: &Path) -> Result<Self, StartupError> {
        let linkedin = read_pdf_text(profile_pdf)?;
        let summary = fs::read_to_string(summary_path).map_err(|source| StartupError::ContextFile {
            path: summary_path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            pdf = %profile_pdf.display(),
            summary = %summary_path.display(),
            linkedin_chars = linkedin.len(),
            summary_chars = summary.len(),
            "loaded persona context"
        );
        Ok(Self::new(name, summary, linkedin))
    }
}

pub fn read_pdf_text(path: &Path) -> Result<String, StartupError> {
    let bytes = fs::read(path).map_err(|source| StartupError::ContextFile {
        path: path.to_path_buf(),
        source,
    })?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| StartupError::Pdf {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(join_pages(&text))
}

/// pdf-extract separates pages with form feeds; keep non-empty pages in order.
pub fn join_pages(text: &str) -> String {
    text.split('\x0c').filter(|page| !page.trim().is_empty()).collect()
}
