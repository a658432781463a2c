//! Idea document renderer port.
//!
//! Turns the current state of an idea into a downloadable document. The
//! bundled adapter renders Markdown; other formats plug in behind the same
//! trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::idea::Idea;

/// Port for rendering an idea as a document.
#[async_trait]
pub trait IdeaDocumentRenderer: Send + Sync {
    /// Render `idea` into document bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering fails.
    async fn render(&self, idea: &Idea) -> Result<RenderedDocument, ExportError>;
}

/// Rendered document with content and download metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// The document content.
    pub bytes: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub file_name: String,
}

impl RenderedDocument {
    /// Wrap Markdown text.
    pub fn markdown(text: String, base_name: &str) -> Self {
        Self {
            bytes: text.into_bytes(),
            content_type: "text/markdown; charset=utf-8".to_string(),
            file_name: format!("{}.md", base_name),
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The renderer backend is not available.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rendering failed.
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_document_has_md_extension() {
        let doc = RenderedDocument::markdown("# Hi".to_string(), "idea-1");
        assert_eq!(doc.file_name, "idea-1.md");
        assert!(doc.content_type.starts_with("text/markdown"));
        assert_eq!(doc.bytes, b"# Hi".to_vec());
    }

    #[test]
    fn renderer_is_object_safe() {
        fn _accepts_dyn(_renderer: &dyn IdeaDocumentRenderer) {}
    }
}
