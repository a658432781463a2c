//! Document adapters.
//!
//! - `MarkdownIdeaRenderer` - Markdown export of an idea

mod markdown_renderer;

pub use markdown_renderer::MarkdownIdeaRenderer;
