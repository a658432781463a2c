//! Markdown renderer for idea exports.
//!
//! Produces a fixed-structure document: metadata, problem, solution, polls
//! with vote tallies, and the comment thread with replies.

use async_trait::async_trait;

use crate::domain::idea::{Comment, Idea, Poll};
use crate::ports::{ExportError, IdeaDocumentRenderer, RenderedDocument};

/// Template-based Markdown implementation of IdeaDocumentRenderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownIdeaRenderer;

impl MarkdownIdeaRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the document body.
    pub fn render_markdown(&self, idea: &Idea) -> String {
        let mut doc = String::new();

        doc.push_str(&format!("# {}\n\n", first_line(idea.problem())));
        doc.push_str(&format!("- **Stage:** {}\n", idea.stage()));
        if let Some(link) = idea.link() {
            doc.push_str(&format!("- **Link:** {}\n", link));
        }
        doc.push_str(&format!(
            "- **Reactions:** {} likes, {} dislikes\n",
            idea.reactions().like_count(),
            idea.reactions().dislike_count()
        ));
        doc.push_str(&format!(
            "- **Created:** {}\n",
            idea.created_at().as_datetime().format("%Y-%m-%d")
        ));
        if let Some(days) = idea.auto_delete_after_days() {
            doc.push_str(&format!("- **Auto-delete after:** {} days\n", days));
        }
        doc.push('\n');

        doc.push_str("## Problem\n\n");
        doc.push_str(idea.problem());
        doc.push_str("\n\n## Solution\n\n");
        doc.push_str(idea.solution());
        doc.push_str("\n\n");

        if !idea.polls().is_empty() {
            doc.push_str("## Polls\n\n");
            for poll in idea.polls() {
                render_poll(&mut doc, poll);
            }
        }

        doc.push_str(&format!("## Comments ({})\n\n", idea.comments().len()));
        if idea.comments().is_empty() {
            doc.push_str("_No comments yet._\n");
        }
        for comment in idea.comments() {
            render_comment(&mut doc, comment);
        }

        doc
    }
}

#[async_trait]
impl IdeaDocumentRenderer for MarkdownIdeaRenderer {
    async fn render(&self, idea: &Idea) -> Result<RenderedDocument, ExportError> {
        let markdown = self.render_markdown(idea);
        Ok(RenderedDocument::markdown(
            markdown,
            &format!("idea-{}", idea.id()),
        ))
    }
}

fn render_poll(doc: &mut String, poll: &Poll) {
    let total = poll.total_votes();
    doc.push_str(&format!("### {}\n\n", poll.question()));
    for option in poll.options() {
        let votes = option.vote_count();
        let share = if total == 0 {
            0
        } else {
            votes * 100 / total
        };
        doc.push_str(&format!("- {}: {} votes ({}%)\n", option.text(), votes, share));
    }
    doc.push('\n');
}

fn render_comment(doc: &mut String, comment: &Comment) {
    doc.push_str(&format!(
        "**{}** ({} likes, {} dislikes)\n\n",
        comment.author_name(),
        comment.reactions().like_count(),
        comment.reactions().dislike_count()
    ));
    doc.push_str(&quote(comment.text()));
    for reply in comment.replies() {
        doc.push_str(&format!(">> **{}**: ", reply.author_name()));
        doc.push_str(&reply.text().replace('\n', " "));
        doc.push_str("\n\n");
    }
}

fn quote(text: &str) -> String {
    let mut quoted: String = text.lines().map(|line| format!("> {}\n", line)).collect();
    quoted.push('\n');
    quoted
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
