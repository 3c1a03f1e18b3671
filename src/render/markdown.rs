//! Markdown-flavoured inline markup (`**bold**`).

use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn strong(&self, text: &str) -> String {
        format!("**{text}**")
    }

    fn type_annotation(&self, ty: &str) -> String {
        format!("(**<i>{ty}</i></i>**)")
    }
}
