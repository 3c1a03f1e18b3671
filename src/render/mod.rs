//! Renderer module — trait-based markup dispatch.

pub mod html;
pub mod markdown;

use crate::error::Error;
use crate::model::{DirectiveKind, DirectiveOccurrence, Segment};
use crate::validate::ValidatedDocument;
use std::fmt;
use std::str::FromStr;

/// Line break appended after most rendered directives.
pub const BREAK: &str = "</br>";

/// Markup flavour used for the substituted directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Markdown,
    Html,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("markdown"),
            Self::Html => f.write_str("html"),
        }
    }
}

/// Inline markup primitives; document assembly is shared.
pub trait Renderer {
    /// Bold text, e.g. a parameter name.
    fn strong(&self, text: &str) -> String;

    /// Parenthesised type annotation following a parameter name.
    fn type_annotation(&self, ty: &str) -> String;

    /// Splice rendered directives back between the passthrough lines.
    fn render(&self, doc: &ValidatedDocument) -> String {
        let document = doc.document();
        let mut output = String::new();
        for segment in &document.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Directive(idx) => {
                    if let Some(occ) = document.occurrences.get(*idx) {
                        output.push_str(&render_directive(self, doc, occ));
                    }
                }
            }
        }
        output
    }
}

/// Create a renderer for the given format.
pub fn create_renderer(format: Format) -> Box<dyn Renderer> {
    match format {
        Format::Markdown => Box::new(markdown::MarkdownRenderer),
        Format::Html => Box::new(html::HtmlRenderer),
    }
}

fn render_directive<R: Renderer + ?Sized>(
    renderer: &R,
    doc: &ValidatedDocument,
    occ: &DirectiveOccurrence,
) -> String {
    let description = occ.description();
    let mut out = occ.indent.clone();

    match occ.kind {
        // Folded into the matching param.
        DirectiveKind::Type => return String::new(),
        DirectiveKind::Param => {
            let name = occ.subject.as_deref().unwrap_or_default();
            out.push_str(&renderer.strong(name));
            out.push(' ');
            if let Some(ty) = doc.type_of(name) {
                out.push_str(&renderer.type_annotation(&inline_type(&ty.description())));
                out.push_str(": ");
            }
            out.push_str(&description);
            out.push_str(BREAK);
        }
        DirectiveKind::Return => {
            out.push_str(&renderer.strong("returns:"));
            out.push(' ');
            out.push_str(&description);
            if !description.ends_with('\n') {
                out.push_str(&occ.terminator);
            }
        }
        DirectiveKind::Rtype => {
            out.push_str(&renderer.strong("return type:"));
            out.push(' ');
            out.push_str(&description);
            out.push_str(BREAK);
        }
        DirectiveKind::Raises => {
            out.push_str(&renderer.strong("raises:"));
            out.push(' ');
            out.push_str(&description);
            out.push_str(BREAK);
        }
    }
    out
}

/// Type text on one line: continuation breaks and runs of blanks collapse
/// to single spaces inside the annotation.
fn inline_type(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_str() {
        assert_eq!("markdown".parse::<Format>().unwrap(), Format::Markdown);
        assert_eq!("md".parse::<Format>().unwrap(), Format::Markdown);
        assert_eq!("html".parse::<Format>().unwrap(), Format::Html);
        assert!(matches!("json".parse::<Format>(), Err(Error::UnknownFormat(f)) if f == "json"));
    }

    #[test]
    fn inline_type_collapses_line_breaks() {
        assert_eq!(inline_type("list     of\n    str\n"), "list of str");
        assert_eq!(inline_type("Dict[str, int]"), "Dict[str, int]");
    }

    #[test]
    fn format_display_round_trips_name() {
        assert_eq!(Format::Html.to_string(), "html");
        assert_eq!(Format::default().to_string(), "markdown");
    }
}
