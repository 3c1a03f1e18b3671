//! Data model for directive-annotated documents — format-agnostic.

use std::fmt;

/// The five directive kinds recognized in a doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `param <name>`
    Param,
    /// `type <name>`
    Type,
    /// `return` or `returns`
    Return,
    /// `rtype`
    Rtype,
    /// `raises`
    Raises,
}

impl DirectiveKind {
    /// Map a keyword (without delimiter) to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "param" => Some(Self::Param),
            "type" => Some(Self::Type),
            "return" | "returns" => Some(Self::Return),
            "rtype" => Some(Self::Rtype),
            "raises" => Some(Self::Raises),
            _ => None,
        }
    }

    /// Whether the directive names a subject (parameter name).
    pub fn takes_subject(self) -> bool {
        matches!(self, Self::Param | Self::Type)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Param => "param",
            Self::Type => "type",
            Self::Return => "returns",
            Self::Rtype => "rtype",
            Self::Raises => "raises",
        };
        f.write_str(keyword)
    }
}

/// Where an occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// 1-based line number of the directive's opening line
    pub line: usize,
    /// Index into [`Document::segments`]
    pub segment: usize,
}

/// One recognized directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOccurrence {
    pub kind: DirectiveKind,
    /// Parameter name for `Param`/`Type`, `None` otherwise
    pub subject: Option<String>,
    /// Inline text first, then continuation lines verbatim (with terminators)
    pub body: Vec<String>,
    /// Leading whitespace of the opening line
    pub indent: String,
    /// Line terminator of the opening line ("" at end of input)
    pub terminator: String,
    pub source_position: SourcePosition,
}

impl DirectiveOccurrence {
    /// Inline text and continuation lines merged into one description.
    ///
    /// The opening line's break becomes a single space; continuation lines
    /// keep their own indentation and terminators.
    pub fn description(&self) -> String {
        let mut fragments = self.body.iter();
        let mut text = fragments.next().cloned().unwrap_or_default();
        let rest: String = fragments.map(String::as_str).collect();
        if !rest.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&rest);
        }
        text
    }

    pub fn line(&self) -> usize {
        self.source_position.line
    }
}

/// A piece of the document in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Passthrough line, terminator included
    Text(String),
    /// Index into [`Document::occurrences`]
    Directive(usize),
}

/// Accumulated document: passthrough text interleaved with directives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    pub segments: Vec<Segment>,
    pub occurrences: Vec<DirectiveOccurrence>,
}

impl Document {
    /// Occurrences of a single kind, in document order.
    pub fn of_kind(&self, kind: DirectiveKind) -> impl Iterator<Item = &DirectiveOccurrence> {
        self.occurrences.iter().filter(move |o| o.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(body: &[&str]) -> DirectiveOccurrence {
        DirectiveOccurrence {
            kind: DirectiveKind::Param,
            subject: Some("x".to_string()),
            body: body.iter().map(|s| s.to_string()).collect(),
            indent: String::new(),
            terminator: "\n".to_string(),
            source_position: SourcePosition { line: 1, segment: 0 },
        }
    }

    #[test]
    fn keywords_map_to_kinds() {
        assert_eq!(DirectiveKind::from_keyword("return"), Some(DirectiveKind::Return));
        assert_eq!(DirectiveKind::from_keyword("returns"), Some(DirectiveKind::Return));
        assert_eq!(DirectiveKind::from_keyword("rtype"), Some(DirectiveKind::Rtype));
        assert_eq!(DirectiveKind::from_keyword("arg"), None);
    }

    #[test]
    fn description_single_line() {
        assert_eq!(occurrence(&["name of table"]).description(), "name of table");
    }

    #[test]
    fn description_joins_continuation_with_space() {
        let occ = occurrence(&["first", "     second\n", "     third\n"]);
        assert_eq!(occ.description(), "first      second\n     third\n");
    }

    #[test]
    fn description_empty_inline_text() {
        let occ = occurrence(&["", "   more\n"]);
        assert_eq!(occ.description(), "   more\n");
    }
}
