//! Directive line classifier.
//!
//! A directive line is `<indent><delimiter><keyword>[:] <rest>`, where the
//! delimiter is configurable (`:` for Sphinx style, `@` for epydoc style).

use crate::error::Error;
use crate::model::DirectiveKind;
use regex::Regex;

/// A line that opens a directive, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    pub kind: DirectiveKind,
    /// Leading whitespace before the delimiter
    pub indent: &'a str,
    /// Parameter name, only for `Param`/`Type`
    pub subject: Option<&'a str>,
    /// Inline description after keyword (and subject)
    pub text: &'a str,
}

/// Matcher compiled for a single delimiter character.
#[derive(Debug, Clone)]
pub struct Classifier {
    delimiter: char,
    re: Regex,
}

impl Classifier {
    /// Build a classifier for `delimiter`.
    ///
    /// Whitespace and alphanumeric characters cannot open a directive.
    pub fn new(delimiter: char) -> Result<Self, Error> {
        if delimiter.is_whitespace() || delimiter.is_alphanumeric() {
            return Err(Error::InvalidDelimiter(delimiter));
        }
        let pattern = format!(
            r"^(\s*){}(param|type|returns|return|rtype|raises)(?::|\s+|$)(.*)$",
            regex::escape(&delimiter.to_string())
        );
        let re = Regex::new(&pattern).map_err(|_| Error::InvalidDelimiter(delimiter))?;
        Ok(Self { delimiter, re })
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Keyword and remaining text of a directive line, `None` for plain text.
    ///
    /// `line` must not carry its line terminator.
    pub fn keyword<'a>(&self, line: &'a str) -> Option<(DirectiveKind, &'a str, &'a str)> {
        let caps = self.re.captures(line)?;
        let indent = caps.get(1)?.as_str();
        let kind = DirectiveKind::from_keyword(caps.get(2)?.as_str())?;
        let tail = caps.get(3)?.as_str().trim_start();
        Some((kind, indent, tail))
    }

    /// Full classification including subject extraction.
    ///
    /// A `param`/`type` line without a name is treated as plain text.
    pub fn classify<'a>(&self, line: &'a str) -> Option<DirectiveLine<'a>> {
        let (kind, indent, tail) = self.keyword(line)?;
        if !kind.takes_subject() {
            return Some(DirectiveLine {
                kind,
                indent,
                subject: None,
                text: tail,
            });
        }
        let (subject, text) = split_subject(tail)?;
        Some(DirectiveLine {
            kind,
            indent,
            subject: Some(subject),
            text,
        })
    }
}

/// Classify a single line against `delimiter`.
///
/// Returns the directive kind and the text following the keyword and its
/// optional colon. Builds a throwaway [`Classifier`]; reuse one when
/// classifying many lines.
pub fn classify(line: &str, delimiter: char) -> Option<(DirectiveKind, &str)> {
    let classifier = Classifier::new(delimiter).ok()?;
    let line = line.trim_end_matches(['\n', '\r']);
    classifier
        .keyword(line)
        .map(|(kind, _indent, tail)| (kind, tail))
}

/// Split `name: description` / `name description` into name and text.
fn split_subject(tail: &str) -> Option<(&str, &str)> {
    let end = tail
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(tail.len());
    let (name, rest) = tail.split_at(end);
    if name.is_empty() {
        return None;
    }
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim_start();
    Some((name, rest))
}
