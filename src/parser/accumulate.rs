//! Directive accumulator — line-by-line state machine.
//!
//! Each line either opens a directive, continues the open one (more indented
//! than its opening line), or closes it and passes through unchanged.

use super::classify::{Classifier, DirectiveLine};
use crate::model::*;
use std::mem;

enum State {
    Idle,
    Open {
        occurrence: DirectiveOccurrence,
        /// Indentation width of the opening line
        width: usize,
    },
}

struct Accumulator<'c> {
    classifier: &'c Classifier,
    doc: Document,
    state: State,
}

/// Fold `input` into a [`Document`] of passthrough text and directives.
pub fn accumulate(input: &str, classifier: &Classifier) -> Document {
    let mut acc = Accumulator {
        classifier,
        doc: Document::default(),
        state: State::Idle,
    };

    let mut lines = input.split_inclusive('\n').enumerate().peekable();
    while let Some((idx, raw)) = lines.next() {
        // Closing-quote indentation of a docstring: unterminated and blank.
        // Plain prose keeps it so directive-free text round-trips exactly.
        if lines.peek().is_none()
            && !raw.ends_with('\n')
            && raw.trim().is_empty()
            && acc.seen_directive()
        {
            break;
        }
        acc.push_line(idx + 1, raw);
    }
    acc.close();

    tracing::debug!(
        segments = acc.doc.segments.len(),
        directives = acc.doc.occurrences.len(),
        delimiter = %classifier.delimiter(),
        "accumulated document"
    );
    acc.doc
}

impl Accumulator<'_> {
    fn seen_directive(&self) -> bool {
        !self.doc.occurrences.is_empty() || matches!(self.state, State::Open { .. })
    }

    fn push_line(&mut self, line_no: usize, raw: &str) {
        let (content, terminator) = split_terminator(raw);

        if let Some(directive) = self.classifier.classify(content) {
            self.close();
            self.open(line_no, directive, terminator);
            return;
        }

        if let State::Open { occurrence, width } = &mut self.state {
            if is_continuation(content, *width) {
                occurrence.body.push(raw.to_string());
                return;
            }
        }

        self.close();
        self.doc.segments.push(Segment::Text(raw.to_string()));
    }

    fn open(&mut self, line_no: usize, directive: DirectiveLine<'_>, terminator: &str) {
        let occurrence = DirectiveOccurrence {
            kind: directive.kind,
            subject: directive.subject.map(str::to_string),
            body: vec![directive.text.to_string()],
            indent: directive.indent.to_string(),
            terminator: terminator.to_string(),
            source_position: SourcePosition {
                line: line_no,
                segment: self.doc.segments.len(),
            },
        };
        self.state = State::Open {
            occurrence,
            width: indent_width(directive.indent),
        };
    }

    fn close(&mut self) {
        if let State::Open { occurrence, .. } = mem::replace(&mut self.state, State::Idle) {
            let index = self.doc.occurrences.len();
            self.doc.segments.push(Segment::Directive(index));
            self.doc.occurrences.push(occurrence);
        }
    }
}

/// Split a raw line into content and its `\n` / `\r\n` terminator.
fn split_terminator(raw: &str) -> (&str, &str) {
    let content = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw);
    raw.split_at(content.len())
}

/// Leading whitespace measured in characters, so `\u{3000}` counts as one.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_continuation(content: &str, open_width: usize) -> bool {
    !content.trim().is_empty() && indent_width(content) > open_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Document {
        accumulate(input, &Classifier::new(':').unwrap())
    }

    #[test]
    fn passthrough_only() {
        let doc = run("Foo is bar\n  Blue is green\n");
        assert!(doc.occurrences.is_empty());
        assert_eq!(
            doc.segments,
            vec![
                Segment::Text("Foo is bar\n".to_string()),
                Segment::Text("  Blue is green\n".to_string()),
            ]
        );
    }

    #[test]
    fn param_and_type_in_order() {
        let doc = run("Foo\n   :param x: the x\n   :type x: int\n   Bar\n");
        assert_eq!(doc.occurrences.len(), 2);
        assert_eq!(
            doc.segments,
            vec![
                Segment::Text("Foo\n".to_string()),
                Segment::Directive(0),
                Segment::Directive(1),
                Segment::Text("   Bar\n".to_string()),
            ]
        );
        let param = &doc.occurrences[0];
        assert_eq!(param.kind, DirectiveKind::Param);
        assert_eq!(param.subject.as_deref(), Some("x"));
        assert_eq!(param.body, vec!["the x".to_string()]);
        assert_eq!(param.indent, "   ");
        assert_eq!(param.terminator, "\n");
        assert_eq!(param.source_position, SourcePosition { line: 2, segment: 1 });
        assert_eq!(doc.occurrences[1].source_position, SourcePosition { line: 3, segment: 2 });
    }

    #[test]
    fn continuation_lines_kept_verbatim() {
        let doc = run(":param x: first\n    second  \n  third\nplain\n");
        assert_eq!(
            doc.occurrences[0].body,
            vec![
                "first".to_string(),
                "    second  \n".to_string(),
                "  third\n".to_string(),
            ]
        );
        assert_eq!(doc.segments.last(), Some(&Segment::Text("plain\n".to_string())));
    }

    #[test]
    fn same_indent_closes_directive() {
        let doc = run("  :raises ValueError\n  Blue is green\n");
        assert_eq!(doc.occurrences[0].body, vec!["ValueError".to_string()]);
        assert_eq!(doc.segments.len(), 2);
    }

    #[test]
    fn blank_line_is_not_continuation() {
        let doc = run(":return x\n\n        later\n");
        assert_eq!(doc.occurrences[0].body.len(), 1);
        assert_eq!(
            doc.segments,
            vec![
                Segment::Directive(0),
                Segment::Text("\n".to_string()),
                Segment::Text("        later\n".to_string()),
            ]
        );
    }

    #[test]
    fn directive_closes_previous() {
        let doc = run(":param a: one\n:param b: two\n");
        assert_eq!(doc.segments, vec![Segment::Directive(0), Segment::Directive(1)]);
        assert_eq!(doc.occurrences[1].subject.as_deref(), Some("b"));
    }

    #[test]
    fn trailing_blank_unterminated_line_dropped() {
        let doc = run("Foo\n   :rtype: int\n   Bar\n       ");
        assert_eq!(
            doc.segments,
            vec![
                Segment::Text("Foo\n".to_string()),
                Segment::Directive(0),
                Segment::Text("   Bar\n".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_blank_line_kept_without_directives() {
        let doc = run("Foo is bar\n   ");
        assert_eq!(
            doc.segments,
            vec![
                Segment::Text("Foo is bar\n".to_string()),
                Segment::Text("   ".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_blank_line_dropped_after_open_directive() {
        let doc = run("Foo\n   :raises KeyError\n   ");
        assert_eq!(doc.segments, vec![Segment::Text("Foo\n".to_string()), Segment::Directive(0)]);
    }

    #[test]
    fn unicode_whitespace_indentation() {
        let doc = run("\u{3000}:param x: the x\n\u{3000}\u{3000}more\n\u{3000}:type x: int\n");
        assert_eq!(doc.occurrences.len(), 2);
        assert_eq!(doc.occurrences[0].indent, "\u{3000}");
        assert_eq!(doc.occurrences[0].body.len(), 2);
        assert_eq!(doc.occurrences[1].kind, DirectiveKind::Type);
    }

    #[test]
    fn trailing_text_unterminated_line_kept() {
        let doc = run("Foo\nBar");
        assert_eq!(doc.segments.last(), Some(&Segment::Text("Bar".to_string())));
    }

    #[test]
    fn crlf_terminator_recorded() {
        let doc = run(":rtype: int\r\nrest\r\n");
        assert_eq!(doc.occurrences[0].terminator, "\r\n");
        assert_eq!(doc.occurrences[0].body, vec!["int".to_string()]);
    }

    #[test]
    fn unterminated_directive_at_end() {
        let doc = run("Foo\n:returns: done");
        assert_eq!(doc.occurrences[0].terminator, "");
        assert_eq!(doc.occurrences[0].body, vec!["done".to_string()]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(run(""), Document::default());
    }
}
