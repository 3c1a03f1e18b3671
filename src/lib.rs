//! pdoc-post — rewrite doc-comment directives into inline markup.
//!
//! Recognizes `param`, `type`, `return`/`returns`, `rtype` and `raises`
//! directives opened by a configurable delimiter (`:param x:` or `@param x:`),
//! pairs every parameter with its type, and substitutes each directive with
//! bold/italic markup in place. Everything else passes through untouched.
//!
//! ```
//! let out = pdoc_post::process_str(
//!     "Foo\n  :param n: count\n  :type n: int\n",
//!     &pdoc_post::Config::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "Foo\n  **n** (**<i>int</i></i>**): count</br>");
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

pub use error::{Error, ValidationError};
pub use model::{DirectiveKind, DirectiveOccurrence, Document, Segment, SourcePosition};
pub use render::Format;
pub use validate::{validate, ValidatedDocument};

use std::io::{Read, Write};

/// Pipeline configuration for [`process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Character opening a directive, usually `:` or `@`
    pub delimiter: char,
    /// Reject parameters that have no `type` directive
    pub force_type_spec: bool,
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: ':',
            force_type_spec: true,
            format: Format::Markdown,
        }
    }
}

/// Read `input` to the end, rewrite its directives and write the result.
///
/// The whole document is validated before anything is written; on error
/// `output` is left untouched.
pub fn process<R: Read, W: Write>(mut input: R, mut output: W, config: &Config) -> Result<(), Error> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(Error::Read)?;

    let rendered = process_str(&text, config)?;

    output.write_all(rendered.as_bytes()).map_err(Error::Write)?;
    output.flush().map_err(Error::Write)
}

/// In-memory variant of [`process`].
pub fn process_str(input: &str, config: &Config) -> Result<String, Error> {
    let classifier = parser::Classifier::new(config.delimiter)?;
    let document = parser::accumulate(input, &classifier);
    let validated = validate(document, config.force_type_spec)?;
    Ok(render::create_renderer(config.format).render(&validated))
}

/// Parse and validate without rendering.
pub fn check_str(input: &str, config: &Config) -> Result<ValidatedDocument, Error> {
    let classifier = parser::Classifier::new(config.delimiter)?;
    let document = parser::accumulate(input, &classifier);
    Ok(validate(document, config.force_type_spec)?)
}
