//! Cross-directive validation: pair every `param` with its `type`.

use crate::error::ValidationError;
use crate::model::{DirectiveKind, DirectiveOccurrence, Document};
use std::collections::HashMap;

/// A document whose `param`/`type` directives are known to be consistent.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    document: Document,
    /// Subject name -> index of its `type` occurrence
    types: HashMap<String, usize>,
}

impl ValidatedDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The `type` directive paired with parameter `name`, if any.
    pub fn type_of(&self, name: &str) -> Option<&DirectiveOccurrence> {
        self.types
            .get(name)
            .and_then(|&idx| self.document.occurrences.get(idx))
    }
}

#[derive(Default)]
struct Pairing {
    /// Occurrence index of the first `param`
    param: Option<usize>,
    /// Occurrence index of the first `type`
    ty: Option<usize>,
}

/// Check `document` and hand it back ready for rendering.
///
/// Checks run in this order and the first failure aborts:
/// no `param` anywhere while a `type` exists, a `type` naming an undeclared
/// parameter, then (only if `force_type_spec`) a `param` lacking a `type`.
pub fn validate(
    document: Document,
    force_type_spec: bool,
) -> Result<ValidatedDocument, ValidationError> {
    let mut order: Vec<&str> = Vec::new();
    let mut table: HashMap<&str, Pairing> = HashMap::new();

    for (idx, occ) in document.occurrences.iter().enumerate() {
        let Some(name) = occ.subject.as_deref() else {
            continue;
        };
        let entry = table.entry(name).or_insert_with(|| {
            order.push(name);
            Pairing::default()
        });
        match occ.kind {
            DirectiveKind::Param => {
                entry.param.get_or_insert(idx);
            }
            DirectiveKind::Type => {
                if entry.ty.is_some() {
                    tracing::warn!(name, line = occ.line(), "duplicate type directive ignored");
                } else {
                    entry.ty = Some(idx);
                }
            }
            _ => {}
        }
    }

    let occurrence = |idx: usize| &document.occurrences[idx];

    if document.of_kind(DirectiveKind::Param).next().is_none() {
        if let Some(first) = document.of_kind(DirectiveKind::Type).next() {
            return Err(ValidationError::NoParamError {
                name: first.subject.clone().unwrap_or_default(),
                line: first.line(),
            });
        }
    }

    for name in &order {
        let pairing = &table[name];
        if let (None, Some(ty)) = (pairing.param, pairing.ty) {
            return Err(ValidationError::ParamTypeMismatch {
                name: name.to_string(),
                line: occurrence(ty).line(),
            });
        }
    }

    for name in &order {
        let pairing = &table[name];
        if let (Some(param), None) = (pairing.param, pairing.ty) {
            if force_type_spec {
                return Err(ValidationError::NoTypeError {
                    name: name.to_string(),
                    line: occurrence(param).line(),
                });
            }
            tracing::debug!(name, "parameter rendered without type");
        }
    }

    let types = order
        .iter()
        .filter_map(|name| table[name].ty.map(|idx| (name.to_string(), idx)))
        .collect();

    Ok(ValidatedDocument { document, types })
}
