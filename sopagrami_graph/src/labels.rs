//! Label interning.
//!
//! Vertex and edge labels arrive as text tokens. They are interned into dense
//! ids whose order follows the label values: numeric order when every label
//! of a table is an integer, lexicographic order otherwise. Keeping the order
//! value-based (and not first-seen based) makes canonical pattern keys stable
//! across differently ordered inputs.

use indexmap::IndexSet;
use itertools::Itertools;

/// Dense vertex identifier (`0..n`).
pub type VertexId = u32;

/// Interned label id.
pub type Label = u32;

/// Reserved id for an unlabeled edge. Sorts after every interned label.
pub const NO_LABEL: Label = Label::MAX;

/// How the tokens of a label table are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// Every label parses as a signed integer.
    Integer,
    /// Free-form text labels.
    Text,
}

/// The labels of a table mix integer and non-integer tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MixedLabelKinds {
    pub integer: String,
    pub text: String,
}

/// Bidirectional mapping between label tokens and interned ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    names: IndexSet<String>,
    kind: Option<LabelKind>,
}

impl LabelTable {
    /// Interns every distinct token. Ids follow value order.
    pub(crate) fn from_tokens<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, MixedLabelKinds> {
        let distinct: Vec<&str> = tokens.into_iter().unique().collect();
        if distinct.is_empty() {
            return Ok(Self::default());
        }

        let (integers, texts): (Vec<&str>, Vec<&str>) = distinct
            .into_iter()
            .partition(|token| token.parse::<i64>().is_ok());

        if let (Some(integer), Some(text)) = (integers.first(), texts.first()) {
            return Err(MixedLabelKinds {
                integer: (*integer).to_string(),
                text: (*text).to_string(),
            });
        }

        let (names, kind): (IndexSet<String>, LabelKind) = if texts.is_empty() {
            let values: Vec<i64> = integers
                .iter()
                .filter_map(|token| token.parse::<i64>().ok())
                .sorted_unstable()
                .dedup()
                .collect();
            (
                values.into_iter().map(|value| value.to_string()).collect(),
                LabelKind::Integer,
            )
        } else {
            (
                texts
                    .into_iter()
                    .sorted_unstable()
                    .map(str::to_string)
                    .collect(),
                LabelKind::Text,
            )
        };

        Ok(Self {
            names,
            kind: Some(kind),
        })
    }

    /// Looks up the id of a token.
    #[must_use]
    pub fn id(&self, token: &str) -> Option<Label> {
        let index = match self.kind? {
            LabelKind::Integer => {
                let value = token.parse::<i64>().ok()?;
                self.names.get_index_of(value.to_string().as_str())?
            }
            LabelKind::Text => self.names.get_index_of(token)?,
        };
        Label::try_from(index).ok()
    }

    /// Returns the token of an interned id. [`NO_LABEL`] has no name.
    #[must_use]
    pub fn name(&self, id: Label) -> Option<&str> {
        if id == NO_LABEL {
            return None;
        }
        self.names.get_index(id as usize).map(String::as_str)
    }

    /// Number of interned labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no label has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Interpretation of the tokens, `None` for an empty table.
    #[must_use]
    pub const fn kind(&self) -> Option<LabelKind> {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_labels_follow_numeric_order() {
        let table = LabelTable::from_tokens(["10", "2", "1", "2"]).unwrap();
        assert_eq!(table.kind(), Some(LabelKind::Integer));
        assert_eq!(table.len(), 3);
        assert_eq!(table.id("1"), Some(0));
        assert_eq!(table.id("2"), Some(1));
        assert_eq!(table.id("10"), Some(2));
        assert_eq!(table.id("010"), Some(2));
        assert_eq!(table.name(2), Some("10"));
    }

    #[test]
    fn test_text_labels_follow_lexicographic_order() {
        let table = LabelTable::from_tokens(["paper", "author", "venue"]).unwrap();
        assert_eq!(table.kind(), Some(LabelKind::Text));
        assert_eq!(table.id("author"), Some(0));
        assert_eq!(table.id("venue"), Some(2));
        assert_eq!(table.id("missing"), None);
    }

    #[test]
    fn test_mixed_labels_rejected() {
        let err = LabelTable::from_tokens(["1", "A"]).unwrap_err();
        assert_eq!(err.integer, "1");
        assert_eq!(err.text, "A");
    }

    #[test]
    fn test_no_label_has_no_name() {
        let table = LabelTable::from_tokens(["x"]).unwrap();
        assert_eq!(table.name(NO_LABEL), None);
        assert!(LabelTable::from_tokens(std::iter::empty()).unwrap().is_empty());
    }
}
