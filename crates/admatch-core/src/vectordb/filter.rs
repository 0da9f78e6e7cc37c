//! Typed filter expression passed to the vector store.

/// Condition operator for a [`FieldFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Field must match at least one of the values.
    AnyOf,
    /// Field must match none of the values.
    NotIn,
}

/// One condition over a named payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub values: Vec<String>,
}

/// Conjunction of conditions: every `must` entry must hold, every
/// `must_not` entry must fail.
///
/// An empty filter means "no constraint", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorFilter {
    pub must: Vec<FieldFilter>,
    pub must_not: Vec<FieldFilter>,
}

impl VectorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an any-of condition to `must`. Empty value sets are
    /// skipped: an absent constraint contributes no condition.
    pub fn must_match(&mut self, field: impl Into<String>, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.must.push(FieldFilter {
            field: field.into(),
            op: FilterOp::AnyOf,
            values,
        });
    }

    /// Appends an exclusion condition to `must_not`. Empty value sets
    /// are skipped.
    pub fn must_not_match(&mut self, field: impl Into<String>, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.must_not.push(FieldFilter {
            field: field.into(),
            op: FilterOp::NotIn,
            values,
        });
    }

    /// Returns `true` when both condition lists are empty.
    pub fn is_noop(&self) -> bool {
        self.must.is_empty() && self.must_not.is_empty()
    }
}
