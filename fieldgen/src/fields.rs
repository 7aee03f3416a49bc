//! Traits implemented by generated artifacts.

use crate::errors::FieldError;
use std::iter::Copied;
use std::slice;

/// Implemented by every generated `FieldNames` table.
pub trait FieldNameTable {
    /// Name of the source type.
    const TYPE_NAME: &'static str;
    /// Member names, in declaration order.
    const NAMES: &'static [&'static str];

    fn contains(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    fn position(name: &str) -> Option<usize> {
        Self::NAMES.iter().position(|candidate| *candidate == name)
    }

    /// Resolve a runtime string to the table's static name.
    fn require(name: &str) -> Result<&'static str, FieldError> {
        Self::NAMES
            .iter()
            .copied()
            .find(|candidate| *candidate == name)
            .ok_or_else(|| FieldError::unknown(Self::TYPE_NAME, name))
    }
}

/// Implemented by every generated field enum.
///
/// Variants are listed in declaration order, so `ALL[v.index()] == v`.
pub trait FieldEnum: Copy + Eq + 'static {
    /// Name of the source type.
    const TYPE_NAME: &'static str;
    const ALL: &'static [Self];

    /// The member name exactly as declared.
    fn field_name(&self) -> &'static str;

    /// Zero-based declaration position.
    fn index(&self) -> usize;

    fn from_field_name(name: &str) -> Result<Self, FieldError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.field_name() == name)
            .ok_or_else(|| FieldError::unknown(Self::TYPE_NAME, name))
    }

    fn iter() -> Copied<slice::Iter<'static, Self>> {
        Self::ALL.iter().copied()
    }
}
