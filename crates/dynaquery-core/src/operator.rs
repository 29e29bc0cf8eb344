//! Mapping from abstract comparators to the service's native operator tokens.

use std::fmt;

/// Abstract comparator names accepted in filters and condition lists.
///
/// The enum is exhaustive, so the lookup can never fall through to a silent
/// default the way a stringly-typed table would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Membership in a value list.
    Inq,
    /// Inclusive range.
    Between,
    /// Substring containment.
    Like,
    /// Prefix match (sort keys only).
    BeginsWith,
    /// Attribute presence check.
    Exists,
}

impl Comparator {
    /// The native operator token this comparator renders as.
    #[must_use]
    pub fn native(self) -> NativeOperator {
        match self {
            Self::Eq => NativeOperator::Eq,
            Self::Neq => NativeOperator::Ne,
            Self::Lt => NativeOperator::Lt,
            Self::Lte => NativeOperator::Le,
            Self::Gt => NativeOperator::Gt,
            Self::Gte => NativeOperator::Ge,
            Self::Inq => NativeOperator::In,
            Self::Between => NativeOperator::Between,
            Self::Like => NativeOperator::Contains,
            Self::BeginsWith => NativeOperator::BeginsWith,
            Self::Exists => NativeOperator::Exists,
        }
    }

    /// The comparator's name as written in filters, e.g. `"beginsWith"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Inq => "inq",
            Self::Between => "between",
            Self::Like => "like",
            Self::BeginsWith => "beginsWith",
            Self::Exists => "exists",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native expression-language operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOperator {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
    /// List membership (`IN`).
    In,
    /// Inclusive range (`BETWEEN ... AND ...`).
    Between,
    /// Containment function (`contains(...)`).
    Contains,
    /// Prefix function (`begins_with(...)`).
    BeginsWith,
    /// Presence functions (`attribute_exists`/`attribute_not_exists`).
    Exists,
}

impl NativeOperator {
    /// The token as it appears in an expression string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Contains => "contains",
            Self::BeginsWith => "begins_with",
            Self::Exists => "EXISTS",
        }
    }

    /// `true` for the plain infix comparators `= <> < <= > >=`.
    #[must_use]
    pub fn is_infix_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }
}

impl fmt::Display for NativeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_comparators_to_native_tokens() {
        assert_eq!(Comparator::Eq.native().as_str(), "=");
        assert_eq!(Comparator::Neq.native().as_str(), "<>");
        assert_eq!(Comparator::Lte.native().as_str(), "<=");
        assert_eq!(Comparator::Inq.native().as_str(), "IN");
        assert_eq!(Comparator::Between.native().as_str(), "BETWEEN");
        assert_eq!(Comparator::Like.native().as_str(), "contains");
        assert_eq!(Comparator::BeginsWith.native().as_str(), "begins_with");
    }

    #[test]
    fn test_should_classify_infix_comparisons() {
        assert!(NativeOperator::Ge.is_infix_comparison());
        assert!(!NativeOperator::Between.is_infix_comparison());
        assert!(!NativeOperator::Contains.is_infix_comparison());
    }
}
