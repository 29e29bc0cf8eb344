//! Backend-agnostic filter description.
//!
//! A [`Filter`] says *what* to match; the query builder turns it into the
//! service's expression language. Where-conditions are an explicit tagged
//! union (scalar, value list, or single-operator predicate) so the compiler
//! matches on shape instead of sniffing it at runtime.

use dynaquery_model::AttributeValue;

use crate::operator::Comparator;

/// Sort order over the index's sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending (the service default).
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// The value for the request's forward-scan flag.
    #[must_use]
    pub fn scan_forward(self) -> bool {
        matches!(self, Self::Asc)
    }
}

/// A single-operator condition on one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Equal to the value.
    Eq(AttributeValue),
    /// Not equal to the value.
    Neq(AttributeValue),
    /// Less than the value.
    Lt(AttributeValue),
    /// Less than or equal to the value.
    Lte(AttributeValue),
    /// Greater than the value.
    Gt(AttributeValue),
    /// Greater than or equal to the value.
    Gte(AttributeValue),
    /// Within the inclusive range.
    Between(AttributeValue, AttributeValue),
    /// Starts with the value (sort keys only).
    BeginsWith(AttributeValue),
    /// Equal to one of the listed values.
    Inq(Vec<AttributeValue>),
    /// Contains the value as a substring or set member.
    Like(AttributeValue),
    /// The attribute is present (`true`) or absent (`false`).
    Exists(bool),
}

impl Predicate {
    /// The comparator this predicate applies.
    #[must_use]
    pub fn comparator(&self) -> Comparator {
        match self {
            Self::Eq(_) => Comparator::Eq,
            Self::Neq(_) => Comparator::Neq,
            Self::Lt(_) => Comparator::Lt,
            Self::Lte(_) => Comparator::Lte,
            Self::Gt(_) => Comparator::Gt,
            Self::Gte(_) => Comparator::Gte,
            Self::Between(_, _) => Comparator::Between,
            Self::BeginsWith(_) => Comparator::BeginsWith,
            Self::Inq(_) => Comparator::Inq,
            Self::Like(_) => Comparator::Like,
            Self::Exists(_) => Comparator::Exists,
        }
    }
}

/// The shape of one where-entry.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereValue {
    /// A literal scalar, matched by equality.
    Scalar(AttributeValue),
    /// A value list: a 2-tuple range on a sort key, an IN-list elsewhere.
    List(Vec<AttributeValue>),
    /// An explicit single-operator predicate.
    Predicate(Predicate),
}

impl From<AttributeValue> for WhereValue {
    fn from(value: AttributeValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for WhereValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for WhereValue {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for WhereValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for WhereValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for WhereValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Vec<AttributeValue>> for WhereValue {
    fn from(values: Vec<AttributeValue>) -> Self {
        Self::List(values)
    }
}

impl From<Predicate> for WhereValue {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

/// An ordered set of attribute conditions, all AND-joined.
///
/// Insertion order is preserved so compiled expressions are deterministic;
/// re-inserting an attribute replaces its condition in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    entries: Vec<(String, WhereValue)>,
}

impl Where {
    /// An empty condition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a condition on `key`, preserving position.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<WhereValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// The condition on `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&WhereValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Iterates conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, WhereValue)> {
        self.entries.iter()
    }

    /// `true` when no condition has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A complete query description: conditions, projection, limit, order, and
/// the cursor to resume from.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// The matching criteria.
    pub where_clause: Where,
    /// Attributes to project; index keys are always added on top.
    pub fields: Option<Vec<String>>,
    /// Maximum number of items to return.
    pub limit: Option<u32>,
    /// Sort order; only meaningful on indexes with a sort key.
    pub order_by: Option<Direction>,
    /// Opaque cursor from a previous page, for cursor-based queries only.
    pub prev_cursor: Option<String>,
}

impl Filter {
    /// A filter with the given conditions and nothing else set.
    #[must_use]
    pub fn new(where_clause: Where) -> Self {
        Self {
            where_clause,
            ..Self::default()
        }
    }

    /// Restricts the projected attributes.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Caps the number of returned items.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the traversal order.
    #[must_use]
    pub fn with_order(mut self, order: Direction) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Resumes from a previously returned cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.prev_cursor = Some(cursor.into());
        self
    }
}
