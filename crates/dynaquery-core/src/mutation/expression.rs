//! Condition and update expression builders for mutations.
//!
//! Pure functions: the output plugs directly into a conditional write,
//! update, or transactional record with no further string handling.
//!
//! Placeholder scheme differs from the query builder on purpose: names render
//! as `#key_<attr>` and values as `:val<n>` with `<n>` an emission-order
//! counter, so the same attribute can appear in several comparisons without
//! placeholder collisions.

use dynaquery_model::types::{ExpressionAttributeNames, ExpressionAttributeValues};
use dynaquery_model::{AttributeValue, Item};

use crate::filter::Predicate;

/// `AND`/`OR` connective between comparisons in a condition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Both sides must hold.
    And,
    /// Either side must hold.
    Or,
}

impl Connective {
    /// The native token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// One node of a flat condition sequence: a comparison, or a connective
/// separating the comparison before it from the one after it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionExpr {
    /// `<key> <comparator> <operand>`.
    Comparison {
        /// The attribute the condition applies to.
        key: String,
        /// The comparator and operand.
        predicate: Predicate,
    },
    /// A connective between neighboring comparisons. Ignored at position 0,
    /// where it has no left operand.
    AndOr(Connective),
}

impl ConditionExpr {
    /// An `AND` separator node.
    pub const AND: Self = Self::AndOr(Connective::And);
    /// An `OR` separator node.
    pub const OR: Self = Self::AndOr(Connective::Or);

    /// A comparison node.
    #[must_use]
    pub fn compare(key: impl Into<String>, predicate: Predicate) -> Self {
        Self::Comparison {
            key: key.into(),
            predicate,
        }
    }
}

/// A rendered expression with its placeholder maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionParts {
    /// The expression string.
    pub expression: String,
    /// `#key_<attr>` placeholder to attribute name.
    pub attr_names: ExpressionAttributeNames,
    /// `:val...` placeholder to operand value.
    pub attr_values: ExpressionAttributeValues,
}

impl ExpressionParts {
    /// `true` when no expression text was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Folds another rendering's placeholder maps into this one's.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.attr_names.extend(other.attr_names);
        self.attr_values.extend(other.attr_values);
        self
    }
}

/// Renders a flat condition sequence left to right.
///
/// A [`ConditionExpr::AndOr`] at any position after the first inserts its
/// connective; one at position 0 is ignored. Attribute-name placeholders are
/// recorded once per attribute even when it repeats.
#[must_use]
pub fn build_condition_expressions(nodes: &[ConditionExpr]) -> ExpressionParts {
    let mut parts = ExpressionParts::default();
    let mut counter = 0usize;

    for (position, node) in nodes.iter().enumerate() {
        match node {
            ConditionExpr::AndOr(connective) => {
                if position > 0 {
                    parts.expression.push(' ');
                    parts.expression.push_str(connective.as_str());
                    parts.expression.push(' ');
                }
            }
            ConditionExpr::Comparison { key, predicate } => {
                let name = format!("#key_{key}");
                parts.attr_names.insert(name.clone(), key.clone());
                render_comparison(&mut parts, &name, predicate, counter);
                counter += 1;
            }
        }
    }

    parts
}

fn render_comparison(
    parts: &mut ExpressionParts,
    name: &str,
    predicate: &Predicate,
    counter: usize,
) {
    match predicate {
        Predicate::Between(low, high) => {
            parts
                .expression
                .push_str(&format!("{name} BETWEEN :val{counter}_1 AND :val{counter}_2"));
            parts
                .attr_values
                .insert(format!(":val{counter}_1"), low.clone());
            parts
                .attr_values
                .insert(format!(":val{counter}_2"), high.clone());
        }
        Predicate::Exists(true) => {
            parts
                .expression
                .push_str(&format!("attribute_exists({name})"));
        }
        Predicate::Exists(false) => {
            parts
                .expression
                .push_str(&format!("attribute_not_exists({name})"));
        }
        Predicate::Inq(values) => {
            let placeholders: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let placeholder = format!(":val{counter}_{i}");
                    parts.attr_values.insert(placeholder.clone(), value.clone());
                    placeholder
                })
                .collect();
            parts
                .expression
                .push_str(&format!("{name} IN ({})", placeholders.join(", ")));
        }
        Predicate::Like(value) => {
            parts
                .expression
                .push_str(&format!("contains({name}, :val{counter})"));
            parts
                .attr_values
                .insert(format!(":val{counter}"), value.clone());
        }
        Predicate::BeginsWith(value) => {
            parts
                .expression
                .push_str(&format!("begins_with({name}, :val{counter})"));
            parts
                .attr_values
                .insert(format!(":val{counter}"), value.clone());
        }
        Predicate::Eq(value)
        | Predicate::Neq(value)
        | Predicate::Lt(value)
        | Predicate::Lte(value)
        | Predicate::Gt(value)
        | Predicate::Gte(value) => {
            let op = predicate.comparator().native();
            parts
                .expression
                .push_str(&format!("{name} {op} :val{counter}"));
            parts
                .attr_values
                .insert(format!(":val{counter}"), value.clone());
        }
    }
}

/// Renders `SET #key_<k> = :val_<k>, ...` over `item`'s attributes, sorted by
/// attribute name for a deterministic expression.
///
/// An empty map yields `"SET "` with empty placeholder maps; callers guard
/// against issuing that no-op update.
#[must_use]
pub fn build_update_expressions(item: &Item) -> ExpressionParts {
    let mut parts = ExpressionParts::default();
    let mut assignments: Vec<String> = Vec::with_capacity(item.len());

    let mut keys: Vec<&String> = item.keys().collect();
    keys.sort();
    for key in keys {
        assignments.push(format!("#key_{key} = :val_{key}"));
        parts.attr_names.insert(format!("#key_{key}"), key.clone());
        parts
            .attr_values
            .insert(format!(":val_{key}"), item[key].clone());
    }

    parts.expression = format!("SET {}", assignments.join(", "));
    parts
}

/// Shorthand for an equality comparison value.
#[must_use]
pub fn eq(value: impl Into<AttributeValue>) -> Predicate {
    Predicate::Eq(value.into())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_should_render_alternating_and_or_sequence() {
        let nodes = [
            ConditionExpr::compare("id", eq(123_i64)),
            ConditionExpr::OR,
            ConditionExpr::compare("name", eq("Gru")),
            ConditionExpr::AND,
            ConditionExpr::compare("age", Predicate::Gt(20_i64.into())),
        ];
        let parts = build_condition_expressions(&nodes);

        assert_eq!(
            parts.expression,
            "#key_id = :val0 OR #key_name = :val1 AND #key_age > :val2"
        );
        assert_eq!(
            parts.attr_names,
            HashMap::from([
                ("#key_id".to_owned(), "id".to_owned()),
                ("#key_name".to_owned(), "name".to_owned()),
                ("#key_age".to_owned(), "age".to_owned()),
            ])
        );
        assert_eq!(parts.attr_values[":val0"], 123_i64.into());
        assert_eq!(parts.attr_values[":val1"], "Gru".into());
        assert_eq!(parts.attr_values[":val2"], 20_i64.into());
    }

    #[test]
    fn test_should_ignore_leading_connective() {
        let nodes = [
            ConditionExpr::AND,
            ConditionExpr::compare("id", eq("x")),
        ];
        let parts = build_condition_expressions(&nodes);
        assert_eq!(parts.expression, "#key_id = :val0");
    }

    #[test]
    fn test_should_render_between_with_two_placeholders() {
        let nodes = [ConditionExpr::compare(
            "age",
            Predicate::Between(18_i64.into(), 65_i64.into()),
        )];
        let parts = build_condition_expressions(&nodes);
        assert_eq!(parts.expression, "#key_age BETWEEN :val0_1 AND :val0_2");
        assert_eq!(parts.attr_values[":val0_1"], 18_i64.into());
        assert_eq!(parts.attr_values[":val0_2"], 65_i64.into());
    }

    #[test]
    fn test_should_render_exists_without_value_placeholder() {
        let parts = build_condition_expressions(&[
            ConditionExpr::compare("id", Predicate::Exists(true)),
            ConditionExpr::AND,
            ConditionExpr::compare("deleted", Predicate::Exists(false)),
        ]);
        assert_eq!(
            parts.expression,
            "attribute_exists(#key_id) AND attribute_not_exists(#key_deleted)"
        );
        assert!(parts.attr_values.is_empty());
    }

    #[test]
    fn test_should_record_repeated_attribute_name_once() {
        let nodes = [
            ConditionExpr::compare("age", Predicate::Gte(18_i64.into())),
            ConditionExpr::AND,
            ConditionExpr::compare("age", Predicate::Lt(65_i64.into())),
        ];
        let parts = build_condition_expressions(&nodes);
        assert_eq!(
            parts.expression,
            "#key_age >= :val0 AND #key_age < :val1"
        );
        assert_eq!(parts.attr_names.len(), 1);
        assert_eq!(parts.attr_values.len(), 2);
    }

    #[test]
    fn test_should_render_in_and_contains_and_begins_with() {
        let parts = build_condition_expressions(&[ConditionExpr::compare(
            "status",
            Predicate::Inq(vec!["A".into(), "B".into()]),
        )]);
        assert_eq!(parts.expression, "#key_status IN (:val0_0, :val0_1)");

        let parts = build_condition_expressions(&[ConditionExpr::compare(
            "title",
            Predicate::Like("gadget".into()),
        )]);
        assert_eq!(parts.expression, "contains(#key_title, :val0)");

        let parts = build_condition_expressions(&[ConditionExpr::compare(
            "sk",
            Predicate::BeginsWith("order#".into()),
        )]);
        assert_eq!(parts.expression, "begins_with(#key_sk, :val0)");
    }

    #[test]
    fn test_should_render_empty_input_as_empty_expression() {
        let parts = build_condition_expressions(&[]);
        assert!(parts.is_empty());
        assert!(parts.attr_names.is_empty());
    }

    #[test]
    fn test_should_build_update_expression_sorted_by_attribute() {
        let mut item = Item::new();
        item.insert("name".to_owned(), "Gru".into());
        item.insert("age".to_owned(), 42_i64.into());
        let parts = build_update_expressions(&item);

        assert_eq!(
            parts.expression,
            "SET #key_age = :val_age, #key_name = :val_name"
        );
        assert_eq!(parts.attr_names["#key_name"], "name");
        assert_eq!(parts.attr_values[":val_age"], 42_i64.into());
    }

    #[test]
    fn test_should_build_bare_set_for_empty_update() {
        let parts = build_update_expressions(&Item::new());
        assert_eq!(parts.expression, "SET ");
        assert!(parts.attr_names.is_empty());
        assert!(parts.attr_values.is_empty());
    }

    #[test]
    fn test_should_merge_placeholder_maps() {
        let conditions =
            build_condition_expressions(&[ConditionExpr::compare("id", Predicate::Exists(true))]);
        let mut item = Item::new();
        item.insert("name".to_owned(), "Gru".into());
        let updates = build_update_expressions(&item);

        let merged = conditions.merged_with(updates);
        assert!(merged.attr_names.contains_key("#key_id"));
        assert!(merged.attr_names.contains_key("#key_name"));
        assert!(merged.attr_values.contains_key(":val_name"));
    }
}
