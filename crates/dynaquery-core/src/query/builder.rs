//! Compiles a [`Filter`] into a native query request for one index.
//!
//! Conditions on the index's own key attributes become the key condition
//! (pruned server-side); conditions on any other attribute become an
//! AND-joined filter expression, which the service evaluates after key
//! pruning and which consumes read capacity whether or not items match.
//!
//! Placeholder scheme: attribute names render as `#` plus the upper-cased
//! attribute key, values as `:` plus the attribute key (`_start`/`_end`
//! suffixes for ranges, `_0…_n` for IN lists).

use dynaquery_model::AttributeValue;
use dynaquery_model::input::QueryInput;

use crate::error::{Error, Result};
use crate::filter::{Direction, Filter, Predicate, WhereValue};
use crate::operator::NativeOperator;

/// Builds a complete query request (minus table and index name) from
/// `filter` against an index keyed by `partition_key_name` /
/// `sort_key_name`.
///
/// Validation is synchronous and happens before anything is rendered, so a
/// bad filter never produces a partial request.
pub fn build_query_input(
    filter: &Filter,
    partition_key_name: &str,
    sort_key_name: Option<&str>,
) -> Result<QueryInput> {
    validate(filter, partition_key_name, sort_key_name)?;

    let mut input = QueryInput::default();
    let mut key_conditions: Vec<String> = Vec::new();
    let mut filter_conditions: Vec<String> = Vec::new();

    for (key, condition) in filter.where_clause.iter() {
        let name = format!("#{}", key.to_uppercase());
        let value_expr = format!(":{key}");
        input
            .expression_attribute_names
            .insert(name.clone(), key.clone());

        if key == partition_key_name {
            let value = partition_key_scalar(condition)?;
            key_conditions.push(format!("{name} = {value_expr}"));
            input
                .expression_attribute_values
                .insert(value_expr, value.clone());
        } else if Some(key.as_str()) == sort_key_name {
            key_conditions.push(compile_sort_key(
                condition,
                &name,
                &value_expr,
                &mut input,
            )?);
        } else {
            filter_conditions.push(compile_filter_attr(
                condition,
                &name,
                &value_expr,
                &mut input,
            )?);
        }
    }

    input.key_condition_expression = Some(key_conditions.join(" AND "));
    if !filter_conditions.is_empty() {
        input.filter_expression = Some(filter_conditions.join(" AND "));
    }

    if let Some(fields) = filter.fields.as_deref().filter(|f| !f.is_empty()) {
        input.projection_expression = Some(build_projection(
            fields,
            partition_key_name,
            sort_key_name,
        ));
    }

    input.scan_index_forward = filter.order_by.map(Direction::scan_forward);
    input.limit = filter.limit;

    Ok(input)
}

/// Rejects filters that cannot compile, with expected-vs-received messages.
fn validate(filter: &Filter, partition_key_name: &str, sort_key_name: Option<&str>) -> Result<()> {
    if partition_key_name.is_empty() || sort_key_name.is_some_and(str::is_empty) {
        return Err(Error::InvalidArgument {
            expected: "$partitionKeyName(string), $sortKeyName(string) to not be empty",
            received: format!("{partition_key_name:?}, {sort_key_name:?}"),
        });
    }

    if filter.where_clause.get(partition_key_name).is_none() {
        return Err(Error::PartitionKeyRequired);
    }

    if let Some(limit) = filter.limit {
        if limit == 0 {
            return Err(Error::InvalidLimit);
        }
    }

    Ok(())
}

/// The partition key only ever supports literal equality.
fn partition_key_scalar(condition: &WhereValue) -> Result<&AttributeValue> {
    match condition {
        WhereValue::Scalar(value) if value.is_key_scalar() => Ok(value),
        WhereValue::Scalar(value) => Err(Error::PartitionKeyNotScalar {
            received: value.type_descriptor(),
        }),
        WhereValue::List(_) => Err(Error::PartitionKeyNotScalar { received: "list" }),
        WhereValue::Predicate(_) => Err(Error::PartitionKeyNotScalar {
            received: "predicate",
        }),
    }
}

/// Renders one sort-key condition into the key condition clause.
fn compile_sort_key(
    condition: &WhereValue,
    name: &str,
    value_expr: &str,
    input: &mut QueryInput,
) -> Result<String> {
    match condition {
        WhereValue::Scalar(value) => {
            input
                .expression_attribute_values
                .insert(value_expr.to_owned(), value.clone());
            Ok(format!("{name} = {value_expr}"))
        }
        WhereValue::List(values) => match values.as_slice() {
            [low, high] => Ok(push_between(name, value_expr, low, high, input)),
            other => Err(Error::InvalidRange {
                received: other.len(),
            }),
        },
        WhereValue::Predicate(predicate) => match predicate {
            Predicate::Eq(v)
            | Predicate::Lt(v)
            | Predicate::Lte(v)
            | Predicate::Gt(v)
            | Predicate::Gte(v) => {
                let op = predicate.comparator().native();
                input
                    .expression_attribute_values
                    .insert(value_expr.to_owned(), v.clone());
                Ok(format!("{name} {op} {value_expr}"))
            }
            Predicate::Between(low, high) => Ok(push_between(name, value_expr, low, high, input)),
            Predicate::BeginsWith(v) => {
                input
                    .expression_attribute_values
                    .insert(value_expr.to_owned(), v.clone());
                Ok(format!("begins_with({name}, {value_expr})"))
            }
            other => Err(Error::SortKeyOperator {
                operator: other.comparator().as_str(),
            }),
        },
    }
}

/// Renders one non-key condition into the filter clause.
fn compile_filter_attr(
    condition: &WhereValue,
    name: &str,
    value_expr: &str,
    input: &mut QueryInput,
) -> Result<String> {
    match condition {
        WhereValue::Scalar(value) => {
            input
                .expression_attribute_values
                .insert(value_expr.to_owned(), value.clone());
            Ok(format!("{name} = {value_expr}"))
        }
        WhereValue::List(values) => Ok(push_in_list(name, value_expr, values, input)),
        WhereValue::Predicate(predicate) => match predicate {
            Predicate::Eq(v)
            | Predicate::Neq(v)
            | Predicate::Lt(v)
            | Predicate::Lte(v)
            | Predicate::Gt(v)
            | Predicate::Gte(v) => {
                let op = predicate.comparator().native();
                debug_assert!(op.is_infix_comparison());
                input
                    .expression_attribute_values
                    .insert(value_expr.to_owned(), v.clone());
                Ok(format!("{name} {op} {value_expr}"))
            }
            Predicate::Between(low, high) => Ok(push_between(name, value_expr, low, high, input)),
            Predicate::Inq(values) => Ok(push_in_list(name, value_expr, values, input)),
            Predicate::Like(v) => {
                let op = NativeOperator::Contains;
                input
                    .expression_attribute_values
                    .insert(value_expr.to_owned(), v.clone());
                Ok(format!("{op}({name}, {value_expr})"))
            }
            other => Err(Error::FilterOperator {
                operator: other.comparator().as_str(),
            }),
        },
    }
}

/// `#NAME BETWEEN :name_start AND :name_end`, binding both bounds.
fn push_between(
    name: &str,
    value_expr: &str,
    low: &AttributeValue,
    high: &AttributeValue,
    input: &mut QueryInput,
) -> String {
    input
        .expression_attribute_values
        .insert(format!("{value_expr}_start"), low.clone());
    input
        .expression_attribute_values
        .insert(format!("{value_expr}_end"), high.clone());
    format!("{name} BETWEEN {value_expr}_start AND {value_expr}_end")
}

/// `#NAME IN (:name_0, ..., :name_n)` with one binding per element.
fn push_in_list(
    name: &str,
    value_expr: &str,
    values: &[AttributeValue],
    input: &mut QueryInput,
) -> String {
    let mut placeholders = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let placeholder = format!("{value_expr}_{i}");
        input
            .expression_attribute_values
            .insert(placeholder.clone(), value.clone());
        placeholders.push(placeholder);
    }
    format!("{name} IN ({})", placeholders.join(", "))
}

/// Projection = requested fields plus the index keys, deduplicated, so
/// downstream pagination logic can always rely on key presence.
fn build_projection(
    fields: &[String],
    partition_key_name: &str,
    sort_key_name: Option<&str>,
) -> String {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len() + 2);
    for field in fields
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(partition_key_name))
        .chain(sort_key_name)
    {
        if !seen.contains(&field) {
            seen.push(field);
        }
    }
    seen.join(",")
}
