//! Boolean query compiler.
//!
//! Compiles a [`FilterExpression`] into one flat structured-query string in a
//! single left-to-right reduction: operator entries recurse and wrap their
//! non-empty sub-result in `(<op>...)`, field entries delegate to the
//! statement builder. Fragments concatenate by plain string push because
//! every leaf rendering carries its own leading space.

use crate::error::{Error, Result};

use super::filter::{is_operator, FieldConstraint, FilterEntry, FilterExpression};
use super::statement::build_statement;

/// Recursion guard for untrusted input.
const MAX_DEPTH: usize = 64;

/// Compiles a filter expression into the structured-query grammar.
///
/// The result may carry a leading space; only the top-level request builder
/// trims it.
pub fn compile(expression: &FilterExpression) -> Result<String> {
    reduce(&merge_root_not(expression)?, 0)
}

/// A bare root-level negation is always implicitly conjoined: every `not`
/// entry at the top level moves inside the root `and` sub-expression,
/// which is created if absent. Applied once, never during recursion.
fn merge_root_not(expression: &FilterExpression) -> Result<FilterExpression> {
    if !expression.entries.iter().any(|(key, _)| key == "not") {
        return Ok(expression.clone());
    }

    let mut merged = FilterExpression::new();
    let mut pulled = Vec::new();
    let mut and_index = None;

    for (key, entry) in &expression.entries {
        if key == "not" {
            pulled.push(entry.clone());
            continue;
        }
        if key == "and" && and_index.is_none() {
            and_index = Some(merged.entries.len());
        }
        merged.entries.push((key.clone(), entry.clone()));
    }

    let target = match and_index {
        Some(index) => index,
        None => {
            merged
                .entries
                .push(("and".to_string(), FilterEntry::Expr(FilterExpression::new())));
            merged.entries.len() - 1
        }
    };

    match &mut merged.entries[target].1 {
        FilterEntry::Expr(sub) => {
            for entry in pulled {
                sub.entries.push(("not".to_string(), entry));
            }
        }
        FilterEntry::Constraint(_) => {
            return Err(Error::InvalidFilterExpression(
                "operator 'and' must map to a nested filter expression".to_string(),
            ));
        }
    }

    Ok(merged)
}

fn reduce(expression: &FilterExpression, depth: usize) -> Result<String> {
    if depth > MAX_DEPTH {
        return Err(Error::InvalidFilterExpression(format!(
            "filter expression nesting exceeds {MAX_DEPTH} levels"
        )));
    }

    let mut memo = String::new();
    for (key, entry) in &expression.entries {
        match entry {
            FilterEntry::Expr(sub) => {
                if !is_operator(key) {
                    return Err(Error::InvalidFilterExpression(format!(
                        "'{key}' is not a boolean operator and cannot hold a nested expression"
                    )));
                }
                let sub_query = reduce(sub, depth + 1)?;
                // An empty sub-expression contributes nothing; wrapping it
                // would emit a malformed `()` fragment.
                if !sub_query.is_empty() {
                    memo.push('(');
                    memo.push_str(key);
                    memo.push_str(&sub_query);
                    memo.push(')');
                }
            }
            FilterEntry::Constraint(constraint) => {
                if is_operator(key) {
                    return Err(Error::InvalidFilterExpression(format!(
                        "operator '{key}' must map to a nested filter expression"
                    )));
                }
                match constraint {
                    FieldConstraint::AnyOf(values) => {
                        // The grammar requires at least one term inside a
                        // group, so an empty collection contributes nothing.
                        if values.is_empty() {
                            continue;
                        }
                        memo.push_str(" (or ");
                        memo.push_str(&build_statement(key, constraint));
                        memo.push(')');
                    }
                    _ => {
                        memo.push(' ');
                        memo.push_str(&build_statement(key, constraint));
                    }
                }
            }
        }
    }

    Ok(memo)
}
