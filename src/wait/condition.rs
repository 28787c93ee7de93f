// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Conditions evaluated against a fetched object snapshot.

use std::fmt;

use serde_json::Value;

use crate::error::Result;
use crate::wait::path::PathExpression;

/// "Wait until `path` exists", or "until `path` equals `expected_value`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionExpression {
    pub path: PathExpression,
    pub expected_value: Option<String>,
}

impl ConditionExpression {
    pub fn new(jsonpath: &str, expected_value: Option<String>) -> Result<Self> {
        Ok(Self {
            path: PathExpression::parse(jsonpath)?,
            expected_value,
        })
    }

    /// Parse `PATH` or `PATH=VALUE`. The split happens on the first `=`
    /// outside brackets, so quoted keys may contain `=`.
    pub fn parse(input: &str) -> Result<Self> {
        match split_assignment(input) {
            Some((path, value)) => Self::new(path, Some(value.to_string())),
            None => Self::new(input, None),
        }
    }

    pub fn is_satisfied_by(&self, document: &Value) -> bool {
        let Some(value) = self.path.resolve(document) else {
            return false;
        };
        match &self.expected_value {
            Some(expected) => stringify(value) == *expected,
            None => !is_empty(value),
        }
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected_value {
            Some(value) => write!(f, "{}={}", self.path, value),
            None => write!(f, "{}", self.path),
        }
    }
}

impl std::str::FromStr for ConditionExpression {
    type Err = crate::error::WaiterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// True when every condition holds against this one snapshot.
pub fn all_satisfied(conditions: &[ConditionExpression], document: &Value) -> bool {
    conditions.iter().all(|c| c.is_satisfied_by(document))
}

/// Strings verbatim, scalars by their JSON text, containers as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if depth > 0 => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '=') if depth == 0 => return Some((&input[..i], &input[i + 1..])),
            _ => {}
        }
    }
    None
}
