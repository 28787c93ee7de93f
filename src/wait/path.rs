// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Relaxed JSONPath selectors.
//!
//! Supported forms, all equivalent ways of reaching the same field:
//! `status.phase`, `.status.phase`, `$.status.phase`, `{.status.phase}`,
//! `status['phase']`. Indices use brackets: `status.conditions[0].type`.
//! Wildcards, filters, slices and recursive descent are rejected.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use crate::error::{Result, WaiterError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    source: String,
    segments: Vec<Segment>,
}

impl PathExpression {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| WaiterError::InvalidPath(format!("'{}': {}", input, reason));

        let mut body = input.trim();
        if let Some(inner) = body.strip_prefix('{') {
            body = inner
                .strip_suffix('}')
                .ok_or_else(|| invalid("unbalanced '{'"))?
                .trim();
        }
        body = body.strip_prefix('$').unwrap_or(body);
        body = body.strip_prefix('.').unwrap_or(body);

        if body.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        let mut key = String::new();
        // Set after a ']' so that "a[0].b" is accepted and "a..b" is not.
        let mut after_bracket = false;
        let mut chars = body.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if key.is_empty() && !after_bracket {
                        return Err(invalid("empty segment (recursive descent is not supported)"));
                    }
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    match chars.peek() {
                        None => return Err(invalid("trailing '.'")),
                        Some('[') => return Err(invalid("'.' directly before '['")),
                        Some(_) => {}
                    }
                    after_bracket = false;
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    segments.push(parse_bracket(&mut chars).map_err(|reason| invalid(&reason))?);
                    after_bracket = true;
                }
                '*' => return Err(invalid("wildcards are not supported")),
                '{' | '}' => return Err(invalid("unbalanced braces")),
                ']' => return Err(invalid("unbalanced ']'")),
                _ => {
                    if after_bracket {
                        return Err(invalid("expected '.' or '[' after ']'"));
                    }
                    key.push(c);
                }
            }
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }

        Ok(Self {
            source: input.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk the document. `None` means the path does not exist (yet).
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| match segment {
                Segment::Key(key) => current.as_object()?.get(key),
                Segment::Index(index) => current.as_array()?.get(*index),
            })
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for PathExpression {
    type Err = WaiterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse the contents of `[...]`; the opening bracket is already consumed.
fn parse_bracket(chars: &mut Peekable<Chars<'_>>) -> std::result::Result<Segment, String> {
    match chars.peek().copied() {
        Some(quote @ ('\'' | '"')) => {
            chars.next();
            let mut key = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == quote => break,
                    Some(c) => key.push(c),
                    None => return Err("unterminated quoted key".to_string()),
                }
            }
            if chars.next() != Some(']') {
                return Err("expected ']' after quoted key".to_string());
            }
            Ok(Segment::Key(key))
        }
        _ => {
            let mut content = String::new();
            loop {
                match chars.next() {
                    Some(']') => break,
                    Some(c) => content.push(c),
                    None => return Err("unterminated '['".to_string()),
                }
            }
            let content = content.trim();
            if content == "*" {
                return Err("wildcards are not supported".to_string());
            }
            if content.contains(':') || content.starts_with('?') {
                return Err(format!("unsupported selector '[{}]'", content));
            }
            content
                .parse::<usize>()
                .map(Segment::Index)
                .map_err(|_| format!("'{}' is not an array index", content))
        }
    }
}
