//! Tokenizer and recursive descent parser for the brace script format.
//!
//! Whitespace is the only delimiter at the top level of a group, but
//! whitespace also occurs freely inside nested groups and quoted strings, so
//! the splitter tracks brace depth and a quote flag while scanning. Each item
//! is then either a `key=value` pair or a plain value, and group values
//! recurse through the same machinery.

use crate::document::Document;
use crate::errors::ParseError;
use crate::value::{Scalar, Value};

/// Groups nested deeper than this fail with [`ParseError::NestingTooDeep`]
/// instead of running the native stack out on adversarial input.
pub const MAX_DEPTH: usize = 64;

/// Split the interior of a brace group into its top-level items.
///
/// Splits on whitespace only at brace depth zero and outside double quotes;
/// nested groups and quoted spans are never split. Items come back trimmed
/// and non-empty. A stray `}` cannot push the depth below zero.
pub fn split_items(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut last_split = 0;
    for (i, c) in text.char_indices() {
        if depth == 0 && !quoted && c.is_whitespace() {
            let item = text[last_split..i].trim();
            if !item.is_empty() {
                items.push(item);
            }
            last_split = i;
        } else if c == '{' && !quoted {
            depth += 1;
        } else if c == '}' && !quoted {
            depth = depth.saturating_sub(1);
        } else if c == '"' {
            quoted = !quoted;
        }
    }
    let item = text[last_split..].trim();
    if !item.is_empty() {
        items.push(item);
    }
    items
}

/// Parse one item's text into a [`Value`].
///
/// Brace-delimited text becomes a [`Value::List`] or [`Value::Dict`];
/// anything else is classified as a scalar.
pub fn parse_value(text: &str) -> Result<Value, ParseError> {
    parse_value_at(text, 0)
}

/// Parse top-level script text as if it were the interior of an implicit
/// outer `{ }` group. The result is a list or a dictionary by the same
/// first-item rule as any nested group.
pub fn parse_text(text: &str) -> Result<Value, ParseError> {
    parse_group(&split_items(text), 0)
}

fn parse_value_at(text: &str, depth: usize) -> Result<Value, ParseError> {
    let text = text.trim();
    if let Some(open) = text.strip_prefix('{') {
        let Some(interior) = open.strip_suffix('}') else {
            return Err(ParseError::UnbalancedGroup(snippet(text)));
        };
        if depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep(MAX_DEPTH));
        }
        parse_group(&split_items(interior), depth + 1)
    } else {
        Ok(Value::Scalar(Scalar::classify(text)?))
    }
}

/// A group is a dictionary or a list depending on the shape of its first
/// item alone: `=` seen before any `{` means dictionary, anything else means
/// list. Groups are assumed homogeneous; the format never mixes the two kinds
/// in one group and mixed groups are not detected here.
fn is_dict_item(item: &str) -> bool {
    for c in item.chars() {
        match c {
            '=' => return true,
            '{' => return false,
            _ => (),
        }
    }
    false
}

fn parse_group(items: &[&str], depth: usize) -> Result<Value, ParseError> {
    if items.is_empty() {
        return Ok(Value::List(Vec::new()));
    }
    if is_dict_item(items[0]) {
        let mut doc = Document::new();
        for item in items {
            let (key, value) = item
                .split_once('=')
                .ok_or_else(|| ParseError::MissingEquals((*item).to_string()))?;
            doc.append(Scalar::classify(key)?, parse_value_at(value, depth)?);
        }
        Ok(Value::Dict(doc))
    } else {
        let mut list = Vec::with_capacity(items.len());
        for item in items {
            list.push(parse_value_at(item, depth)?);
        }
        Ok(Value::List(list))
    }
}

// Unterminated groups can run to the end of the input; keep the error small.
fn snippet(text: &str) -> String {
    if text.chars().count() > 40 {
        let head: String = text.chars().take(40).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
