use std::fmt::{Display, Error, Formatter};

use crate::date::Date;
use crate::errors::ParseError;
use crate::value::{Key, Scalar, Value};

/// The parser's top-level output: an ordered sequence of key/value pairs.
///
/// Insertion order is meaningful and keys are not unique; the format repeats
/// keys freely (`army=...` once per army) and every occurrence is retained.
/// Lookups therefore come in first, last and all flavors. Two documents are
/// equal only if their pair sequences match element for element, duplicates
/// and order included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    v: Vec<(Key, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Document { v: Vec::new() }
    }

    /// Number of stored pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    /// Add a pair at the end. A key that is already present is kept as well.
    pub fn append(&mut self, key: Key, value: Value) {
        self.v.push((key, value));
    }

    /// The value of the earliest pair with this key.
    pub fn get_first(&self, key: &Key) -> Option<&Value> {
        self.v.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    /// The value of the latest pair with this key. The backward scan covers
    /// the whole document, index 0 included.
    pub fn get_last(&self, key: &Key) -> Option<&Value> {
        self.v.iter().rev().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    /// Every value stored under this key, in insertion order.
    pub fn get_all(&self, key: &Key) -> Vec<&Value> {
        self.v.iter().filter(|(k, _)| k == key).map(|(_, value)| value).collect()
    }

    /// Remove and return the last pair.
    pub fn pop_back(&mut self) -> Result<(Key, Value), ParseError> {
        self.v.pop().ok_or(ParseError::EmptyDocument)
    }

    pub fn get(&self, index: usize) -> Result<(&Key, &Value), ParseError> {
        match self.v.get(index) {
            Some((key, value)) => Ok((key, value)),
            None => Err(ParseError::IndexOutOfRange { index, len: self.v.len() }),
        }
    }

    /// Replace the pair at `index`.
    pub fn set(&mut self, index: usize, key: Key, value: Value) -> Result<(), ParseError> {
        if index < self.v.len() {
            self.v[index] = (key, value);
            Ok(())
        } else {
            Err(ParseError::IndexOutOfRange { index, len: self.v.len() })
        }
    }

    pub fn iter(&self) -> std::slice::Iter<(Key, Value)> {
        self.v.iter()
    }

    /// Get the latest value whose key is the plain word `name`. Keys that
    /// classified as integers or dates do not match; use
    /// [`get_last`](Self::get_last) with a typed key for those.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.v
            .iter()
            .rev()
            .find(|(k, _)| matches!(k, Scalar::String(s) if s == name))
            .map(|(_, value)| value)
    }

    /// The unquoted string of a `name="text"` assignment.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get_field(name).and_then(Value::unquoted)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get_field(name).and_then(Value::get_integer)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get_field(name).and_then(Value::get_float)
    }

    pub fn get_date(&self, name: &str) -> Option<Date> {
        self.get_field(name).and_then(Value::get_date)
    }

    /// The items of a `name={ value ... }` assignment.
    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get_field(name).and_then(Value::get_list)
    }

    /// The document of a `name={ key=value ... }` assignment.
    pub fn get_dict(&self, name: &str) -> Option<&Document> {
        self.get_field(name).and_then(Value::get_dict)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{{")?;
        for (i, (key, value)) in self.v.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
