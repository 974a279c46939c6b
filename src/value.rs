use std::fmt::{Display, Error, Formatter};

use crate::date::Date;
use crate::document::Document;
use crate::errors::ParseError;

/// A typed scalar token. Which variant a token becomes is decided purely by
/// its lexical shape; the format declares no schema.
///
/// Keys are scalars too: the left-hand side of `=` is classified with the
/// same rules as a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Date(Date),
}

/// The left-hand side of a `key=value` pair.
pub type Key = Scalar;

impl Scalar {
    /// Classify a trimmed token by lexical shape alone.
    ///
    /// A token of digits and dots becomes `Integer`, `Float` or `Date`
    /// depending on how many dots it has; anything else is kept verbatim as
    /// `String`, surrounding quotes included. A leading `-` therefore makes a
    /// negative number a `String`; that quirk is part of the format and its
    /// consumers rely on it.
    pub fn classify(text: &str) -> Result<Self, ParseError> {
        let mut dots = 0;
        for c in text.chars() {
            if c == '.' {
                dots += 1;
                if dots > 2 {
                    return Ok(Scalar::String(text.to_string()));
                }
            } else if !c.is_ascii_digit() {
                return Ok(Scalar::String(text.to_string()));
            }
        }
        match dots {
            // The empty token has no digits to convert.
            0 if text.is_empty() => Ok(Scalar::String(String::new())),
            0 => text
                .parse::<i64>()
                .map(Scalar::Integer)
                .map_err(|_| ParseError::NumericOverflow(text.to_string())),
            1 => text
                .parse::<f64>()
                .map(Scalar::Float)
                .map_err(|_| ParseError::NumericOverflow(text.to_string())),
            _ => text.parse::<Date>().map(Scalar::Date),
        }
    }

    pub fn get_string(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// The string contents with any surrounding quotes removed; how
    /// consumers read quoted tokens like `"SWE"`.
    pub fn unquoted(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s.trim_matches('"')),
            _ => None,
        }
    }

    pub fn get_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn get_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn get_date(&self) -> Option<Date> {
        match self {
            Scalar::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Date(date) => write!(f, "{date}"),
        }
    }
}

/// One parsed value: a scalar leaf or a composite group.
///
/// Composites own their contents outright; the format has no back-references,
/// so a value is always a tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Dict(Document),
}

impl Value {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    pub fn get_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn get_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn get_dict(&self) -> Option<&Document> {
        match self {
            Value::Dict(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_dict(self) -> Option<Document> {
        match self {
            Value::Dict(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn get_integer(&self) -> Option<i64> {
        self.get_scalar().and_then(Scalar::get_integer)
    }

    pub fn get_float(&self) -> Option<f64> {
        self.get_scalar().and_then(Scalar::get_float)
    }

    pub fn get_date(&self) -> Option<Date> {
        self.get_scalar().and_then(Scalar::get_date)
    }

    pub fn unquoted(&self) -> Option<&str> {
        self.get_scalar().and_then(Scalar::unquoted)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Value::Scalar(scalar) => write!(f, "{scalar}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Dict(doc) => write!(f, "{doc}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integer() {
        assert_eq!(Scalar::classify("123"), Ok(Scalar::Integer(123)));
        assert_eq!(Scalar::classify("0"), Ok(Scalar::Integer(0)));
        assert_eq!(Scalar::classify("007"), Ok(Scalar::Integer(7)));
    }

    #[test]
    fn test_classify_float() {
        assert_eq!(Scalar::classify("1.5"), Ok(Scalar::Float(1.5)));
        assert_eq!(Scalar::classify("13.000"), Ok(Scalar::Float(13.0)));
    }

    #[test]
    fn test_classify_date() {
        assert_eq!(Scalar::classify("1444.11.11"), Ok(Scalar::Date(Date::new(1444, 11, 11))));
        assert_eq!(Scalar::classify("1.1.1"), Ok(Scalar::Date(Date::new(1, 1, 1))));
    }

    #[test]
    fn test_classify_string() {
        assert_eq!(Scalar::classify("abc"), Ok(Scalar::String("abc".to_string())));
        assert_eq!(Scalar::classify("SWE"), Ok(Scalar::String("SWE".to_string())));
        assert_eq!(Scalar::classify("1.2.3.4"), Ok(Scalar::String("1.2.3.4".to_string())));
        assert_eq!(Scalar::classify(""), Ok(Scalar::String(String::new())));
        // Quotes are kept verbatim; stripping them is the consumer's call.
        assert_eq!(Scalar::classify("\"a b\""), Ok(Scalar::String("\"a b\"".to_string())));
    }

    #[test]
    fn test_classify_negative_is_string() {
        // The format's own quirk: `-` fails the digits-and-dots scan, so
        // negative numbers come through as strings.
        assert_eq!(Scalar::classify("-5"), Ok(Scalar::String("-5".to_string())));
        assert_eq!(Scalar::classify("-1.5"), Ok(Scalar::String("-1.5".to_string())));
    }

    #[test]
    fn test_classify_overflow() {
        let big = "99999999999999999999999999";
        assert_eq!(Scalar::classify(big), Err(ParseError::NumericOverflow(big.to_string())));
    }

    #[test]
    fn test_classify_lone_dot() {
        // Passes the lexical scan as a float but has no digits to convert.
        assert_eq!(Scalar::classify("."), Err(ParseError::NumericOverflow(".".to_string())));
    }

    #[test]
    fn test_classify_bad_date_part() {
        assert_eq!(
            Scalar::classify("1444..11"),
            Err(ParseError::MalformedDate("1444..11".to_string()))
        );
        assert_eq!(
            Scalar::classify("99999.1.1"),
            Err(ParseError::MalformedDate("99999.1.1".to_string()))
        );
    }

    #[test]
    fn test_unquoted() {
        assert_eq!(Scalar::String("\"SWE\"".to_string()).unquoted(), Some("SWE"));
        assert_eq!(Scalar::String("bare".to_string()).unquoted(), Some("bare"));
        assert_eq!(Scalar::Integer(3).unquoted(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Integer(42).to_string(), "42");
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Date(Date::new(1444, 11, 11)).to_string(), "1444.11.11");
        let list = Value::List(vec![
            Value::Scalar(Scalar::Integer(1)),
            Value::Scalar(Scalar::Integer(2)),
        ]);
        assert_eq!(list.to_string(), "[1, 2]");
    }
}
