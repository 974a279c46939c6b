use thiserror::Error;

/// Errors from parsing script text or manipulating a document.
///
/// Parse-time errors abort the smallest enclosing value and propagate to the
/// caller of the top-level parse; a failed parse never yields a partial
/// document. Malformed input is a permanent condition, so there is nothing to
/// retry.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("malformed date `{0}`")]
    MalformedDate(String),
    #[error("number `{0}` is out of range")]
    NumericOverflow(String),
    #[error("cannot pop from an empty document")]
    EmptyDocument,
    #[error("index {index} is out of range for a document of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("`{{` group is never closed: `{0}`")]
    UnbalancedGroup(String),
    #[error("expected `key=value` in dictionary group, found `{0}`")]
    MissingEquals(String),
    #[error("groups nested deeper than {0} levels")]
    NestingTooDeep(usize),
}
