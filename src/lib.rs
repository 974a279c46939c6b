//! Parser for the Clausewitz-style script format used by Europa
//! Universalis IV save and definition files.
//!
//! The format is brace-delimited and whitespace-separated. Scalars carry no
//! declared type; a token is recognized as a string, integer, float or
//! calendar date purely by its lexical shape, and a brace group is a list or
//! a dictionary depending on the shape of its first element. Parsing yields
//! an order-preserving, duplicate-key-tolerant [`Document`].

mod date;
mod document;
mod errors;
pub mod parse;
mod savefile;
mod value;

pub use crate::date::{Date, EU4_END, EU4_START};
pub use crate::document::Document;
pub use crate::errors::ParseError;
pub use crate::parse::script::{parse_text, parse_value, split_items, MAX_DEPTH};
pub use crate::savefile::{normalize_save, parse_save, read_save};
pub use crate::value::{Key, Scalar, Value};
