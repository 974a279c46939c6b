//! Parsers for the script format and the fixed map-definition files.

pub mod mapdef;
pub mod script;
