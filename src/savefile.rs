//! Loading a full save file into its top-level [`Document`].

use std::fs::read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use encoding_rs::WINDOWS_1252;

use crate::document::Document;
use crate::parse::script::parse_text;
use crate::value::Value;

/// Magic header on the first line of a text save.
const SAVE_HEADER: &str = "EU4txt";

/// Strip the save header and repair the one known misprint in game output:
/// `map_area_data{` is written without its `=`.
pub fn normalize_save(text: &str) -> String {
    text.replacen(SAVE_HEADER, "", 1).replace("map_area_data{", "map_area_data={")
}

/// Parse the full text of a save file into its top-level [`Document`].
pub fn parse_save(text: &str) -> Result<Document> {
    match parse_text(&normalize_save(text))? {
        Value::Dict(doc) => Ok(doc),
        Value::List(items) if items.is_empty() => Ok(Document::new()),
        Value::List(_) | Value::Scalar(_) => {
            bail!("save file has no top-level `key=value` structure")
        }
    }
}

/// Read and parse a save file from disk. Text saves are WINDOWS-1252.
pub fn read_save(fullpath: &Path) -> Result<Document> {
    let bytes = read(fullpath)
        .with_context(|| format!("could not read save file `{}`", fullpath.display()))?;
    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    parse_save(&text)
        .with_context(|| format!("could not parse save file `{}`", fullpath.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_save() {
        assert_eq!(normalize_save("EU4txt\ndate=1444.11.11"), "\ndate=1444.11.11");
        assert_eq!(normalize_save("map_area_data{"), "map_area_data={");
        assert_eq!(normalize_save("a=1"), "a=1");
    }

    #[test]
    fn test_parse_save() {
        let doc = parse_save("EU4txt\ndate=1444.11.11\nplayer=\"SWE\"\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get_string("player"), Some("SWE"));
    }

    #[test]
    fn test_parse_save_empty() {
        let doc = parse_save("EU4txt\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_save_rejects_bare_list() {
        assert!(parse_save("1 2 3").is_err());
    }
}
