//! Loaders for the fixed map-definition files: `definition.csv`,
//! `default.map` and `climate.txt`.
//!
//! These are the only parsers in the crate that understand `#` comments. The
//! generic script parser never sees comments because the game strips them
//! from save output, but the hand-edited map files carry them freely.

use std::fs::read;
use std::path::Path;

use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use encoding_rs::WINDOWS_1252;

pub type ProvId = u32;

/// A `red;green;blue` color from `definition.csv`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One data row of `definition.csv`: `province;red;green;blue;name;x`.
#[derive(Clone, Debug)]
pub struct ProvinceDef {
    pub id: ProvId,
    pub color: Rgb,
    pub name: String,
}

/// Iterate the data rows of a `definition.csv`, skipping the header line and
/// `#` comments. Malformed rows are skipped; the shipped files carry a few
/// placeholder lines and the map tools tolerate them.
pub fn parse_definitions(content: &str) -> impl Iterator<Item = ProvinceDef> + '_ {
    content.lines().skip(1).filter_map(|line| {
        let line = match line.split_once('#') {
            Some((data, _)) => data,
            None => line,
        };
        parse_definition_row(line.trim())
    })
}

fn parse_definition_row(line: &str) -> Option<ProvinceDef> {
    let mut fields = line.split(';');
    let id = fields.next()?.trim().parse().ok()?;
    let red = fields.next()?.trim().parse().ok()?;
    let green = fields.next()?.trim().parse().ok()?;
    let blue = fields.next()?.trim().parse().ok()?;
    let name = fields.next().unwrap_or("").trim().to_string();
    Some(ProvinceDef { id, color: Rgb(red, green, blue), name })
}

/// The id-to-color table the map renderer matches province bitmap pixels
/// against.
pub fn province_colors(content: &str) -> AHashMap<ProvId, Rgb> {
    parse_definitions(content).map(|def| (def.id, def.color)).collect()
}

#[derive(Copy, Clone, Debug)]
enum ScanState {
    /// Accumulating a key up to `=`.
    Key,
    /// After `=`, waiting for `{` before end of line.
    SeekBrace,
    /// Inside the braces, accumulating whitespace-separated integers.
    Items,
}

/// Collect the integers of every `key = { ... }` group whose key is in
/// `keys`, the way `default.map` and `climate.txt` are queried for province
/// id lists.
///
/// `#` comments run to end of line and may appear anywhere, including between
/// the braces. A group must open on the same line as its `=`; a plain
/// `key = value` line is skipped. Items that do not parse as integers are
/// skipped rather than failing the whole file.
pub fn keyed_int_lists(content: &str, keys: &[&str]) -> Vec<ProvId> {
    let mut out = Vec::new();
    let mut state = ScanState::Key;
    let mut key = String::new();
    let mut current = String::new();
    let mut wanted = false;
    let mut comment = false;
    for c in content.chars() {
        if comment {
            if c != '\n' {
                continue;
            }
            comment = false;
        } else if c == '#' {
            comment = true;
            continue;
        }
        match state {
            ScanState::Key => {
                if c == '=' {
                    wanted = keys.contains(&key.trim());
                    state = ScanState::SeekBrace;
                } else if c == '\n' {
                    key.clear();
                } else {
                    key.push(c);
                }
            }
            ScanState::SeekBrace => {
                if c == '{' {
                    current.clear();
                    state = ScanState::Items;
                } else if c == '\n' {
                    key.clear();
                    state = ScanState::Key;
                }
            }
            ScanState::Items => {
                if c == '}' || c.is_whitespace() {
                    if wanted && !current.is_empty() {
                        if let Ok(id) = current.parse() {
                            out.push(id);
                        }
                    }
                    current.clear();
                    if c == '}' {
                        key.clear();
                        state = ScanState::Key;
                    }
                } else {
                    current.push(c);
                }
            }
        }
    }
    out
}

/// Province ids listed under `sea_starts` and `lakes` in a `default.map`,
/// sorted.
pub fn water_provinces(content: &str) -> Vec<ProvId> {
    let mut provs = keyed_int_lists(content, &["sea_starts", "lakes"]);
    provs.sort_unstable();
    provs
}

/// Province ids listed under `impassable` in a `climate.txt`, sorted.
pub fn wasteland_provinces(content: &str) -> Vec<ProvId> {
    let mut provs = keyed_int_lists(content, &["impassable"]);
    provs.sort_unstable();
    provs
}

/// Read one of the fixed map files. The game ships them in WINDOWS-1252.
pub fn read_map_file(fullpath: &Path) -> Result<String> {
    let bytes =
        read(fullpath).with_context(|| format!("could not read `{}`", fullpath.display()))?;
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        bail!("`{}` is not valid WINDOWS-1252", fullpath.display());
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    static DEFINITION: &str = "\
province;red;green;blue;x;x
1;128;34;64;Stockholm;x
2;0;36;128;Östergötland;x
# a comment line
3;128;38;192;Kalmar;x
;;;;;
";

    #[test]
    fn test_parse_definitions() {
        let defs: Vec<ProvinceDef> = parse_definitions(DEFINITION).collect();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].id, 1);
        assert_eq!(defs[0].color, Rgb(128, 34, 64));
        assert_eq!(defs[0].name, "Stockholm");
        assert_eq!(defs[2].id, 3);
        assert_eq!(defs[2].name, "Kalmar");
    }

    #[test]
    fn test_province_colors() {
        let colors = province_colors(DEFINITION);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors.get(&2), Some(&Rgb(0, 36, 128)));
        assert_eq!(colors.get(&99), None);
    }

    static DEFAULT_MAP: &str = "\
width = 5632
height = 2048
max_provinces = 5
sea_starts = {
\t1 2 3 # inline comment
\t4
}
# lakes follow
lakes = { 10 9 }
only_used_for_random = { }
";

    #[test]
    fn test_water_provinces() {
        assert_eq!(water_provinces(DEFAULT_MAP), vec![1, 2, 3, 4, 9, 10]);
    }

    #[test]
    fn test_keyed_int_lists_ignores_other_keys() {
        assert_eq!(keyed_int_lists(DEFAULT_MAP, &["lakes"]), vec![10, 9]);
        assert!(keyed_int_lists(DEFAULT_MAP, &["nothing"]).is_empty());
        // `width = 5632` is a scalar assignment, not a list.
        assert!(keyed_int_lists(DEFAULT_MAP, &["width"]).is_empty());
    }

    #[test]
    fn test_wasteland_provinces() {
        let climate = "tropical = { 1 2 }\nimpassable = {\n\t7 5\n\t6\n}\n";
        assert_eq!(wasteland_provinces(climate), vec![5, 6, 7]);
    }

    #[test]
    fn test_comment_before_open_brace() {
        // The `{` is commented out, so the list never opens.
        let content = "impassable = # { 1 2 }\nimpassable = { 3 }\n";
        assert_eq!(keyed_int_lists(content, &["impassable"]), vec![3]);
    }
}
