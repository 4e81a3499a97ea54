//! Translate-table file format (§6): 8-bit byte-to-byte or Unicode
//! code-point-to-code-point remapping, loaded from a small text format.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Input,
    Output,
}

/// A parsed translate table. `input` remaps bytes/code points arriving
/// from the host before display; `output` remaps key-encoder output
/// before it reaches the transport. Identity mappings are implicit:
/// a code absent from the map translates to itself.
#[derive(Debug, Clone, Default)]
pub struct TranslateTable {
    input: BTreeMap<u32, u32>,
    output: BTreeMap<u32, u32>,
}

impl TranslateTable {
    #[must_use]
    pub fn translate_input(&self, code: u32) -> u32 {
        self.input.get(&code).copied().unwrap_or(code)
    }

    #[must_use]
    pub fn translate_output(&self, code: u32) -> u32 {
        self.output.get(&code).copied().unwrap_or(code)
    }

    /// Parses the `[input]`/`[output]` text format. Invalid lines are
    /// skipped rather than rejected, per the spec; the table built from
    /// only the well-formed lines is always returned.
    #[must_use]
    pub fn parse(text: &str) -> TranslateTable {
        let mut table = TranslateTable::default();
        let mut section = None;
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                section = match name.trim() {
                    "input" => Some(Section::Input),
                    "output" => Some(Section::Output),
                    _ => None,
                };
                continue;
            }
            let Some(section) = section else { continue };
            let Some((key_str, value_str)) = line.split_once('=') else {
                continue;
            };
            let (Some(key), Some(value)) =
                (parse_code(key_str.trim()), parse_code(value_str.trim()))
            else {
                continue;
            };
            let map = match section {
                Section::Input => &mut table.input,
                Section::Output => &mut table.output,
            };
            map.insert(key, value);
        }
        table
    }
}

fn parse_code(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("\\u") {
        return u32::from_str_radix(hex, 16).ok();
    }
    s.parse::<u32>().ok().filter(|&v| v <= 0x10FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_8bit_input_section() {
        let t = TranslateTable::parse(
            "# EBCDIC-ish override\n[input]\n193 = 65\n194 = 66\n",
        );
        assert_eq!(t.translate_input(193), 65);
        assert_eq!(t.translate_input(194), 66);
        assert_eq!(t.translate_input(195), 195);
    }

    #[test]
    fn parses_unicode_output_section() {
        let t = TranslateTable::parse("[output]\n\\u00e9 = \\u0065\n");
        assert_eq!(t.translate_output(0x00e9), 0x0065);
    }

    #[test]
    fn invalid_lines_are_skipped_not_fatal() {
        let t = TranslateTable::parse("[input]\nnot a mapping\n65 = 66\n");
        assert_eq!(t.translate_input(65), 66);
    }

    #[test]
    fn identity_mapping_is_default_for_absent_keys() {
        let t = TranslateTable::default();
        assert_eq!(t.translate_input(42), 42);
    }
}
