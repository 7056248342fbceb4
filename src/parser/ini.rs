//! Minimal INI reader for LinuxCNC machine configuration files.

use indexmap::IndexMap;

/// Parse a `key=value` (or `key: value`) pair from a line.
pub fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let sep = line.find(['=', ':'])?;
    let key = line[..sep].trim();
    if key.is_empty() {
        return None;
    }
    let value = line[sep + 1..].trim();
    Some((key, value))
}

/// Sections of an INI file.
///
/// Section names are case-sensitive, keys are lowercased. Values are trimmed
/// and otherwise kept verbatim; a `;` inside a value is not a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl IniDocument {
    /// Parse INI text. Lines outside any section and lines that are not
    /// `key=value` pairs are ignored. Repeated sections are merged, later
    /// keys win.
    pub fn parse(content: &str) -> Self {
        let mut sections: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = current.as_ref() else {
                continue;
            };

            if let Some((key, value)) = parse_key_value(trimmed) {
                sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.to_lowercase(), value.to_string());
            }
        }

        Self { sections }
    }

    /// All keys of a section.
    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    /// Look up a key (case-insensitive) in a section.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("URL = http://x"), Some(("URL", "http://x")));
        assert_eq!(parse_key_value("KEY: value"), Some(("KEY", "value")));
        assert_eq!(parse_key_value("TOKEN=a=b;c"), Some(("TOKEN", "a=b;c")));
        assert_eq!(parse_key_value("no separator"), None);
        assert_eq!(parse_key_value("=value"), None);
    }

    #[test]
    fn test_parse_sections() {
        let ini = "\
# LinuxCNC config
[EMC]
MACHINE = sim

[EMCIO]
; tool table lives next to the INI
TOOL_TABLE = sim.tbl

[SMOOTH]
URL=https://api.loobric.com
";
        let doc = IniDocument::parse(ini);
        assert_eq!(doc.get("EMC", "machine"), Some("sim"));
        assert_eq!(doc.get("EMCIO", "tool_table"), Some("sim.tbl"));
        assert_eq!(doc.get("SMOOTH", "URL"), Some("https://api.loobric.com"));
        assert_eq!(doc.get("smooth", "URL"), None);
    }

    #[test]
    fn test_empty_section_exists() {
        let doc = IniDocument::parse("[SMOOTH]\n");
        assert!(doc.section("SMOOTH").unwrap().is_empty());
    }

    #[test]
    fn test_keys_before_section_ignored() {
        let doc = IniDocument::parse("KEY=1\n[A]\nKEY=2\n[A]\nOTHER=3\n");
        assert_eq!(doc.get("A", "key"), Some("2"));
        assert_eq!(doc.get("A", "other"), Some("3"));
        assert_eq!(doc.section("A").unwrap().len(), 2);
    }
}
