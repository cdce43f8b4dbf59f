//! Rendering of `export NAME="VALUE"` lines.

use std::fmt;

/// A single shell assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub name: String,
    pub value: String,
}

impl ExportLine {
    /// `export name="value"`. The value is emitted as stored, without escaping.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export {}=\"{}\"", self.name, self.value)
    }
}

/// Join rendered lines with `\n`. No trailing newline; empty input gives `""`.
#[must_use]
pub fn serialize(lines: &[ExportLine]) -> String {
    lines
        .iter()
        .map(ExportLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, value: &str) -> ExportLine {
        ExportLine {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            line("no_proxy", ".corp,localhost").render(),
            "export no_proxy=\".corp,localhost\""
        );
    }

    #[test]
    fn test_serialize_joins_without_trailing_newline() {
        let text = serialize(&[line("a", "1"), line("B", "2")]);
        assert_eq!(text, "export a=\"1\"\nexport B=\"2\"");
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&[]), "");
    }
}
