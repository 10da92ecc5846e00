//! Line classification against the slicer's comment and command conventions

use regex::Regex;
use std::sync::OnceLock;

/// What a single G-code line is, as far as the rewriter cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `T<n>` tool change; carries the digits
    ToolChange(&'a str),
    /// `;TYPE:<name>` feature annotation; carries the raw name
    Feature(&'a str),
    /// `M104 S<t>` set hotend temperature; carries the digits
    Temperature(&'a str),
    /// `; filament_diameter = <d>`; carries the value text
    FilamentDiameter(&'a str),
    /// Anything else
    Other,
}

fn tool_change_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^T([0-9]+)").expect("invalid regex pattern"))
}

fn feature_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^;TYPE:(.+)").expect("invalid regex pattern"))
}

fn temperature_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^M104 S([0-9]+)").expect("invalid regex pattern"))
}

fn filament_diameter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^; filament_diameter = ([0-9.]+)").expect("invalid regex pattern")
    })
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify a line (without its line ending).
///
/// Patterns are tried in priority order and the first match wins.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(digits) = capture(tool_change_regex(), line) {
        return LineKind::ToolChange(digits);
    }
    if let Some(name) = capture(feature_regex(), line) {
        return LineKind::Feature(name);
    }
    if let Some(digits) = capture(temperature_regex(), line) {
        return LineKind::Temperature(digits);
    }
    if let Some(value) = capture(filament_diameter_regex(), line) {
        return LineKind::FilamentDiameter(value);
    }
    LineKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_change() {
        assert_eq!(classify("T2"), LineKind::ToolChange("2"));
        assert_eq!(classify("T13 ; next tool"), LineKind::ToolChange("13"));
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(classify("T\u{0663}"), LineKind::Other);
        assert_eq!(classify("M104 S\u{0662}\u{0661}\u{0660}"), LineKind::Other);
    }

    #[test]
    fn test_tool_change_must_lead() {
        assert_eq!(classify(" T2"), LineKind::Other);
        assert_eq!(classify("M6 T2"), LineKind::Other);
        assert_eq!(classify("T"), LineKind::Other);
    }

    #[test]
    fn test_feature() {
        assert_eq!(classify(";TYPE:Internal Infill"), LineKind::Feature("Internal Infill"));
        assert_eq!(classify(";TYPE:support"), LineKind::Feature("support"));
        assert_eq!(classify(";TYPE:"), LineKind::Other);
        assert_eq!(classify("; TYPE:support"), LineKind::Other);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(classify("M104 S215"), LineKind::Temperature("215"));
        assert_eq!(classify("M104 S0 ; off"), LineKind::Temperature("0"));
        assert_eq!(classify("M109 S215"), LineKind::Other);
        assert_eq!(classify("M104 T1 S215"), LineKind::Other);
    }

    #[test]
    fn test_filament_diameter() {
        assert_eq!(
            classify("; filament_diameter = 1.75"),
            LineKind::FilamentDiameter("1.75")
        );
        assert_eq!(classify(";filament_diameter = 1.75"), LineKind::Other);
    }

    #[test]
    fn test_other() {
        assert_eq!(classify("G1 X10 Y10 E0.5"), LineKind::Other);
        assert_eq!(classify(""), LineKind::Other);
    }
}
