//! Feature map - which nozzle size each slicer feature prefers

use std::collections::HashMap;

/// Normalize a slicer feature label for lookup.
///
/// `Internal Infill` and `internal_infill` both become `internal_infill`.
pub fn normalize_feature(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Read-only mapping from feature name to preferred orifice diameter
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    diameters: HashMap<String, f64>,
}

impl FeatureMap {
    /// Build a map; keys are normalized so config files may use any casing
    pub fn new(diameters: HashMap<String, f64>) -> Self {
        Self {
            diameters: diameters
                .into_iter()
                .map(|(name, d)| (normalize_feature(&name), d))
                .collect(),
        }
    }

    /// Preferred diameter for an already-normalized feature name
    pub fn diameter_for(&self, feature: &str) -> Option<f64> {
        self.diameters.get(feature).copied()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.diameters.contains_key(feature)
    }

    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.diameters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The built-in vocabulary as a plain map, used as the config default
    pub fn default_entries() -> HashMap<String, f64> {
        [
            ("perimeter", 0.4),
            ("external_perimeter", 0.4),
            ("overhang_perimeter", 0.2),
            ("internal_infill", 0.8),
            ("solid_infill", 0.4),
            ("top_solid_infill", 0.4),
            ("bridge_infill", 0.4),
            ("support", 0.6),
            ("support_interface", 0.2),
        ]
        .into_iter()
        .map(|(name, d)| (name.to_string(), d))
        .collect()
    }
}

impl Default for FeatureMap {
    fn default() -> Self {
        Self::new(Self::default_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_feature() {
        assert_eq!(normalize_feature("Internal Infill"), "internal_infill");
        assert_eq!(normalize_feature("  Support   interface "), "support_interface");
        assert_eq!(normalize_feature("PERIMETER"), "perimeter");
        assert_eq!(normalize_feature("bridge_infill"), "bridge_infill");
    }

    #[test]
    fn test_default_vocabulary() {
        let map = FeatureMap::default();
        assert_eq!(map.len(), 9);
        assert_eq!(map.diameter_for("internal_infill"), Some(0.8));
        assert_eq!(map.diameter_for("overhang_perimeter"), Some(0.2));
        assert_eq!(map.diameter_for("support"), Some(0.6));
    }

    #[test]
    fn test_unknown_feature() {
        let map = FeatureMap::default();
        assert_eq!(map.diameter_for("ironing"), None);
        assert!(!map.contains("ironing"));
    }

    #[test]
    fn test_new_normalizes_keys() {
        let mut entries = HashMap::new();
        entries.insert("Sparse Infill".to_string(), 0.8);
        let map = FeatureMap::new(entries);
        assert!(map.contains("sparse_infill"));
        assert!(!map.contains("Sparse Infill"));
    }
}
