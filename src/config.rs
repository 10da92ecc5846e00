use eyre::{Context, Result, bail};
use revolver::nozzle::{DEFAULT_TOLERANCE_MM, REVOLVER_POSITIONS};
use revolver::processor::{DEFAULT_OUTPUT_SUFFIX, START_GCODE_MARKER};
use revolver::{FeatureMap, FileProcessor, LineRewriter, NozzleProfile, NozzleTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub nozzles: Vec<NozzleProfile>,
    pub features: HashMap<String, f64>,
    pub feature_switching: bool,
    pub start_gcode_marker: String,
    pub output_suffix: String,
    pub diameter_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        let nozzles = NozzleTable::default().iter().map(|(_, p)| p.clone()).collect();
        Self {
            nozzles,
            features: FeatureMap::default_entries(),
            feature_switching: true,
            start_gcode_marker: START_GCODE_MARKER.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            diameter_tolerance: DEFAULT_TOLERANCE_MM,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config = Self::from_yaml(&content)?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rewriter can't work with
    pub fn validate(&self) -> Result<()> {
        if self.nozzles.len() != REVOLVER_POSITIONS {
            bail!(
                "nozzles: the revolver has {} positions, got {} entries",
                REVOLVER_POSITIONS,
                self.nozzles.len()
            );
        }
        if let Some((name, d)) = self.features.iter().find(|(_, d)| !(d.is_finite() && **d > 0.0)) {
            bail!("features: '{}' has invalid diameter {}", name, d);
        }
        if !(self.diameter_tolerance.is_finite() && self.diameter_tolerance > 0.0) {
            bail!("diameter_tolerance must be a positive number");
        }
        if self.start_gcode_marker.trim().is_empty() {
            bail!("start_gcode_marker must not be empty");
        }
        Ok(())
    }

    /// Build the processor described by this config.
    ///
    /// `force_feature_switching` comes from `--feature-aware` and overrides a
    /// config that turned switching off.
    pub fn processor(&self, force_feature_switching: bool) -> Result<FileProcessor> {
        let nozzles = NozzleTable::new(self.nozzles.clone())
            .context("Invalid nozzle table")?
            .with_tolerance(self.diameter_tolerance);
        let features = FeatureMap::new(self.features.clone());
        let rewriter = LineRewriter::new(nozzles, features)
            .with_feature_switching(self.feature_switching || force_feature_switching);
        Ok(FileProcessor::new(rewriter).with_marker(self.start_gcode_marker.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nozzles.len(), 6);
        assert_eq!(config.features.len(), 9);
        assert!(config.feature_switching);
        assert_eq!(config.output_suffix, "_revolver");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("output_suffix: _rv\n").unwrap();
        assert_eq!(config.output_suffix, "_rv");
        assert_eq!(config.nozzles.len(), 6);
        assert_eq!(config.start_gcode_marker, "; start_gcode_end");
    }

    #[test]
    fn test_yaml_nozzle_table() {
        let yaml = r#"
nozzles:
  - { diameter: 0.4, material: PLA, temp: 200 }
  - { diameter: 0.6, material: PETG, temp: 235 }
  - { diameter: 0.25, material: PLA, temp: 205 }
  - { diameter: 0.4, material: TPU, temp: 225 }
  - { diameter: 0.8, material: PETG, temp: 245 }
  - { diameter: 1.2, material: PLA, temp: 230 }
features:
  Sparse Infill: 0.6
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.nozzles[1], NozzleProfile::new(0.6, "PETG", 235));

        let processor = config.processor(false).unwrap();
        let outcome = processor.process_lines([";TYPE:Sparse infill", "T9"]).unwrap();
        assert!(outcome.lines.contains(&"REVOLVER_SELECT NOZZLE=1".to_string()));
        assert!(outcome.lines.contains(&"REVOLVER_SELECT TOOL=9 NOZZLE=3".to_string()));
    }

    #[test]
    fn test_nozzle_table_must_have_six_entries() {
        assert!(Config::from_yaml("nozzles: []\n").is_err());

        let mut config = Config::default();
        config.nozzles.push(NozzleProfile::new(0.3, "PLA", 210));
        assert_eq!(config.nozzles.len(), 7);
        assert!(config.validate().is_err());
        assert!(config.processor(false).is_err());

        config.nozzles.truncate(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tool_change_always_mod_six() {
        let processor = Config::default().processor(false).unwrap();
        let outcome = processor.process_lines(["T6", "T13"]).unwrap();
        assert_eq!(
            outcome.lines,
            vec!["REVOLVER_SELECT TOOL=6 NOZZLE=0", "REVOLVER_SELECT TOOL=13 NOZZLE=1"]
        );
    }

    #[test]
    fn test_zero_tolerance_rejected() {
        assert!(Config::from_yaml("diameter_tolerance: 0\n").is_err());
        assert!(Config::from_yaml("diameter_tolerance: -0.1\n").is_err());
        assert!(Config::from_yaml("diameter_tolerance: 0.05\n").is_ok());
    }

    #[test]
    fn test_bad_feature_diameter_rejected() {
        assert!(Config::from_yaml("features:\n  support: -0.6\n").is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(Config::from_yaml("start_gcode_marker: ''\n").is_err());
    }

    #[test]
    fn test_feature_aware_overrides_disabled_switching() {
        let config = Config::from_yaml("feature_switching: false\n").unwrap();
        assert!(!config.processor(false).unwrap().rewriter().feature_switching());
        assert!(config.processor(true).unwrap().rewriter().feature_switching());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/revolver-config.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
