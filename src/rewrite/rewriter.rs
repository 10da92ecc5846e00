//! Line rewriter - turns slicer tool changes and feature annotations into
//! revolver selections
//!
//! Each call is pure: it takes the session state by value and hands back the
//! lines to emit together with the state for the next line.

use log::debug;

use crate::error::Result;
use crate::nozzle::{
    FeatureMap, NozzleTable, format_diameter, normalize_feature, nozzle_for_tool,
};
use crate::rewrite::patterns::{LineKind, classify};
use crate::rewrite::state::SessionState;

/// Command the revolver firmware macro listens for
pub const SELECT_COMMAND: &str = "REVOLVER_SELECT";

/// Result of rewriting a single input line
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// Output lines, without line endings
    pub lines: Vec<String>,
    /// State after this line
    pub state: SessionState,
    /// Number of selection commands among `lines`
    pub selections: usize,
}

impl Rewrite {
    fn passthrough(line: &str, state: SessionState) -> Self {
        Self {
            lines: vec![line.to_string()],
            state,
            selections: 0,
        }
    }
}

/// Rewrites G-code lines against a nozzle table and feature map
#[derive(Debug, Clone)]
pub struct LineRewriter {
    nozzles: NozzleTable,
    features: FeatureMap,
    feature_switching: bool,
}

impl LineRewriter {
    pub fn new(nozzles: NozzleTable, features: FeatureMap) -> Self {
        Self {
            nozzles,
            features,
            feature_switching: true,
        }
    }

    /// Enable or disable nozzle switching on `;TYPE:` annotations
    pub fn with_feature_switching(mut self, enabled: bool) -> Self {
        self.feature_switching = enabled;
        self
    }

    pub fn nozzles(&self) -> &NozzleTable {
        &self.nozzles
    }

    pub fn features(&self) -> &FeatureMap {
        &self.features
    }

    pub fn feature_switching(&self) -> bool {
        self.feature_switching
    }

    /// Nozzle preferred for a normalized feature name, or the current one
    pub fn nozzle_for_feature(&self, feature: &str, state: SessionState) -> usize {
        match self.features.diameter_for(feature) {
            Some(diameter) => self.nozzles.find_for_diameter(diameter),
            None => state.nozzle,
        }
    }

    /// Rewrite one line. `line_no` is 1-based and only used for logging.
    pub fn rewrite(&self, line: &str, line_no: usize, state: SessionState) -> Result<Rewrite> {
        match classify(line) {
            LineKind::ToolChange(digits) => {
                let nozzle = nozzle_for_tool(digits);
                let tool = match digits.trim_start_matches('0') {
                    "" => "0",
                    tool => tool,
                };
                debug!("line {}: tool change T{} -> nozzle {}", line_no, tool, nozzle);
                Ok(Rewrite {
                    lines: vec![format!("{} TOOL={} NOZZLE={}", SELECT_COMMAND, tool, nozzle)],
                    state,
                    selections: 1,
                })
            }
            LineKind::Feature(raw) if self.feature_switching => {
                self.rewrite_feature(line, raw, line_no, state)
            }
            LineKind::Feature(_) => Ok(Rewrite::passthrough(line, state)),
            LineKind::Temperature(digits) => {
                Ok(Rewrite::passthrough(line, state.with_temp(parse_temperature(digits))))
            }
            LineKind::FilamentDiameter(filament) => {
                let profile = self.nozzles.profile(state.nozzle)?;
                debug!(
                    "line {}: filament {} on nozzle {} ({}mm)",
                    line_no, filament, state.nozzle, profile.diameter
                );
                Ok(Rewrite {
                    lines: vec![
                        line.to_string(),
                        format!("; nozzle_diameter = {}", format_diameter(profile.diameter)),
                    ],
                    state,
                    selections: 0,
                })
            }
            LineKind::Other => Ok(Rewrite::passthrough(line, state)),
        }
    }

    fn rewrite_feature(
        &self,
        line: &str,
        raw: &str,
        line_no: usize,
        state: SessionState,
    ) -> Result<Rewrite> {
        let feature = normalize_feature(raw);
        let nozzle = self.nozzle_for_feature(&feature, state);
        if nozzle == state.nozzle {
            return Ok(Rewrite::passthrough(line, state));
        }

        let profile = self.nozzles.profile(nozzle)?;
        debug!(
            "line {}: switching nozzle {} -> {} for {}",
            line_no, state.nozzle, nozzle, feature
        );

        let mut lines = vec![
            line.to_string(),
            format!(
                "; Switching to {}mm nozzle for {}",
                format_diameter(profile.diameter),
                feature
            ),
            format!("{} NOZZLE={}", SELECT_COMMAND, nozzle),
        ];
        let mut next = state.with_nozzle(nozzle);

        if profile.temp != state.temp {
            lines.push(format!("M104 S{} ; Set nozzle temp", profile.temp));
            lines.push(format!("M109 S{} ; Wait for temp", profile.temp));
            next = next.with_temp(profile.temp);
        }

        Ok(Rewrite {
            lines,
            state: next,
            selections: 1,
        })
    }
}

impl Default for LineRewriter {
    fn default() -> Self {
        Self::new(NozzleTable::default(), FeatureMap::default())
    }
}

/// Temperature from its ASCII digits, saturating at `u32::MAX`
fn parse_temperature(digits: &str) -> u32 {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}
