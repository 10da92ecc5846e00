//! Nozzle profiles - the physical nozzles mounted on the revolver head

use serde::{Deserialize, Serialize};

use crate::error::{Result, RevolverError};

/// Two diameters closer than this are the same nozzle size
pub const DEFAULT_TOLERANCE_MM: f64 = 0.01;

/// Nozzle positions on the revolver head
pub const REVOLVER_POSITIONS: usize = 6;

/// One nozzle position on the revolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NozzleProfile {
    /// Orifice diameter in millimeters
    pub diameter: f64,
    /// Material loaded for this nozzle
    pub material: String,
    /// Target hotend temperature
    pub temp: u32,
}

impl NozzleProfile {
    pub fn new(diameter: f64, material: impl Into<String>, temp: u32) -> Self {
        Self {
            diameter,
            material: material.into(),
            temp,
        }
    }
}

/// Read-only table of nozzle profiles, indexed by nozzle id
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleTable {
    profiles: Vec<NozzleProfile>,
    tolerance: f64,
}

impl NozzleTable {
    /// Build a table from profiles; position in the list is the nozzle id.
    ///
    /// The head has exactly [`REVOLVER_POSITIONS`] nozzles, one profile each.
    pub fn new(profiles: Vec<NozzleProfile>) -> Result<Self> {
        if profiles.len() != REVOLVER_POSITIONS {
            return Err(RevolverError::Config(format!(
                "nozzle table needs {} entries, got {}",
                REVOLVER_POSITIONS,
                profiles.len()
            )));
        }
        if let Some((idx, p)) = profiles
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.diameter.is_finite() && p.diameter > 0.0))
        {
            return Err(RevolverError::Config(format!(
                "nozzle {} has invalid diameter {}",
                idx, p.diameter
            )));
        }
        Ok(Self {
            profiles,
            tolerance: DEFAULT_TOLERANCE_MM,
        })
    }

    /// Override the diameter matching tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn get(&self, nozzle: usize) -> Option<&NozzleProfile> {
        self.profiles.get(nozzle)
    }

    /// Look up a profile, failing on an index outside the table
    pub fn profile(&self, nozzle: usize) -> Result<&NozzleProfile> {
        self.get(nozzle).ok_or(RevolverError::UnknownNozzle(nozzle))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &NozzleProfile)> {
        self.profiles.iter().enumerate()
    }

    /// Find the nozzle for a requested diameter.
    ///
    /// Returns the lowest id whose diameter is within tolerance (inclusive),
    /// or nozzle 0 when nothing matches.
    pub fn find_for_diameter(&self, diameter: f64) -> usize {
        self.iter()
            .find(|(_, p)| (p.diameter - diameter).abs() <= self.tolerance)
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

}

/// Map a slicer tool number, given as its ASCII digits, onto a revolver
/// position. Works digit by digit so any length of number reduces.
pub fn nozzle_for_tool(digits: &str) -> usize {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0, |acc, b| (acc * 10 + (b - b'0') as usize) % REVOLVER_POSITIONS)
}

impl Default for NozzleTable {
    fn default() -> Self {
        Self {
            profiles: vec![
                NozzleProfile::new(0.4, "PLA", 210),
                NozzleProfile::new(0.2, "PLA", 215),
                NozzleProfile::new(0.6, "PETG", 240),
                NozzleProfile::new(0.4, "ABS", 245),
                NozzleProfile::new(0.8, "PLA", 220),
                NozzleProfile::new(1.0, "PETG", 245),
            ],
            tolerance: DEFAULT_TOLERANCE_MM,
        }
    }
}

/// Render a diameter the way slicers write it: `0.4`, `1.0`
pub fn format_diameter(diameter: f64) -> String {
    if diameter.fract() == 0.0 {
        format!("{:.1}", diameter)
    } else {
        format!("{}", diameter)
    }
}
