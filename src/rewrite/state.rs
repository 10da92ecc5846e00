//! Session state carried from one line to the next

/// Mutable scalars of a single processing run.
///
/// Passed by value through the rewriter; every run starts from `default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Currently selected nozzle, always a valid index into the nozzle table
    pub nozzle: usize,
    /// Last hotend temperature commanded, 0 when none seen yet
    pub temp: u32,
}

impl SessionState {
    pub fn new(nozzle: usize, temp: u32) -> Self {
        Self { nozzle, temp }
    }

    pub fn with_nozzle(self, nozzle: usize) -> Self {
        Self { nozzle, ..self }
    }

    pub fn with_temp(self, temp: u32) -> Self {
        Self { temp, ..self }
    }
}
