use serde::Serialize;

/// Grid carbon intensity by hour of day (gCO2/kWh).
pub const DEFAULT_INTENSITY: [u32; 24] = [
    420, 400, 380, 360, 350, 340, 360, 420, 480, 520, 500, 460, //
    430, 410, 390, 370, 360, 420, 480, 520, 500, 460, 430, 410,
];

/// Ordered hourly intensity values treated as a single linear day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CarbonIntensityCurve {
    values: Vec<u32>,
}

impl Default for CarbonIntensityCurve {
    fn default() -> Self {
        Self::new(DEFAULT_INTENSITY.to_vec())
    }
}

impl CarbonIntensityCurve {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Mean intensity over `[start, end)`, or `None` if the range is empty or
    /// leaves the curve.
    pub fn mean(&self, start: usize, end: usize) -> Option<f64> {
        if start >= end {
            return None;
        }
        let window = self.values.get(start..end)?;
        let sum: u64 = window.iter().map(|&v| u64::from(v)).sum();
        Some(sum as f64 / window.len() as f64)
    }
}
