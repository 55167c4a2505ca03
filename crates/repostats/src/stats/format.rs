//! Adaptive unit scaling for repository sizes.

use serde::{Deserialize, Serialize};

/// Ordered unit ladder. The loop never scales past the last entry, even if
/// the value still exceeds the threshold.
const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Unit system for size formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitSystem {
    /// Powers of 1024.
    #[default]
    Binary,
    /// Powers of 1000.
    Si,
}

impl UnitSystem {
    /// Scaling threshold for this unit system.
    #[must_use]
    pub fn threshold(self) -> f64 {
        match self {
            UnitSystem::Binary => 1024.0,
            UnitSystem::Si => 1000.0,
        }
    }
}

/// Format an average repository size, given in KiB, as a human-readable
/// string like `"2.000 MB"`.
///
/// The raw input is always KiB-denominated at the source, so SI formatting
/// first converts it to an SI-kilobyte-equivalent value (x 1024/1000) before
/// scaling by powers of 1000.
#[must_use]
pub fn format_size(avg_kib: f64, units: UnitSystem) -> String {
    let threshold = units.threshold();

    let mut value = match units {
        UnitSystem::Binary => avg_kib,
        UnitSystem::Si => avg_kib * 1024.0 / 1000.0,
    };

    let mut index = 0;
    while value > threshold && index < UNITS.len() - 1 {
        value /= threshold;
        index += 1;
    }

    format!("{:.3} {}", value, UNITS[index])
}
