//! Thresholds and calibration tables used by the decision layer.
//!
//! The defaults match the physical robot. Every table can be replaced at
//! runtime; `validate` catches combinations that would make a band empty.

use thiserror::Error;

use crate::{Millimeters, TenthMillimeters};

/// Smallest side distance to a wall before the robot is too close.
pub const SIDE_MIN: Millimeters = 212;
/// Largest side distance still counted as a wall.
pub const SIDE_MAX: Millimeters = 354;
/// Center distance from which the way ahead counts as open.
pub const CENTER_OPEN: Millimeters = 600;
/// Minimum safe distance to a wall in front.
pub const CENTER_MIN: Millimeters = 150;
/// Shortest distance the sensors can report.
pub const MIN_DIST: Millimeters = 50;
/// Longest distance the sensors can report.
pub const MAX_DIST: Millimeters = 800;

pub const IR_SLOPE: i32 = 1_195_172;
pub const IR_OFFSET: i32 = -1058;
/// Raw codes at or below this value are beyond the sensor's reach.
pub const IR_MAX: i32 = 2552;
pub const IR_CLAMPED: Millimeters = 800;

/// Sensor offsets from the robot center, indexed by bit of the line mask.
pub const LINE_WEIGHTS: [TenthMillimeters; 8] = [334, 238, 142, 48, -48, -142, -238, -334];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("distance band is empty: min_dist {min} > max_dist {max}")]
    EmptyDistanceBand { min: Millimeters, max: Millimeters },
    #[error("wall band is inverted: side_min {min} > side_max {max}")]
    InvertedWallBand { min: Millimeters, max: Millimeters },
    #[error("center_min {min} is above center_open {open}")]
    InvertedCenterBand { min: Millimeters, open: Millimeters },
    #[error("calibration divisor {divisor} is not positive for the first raw code above max_raw")]
    NonPositiveDivisor { divisor: i64 },
}

/// Distance bands used by [`Thresholds::classify`](crate::Thresholds::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    pub side_min: Millimeters,
    pub side_max: Millimeters,
    pub center_open: Millimeters,
    pub center_min: Millimeters,
    pub min_dist: Millimeters,
    pub max_dist: Millimeters,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        side_min: SIDE_MIN,
        side_max: SIDE_MAX,
        center_open: CENTER_OPEN,
        center_min: CENTER_MIN,
        min_dist: MIN_DIST,
        max_dist: MAX_DIST,
    };

    /// Whether `distance` is a reading the sensors can actually produce.
    pub const fn in_range(&self, distance: Millimeters) -> bool {
        self.min_dist <= distance && distance <= self.max_dist
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dist > self.max_dist {
            return Err(ConfigError::EmptyDistanceBand {
                min: self.min_dist,
                max: self.max_dist,
            });
        }
        if self.side_min > self.side_max {
            return Err(ConfigError::InvertedWallBand {
                min: self.side_min,
                max: self.side_max,
            });
        }
        if self.center_min > self.center_open {
            return Err(ConfigError::InvertedCenterBand {
                min: self.center_min,
                open: self.center_open,
            });
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Linear fit of the infrared distance sensor: `slope / (raw + offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Calibration {
    pub slope: i32,
    pub offset: i32,
    pub max_raw: i32,
    /// Reported for every raw code at or below `max_raw`.
    pub clamped: Millimeters,
}

impl Calibration {
    pub const DEFAULT: Self = Self {
        slope: IR_SLOPE,
        offset: IR_OFFSET,
        max_raw: IR_MAX,
        clamped: IR_CLAMPED,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        let divisor = i64::from(self.max_raw) + 1 + i64::from(self.offset);
        if divisor <= 0 {
            return Err(ConfigError::NonPositiveDivisor { divisor });
        }
        Ok(())
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineWeights {
    pub weights: [TenthMillimeters; 8],
}

impl LineWeights {
    pub const DEFAULT: Self = Self {
        weights: LINE_WEIGHTS,
    };
}

impl Default for LineWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Every tunable table of the decision layer in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub thresholds: Thresholds,
    pub calibration: Calibration,
    pub line: LineWeights,
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.calibration.validate()
    }
}
