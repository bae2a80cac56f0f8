//! Raw infrared code to millimetre conversion.

use crate::{Millimeters, config::Calibration};

impl Calibration {
    /// Convert one raw sensor code to a distance.
    ///
    /// Codes at or below `max_raw` are past the sensor's reach and report
    /// `clamped`. Anything above goes through `slope / (raw + offset)` with
    /// truncating division. The result is not clamped to the valid distance
    /// band; [`Thresholds::classify`](crate::Thresholds::classify) rejects
    /// out-of-band readings instead.
    ///
    /// A calibration whose divisor reaches zero (see
    /// [`Calibration::validate`]) reports `clamped` rather than failing.
    pub fn convert(&self, raw: i32) -> Millimeters {
        if raw <= self.max_raw {
            return self.clamped;
        }
        self.slope
            .checked_div(raw.saturating_add(self.offset))
            .unwrap_or(self.clamped)
    }
}

/// [`Calibration::convert`] with the robot's default calibration.
pub fn convert(raw: i32) -> Millimeters {
    Calibration::DEFAULT.convert(raw)
}
