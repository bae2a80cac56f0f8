//! Command results, printed either as text or as JSON.

use std::fmt;

use color_eyre::eyre::Result;
use nav_core::{LineCenter, Millimeters, Scenario, TenthMillimeters, Tier};
use serde::Serialize;

pub fn report<T: Serialize + fmt::Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub raw: i32,
    pub distance: Millimeters,
    pub in_range: bool,
}

impl fmt::Display for ConvertOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.distance)?;
        if !self.in_range {
            write!(f, " (outside the sensor band)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub left: Millimeters,
    pub center: Millimeters,
    pub right: Millimeters,
    pub scenario: Scenario,
    pub code: u8,
    pub tier: Tier,
}

impl fmt::Display for ClassifyOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.scenario, self.code)
    }
}

#[derive(Debug, Serialize)]
pub struct PositionOutput {
    pub mask: u8,
    pub position: TenthMillimeters,
    pub active: u32,
}

impl fmt::Display for PositionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.active == 0 {
            return write!(f, "line lost");
        }
        let mm = f64::from(self.position) / 10.0;
        write!(f, "{mm:.1} mm from {} active sensors", self.active)
    }
}

#[derive(Debug, Serialize)]
pub struct CenterOutput {
    pub mask: u8,
    pub center: LineCenter,
}

impl fmt::Display for CenterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.center {
            LineCenter::Lost => "lost",
            LineCenter::OffLeft => "off to the left",
            LineCenter::OffRight => "off to the right",
            LineCenter::OnLine => "on line",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Serialize)]
pub struct BumpOutput {
    pub port: u8,
    pub bits: u8,
    pub pressed: Vec<u8>,
    pub left_side: bool,
    pub right_side: bool,
}

impl fmt::Display for BumpOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pressed.is_empty() {
            return write!(f, "no switch pressed");
        }
        write!(f, "{:#08b} pressed:", self.bits)?;
        for switch in &self.pressed {
            write!(f, " {switch}")?;
        }
        Ok(())
    }
}
