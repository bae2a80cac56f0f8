//! Classification of three distance readings into a navigation scenario.

use core::fmt;

use thiserror::Error;

use crate::{Millimeters, config::Thresholds};

/// What the robot sees around it.
///
/// The discriminants are part of the interface: navigation code and logs on
/// the robot use the numeric value. [`Scenario::Error`] doubles as the
/// default and as the answer for readings that cannot be trusted; callers
/// must stop or fall back to a safe state on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Scenario {
    #[default]
    Error = 0,
    LeftTooClose = 1,
    RightTooClose = 2,
    LeftAndRightTooClose = 3,
    CenterTooClose = 4,
    CenterAndLeftTooClose = 5,
    CenterAndRightTooClose = 6,
    CenterAndLeftAndRightTooClose = 7,
    Straight = 8,
    LeftTurn = 9,
    RightTurn = 10,
    TeeJoint = 11,
    LeftJoint = 12,
    RightJoint = 13,
    CrossRoad = 14,
    Blocked = 15,
}

/// Priority class of a [`Scenario`]. Earlier tiers always win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Error,
    Danger,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no scenario has discriminant {0}")]
pub struct InvalidScenario(pub u8);

impl Scenario {
    /// All scenarios, in discriminant order.
    pub const ALL: [Scenario; 16] = [
        Scenario::Error,
        Scenario::LeftTooClose,
        Scenario::RightTooClose,
        Scenario::LeftAndRightTooClose,
        Scenario::CenterTooClose,
        Scenario::CenterAndLeftTooClose,
        Scenario::CenterAndRightTooClose,
        Scenario::CenterAndLeftAndRightTooClose,
        Scenario::Straight,
        Scenario::LeftTurn,
        Scenario::RightTurn,
        Scenario::TeeJoint,
        Scenario::LeftJoint,
        Scenario::RightJoint,
        Scenario::CrossRoad,
        Scenario::Blocked,
    ];

    pub const fn tier(self) -> Tier {
        match self as u8 {
            0 => Tier::Error,
            1..=7 => Tier::Danger,
            _ => Tier::Normal,
        }
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Scenario::Error)
    }

    pub const fn is_danger(self) -> bool {
        matches!(self.tier(), Tier::Danger)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Scenario::Error => "Error",
            Scenario::LeftTooClose => "LeftTooClose",
            Scenario::RightTooClose => "RightTooClose",
            Scenario::LeftAndRightTooClose => "LeftAndRightTooClose",
            Scenario::CenterTooClose => "CenterTooClose",
            Scenario::CenterAndLeftTooClose => "CenterAndLeftTooClose",
            Scenario::CenterAndRightTooClose => "CenterAndRightTooClose",
            Scenario::CenterAndLeftAndRightTooClose => "CenterAndLeftAndRightTooClose",
            Scenario::Straight => "Straight",
            Scenario::LeftTurn => "LeftTurn",
            Scenario::RightTurn => "RightTurn",
            Scenario::TeeJoint => "TeeJoint",
            Scenario::LeftJoint => "LeftJoint",
            Scenario::RightJoint => "RightJoint",
            Scenario::CrossRoad => "CrossRoad",
            Scenario::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Scenario> for u8 {
    fn from(scenario: Scenario) -> Self {
        scenario as u8
    }
}

impl TryFrom<u8> for Scenario {
    type Error = InvalidScenario;

    fn try_from(value: u8) -> Result<Self, InvalidScenario> {
        Scenario::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidScenario(value))
    }
}

impl Thresholds {
    /// Classify one set of left, center and right readings.
    ///
    /// Tiers are checked in order: any reading outside
    /// `[min_dist, max_dist]` gives [`Scenario::Error`], then the danger
    /// cases in fixed priority, then the normal cases. Within the normal
    /// tier every condition of the active regime is evaluated and the last
    /// one that holds wins; if none holds the result stays `Error`.
    pub fn classify(
        &self,
        left: Millimeters,
        center: Millimeters,
        right: Millimeters,
    ) -> Scenario {
        if !(self.in_range(left) && self.in_range(center) && self.in_range(right)) {
            return Scenario::Error;
        }
        if let Some(danger) = self.danger(left, center, right) {
            return danger;
        }
        self.normal_conditions(left, center, right)
            .into_iter()
            .filter_map(|(holds, scenario)| holds.then_some(scenario))
            .last()
            .unwrap_or(Scenario::Error)
    }

    /// Number of normal-tier conditions that hold for these readings.
    ///
    /// Zero when the readings are decided by the error or danger tier. For
    /// any ordered set of thresholds every normal triple matches exactly
    /// one condition, which the sweep tests rely on.
    pub fn normal_tier_matches(
        &self,
        left: Millimeters,
        center: Millimeters,
        right: Millimeters,
    ) -> usize {
        if !(self.in_range(left) && self.in_range(center) && self.in_range(right))
            || self.danger(left, center, right).is_some()
        {
            return 0;
        }
        self.normal_conditions(left, center, right)
            .iter()
            .filter(|(holds, _)| *holds)
            .count()
    }

    fn danger(
        &self,
        left: Millimeters,
        center: Millimeters,
        right: Millimeters,
    ) -> Option<Scenario> {
        let left = left < self.side_min;
        let center = center < self.center_min;
        let right = right < self.side_min;
        match (left, center, right) {
            (true, true, true) => Some(Scenario::CenterAndLeftAndRightTooClose),
            (_, true, true) => Some(Scenario::CenterAndRightTooClose),
            (true, true, _) => Some(Scenario::CenterAndLeftTooClose),
            (true, _, true) => Some(Scenario::LeftAndRightTooClose),
            (_, true, _) => Some(Scenario::CenterTooClose),
            (true, _, _) => Some(Scenario::LeftTooClose),
            (_, _, true) => Some(Scenario::RightTooClose),
            _ => None,
        }
    }

    // Order matters: `classify` keeps the last condition that holds.
    fn normal_conditions(
        &self,
        left: Millimeters,
        center: Millimeters,
        right: Millimeters,
    ) -> [(bool, Scenario); 4] {
        let wall = |d: Millimeters| self.side_min <= d && d < self.side_max;
        let open = |d: Millimeters| d >= self.side_max;

        if center >= self.center_open {
            [
                (wall(left) && wall(right), Scenario::Straight),
                (open(right) && open(left), Scenario::CrossRoad),
                (open(left) && wall(right), Scenario::LeftJoint),
                (open(right) && wall(left), Scenario::RightJoint),
            ]
        } else if self.center_min <= center && center < self.center_open {
            [
                (open(right) && open(left), Scenario::TeeJoint),
                (open(left) && wall(right), Scenario::LeftTurn),
                (open(right) && wall(left), Scenario::RightTurn),
                (wall(left) && wall(right), Scenario::Blocked),
            ]
        } else {
            [(false, Scenario::Error); 4]
        }
    }
}

/// [`Thresholds::classify`] with the robot's default thresholds.
pub fn classify(left: Millimeters, center: Millimeters, right: Millimeters) -> Scenario {
    Thresholds::DEFAULT.classify(left, center, right)
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    /// One value from each side of every threshold, plus the band edges.
    /// Classification only compares against thresholds, so these cover
    /// every equivalence class of the default configuration.
    const PROBES: [Millimeters; 16] = [
        49, 50, 51, 149, 150, 151, 211, 212, 213, 353, 354, 355, 599, 600, 601, 800,
    ];

    #[test]
    fn concrete_cases() {
        assert_eq!(classify(300, 650, 300), Scenario::Straight);
        assert_eq!(classify(400, 650, 400), Scenario::CrossRoad);
        assert_eq!(classify(400, 300, 300), Scenario::LeftTurn);
    }

    #[test]
    fn open_regime() {
        assert_eq!(classify(212, 600, 353), Scenario::Straight);
        assert_eq!(classify(354, 800, 354), Scenario::CrossRoad);
        assert_eq!(classify(400, 700, 300), Scenario::LeftJoint);
        assert_eq!(classify(300, 700, 400), Scenario::RightJoint);
    }

    #[test]
    fn narrow_regime() {
        assert_eq!(classify(400, 599, 400), Scenario::TeeJoint);
        assert_eq!(classify(400, 150, 300), Scenario::LeftTurn);
        assert_eq!(classify(300, 300, 400), Scenario::RightTurn);
        assert_eq!(classify(300, 300, 300), Scenario::Blocked);
    }

    #[test]
    fn danger_priority() {
        assert_eq!(
            classify(100, 100, 100),
            Scenario::CenterAndLeftAndRightTooClose
        );
        assert_eq!(classify(300, 100, 100), Scenario::CenterAndRightTooClose);
        assert_eq!(classify(100, 100, 300), Scenario::CenterAndLeftTooClose);
        assert_eq!(classify(100, 700, 100), Scenario::LeftAndRightTooClose);
        assert_eq!(classify(300, 149, 300), Scenario::CenterTooClose);
        assert_eq!(classify(211, 700, 300), Scenario::LeftTooClose);
        assert_eq!(classify(300, 700, 211), Scenario::RightTooClose);
    }

    #[test]
    fn danger_beats_normal() {
        // Center is open and the right side is open, but the left wall is too close.
        assert_eq!(classify(60, 800, 800), Scenario::LeftTooClose);
    }

    #[test]
    fn error_takes_precedence() {
        for &a in &PROBES {
            for &b in &PROBES {
                for bad in [i32::MIN, -1, 0, 49, 801, 5000, i32::MAX] {
                    assert_eq!(classify(bad, a, b), Scenario::Error);
                    assert_eq!(classify(a, bad, b), Scenario::Error);
                    assert_eq!(classify(a, b, bad), Scenario::Error);
                }
            }
        }
    }

    #[test]
    fn probe_sweep_matches_exactly_one_normal_condition() {
        let t = Thresholds::DEFAULT;
        for &l in &PROBES {
            for &c in &PROBES {
                for &r in &PROBES {
                    let scenario = t.classify(l, c, r);
                    let matches = t.normal_tier_matches(l, c, r);
                    match scenario.tier() {
                        Tier::Normal => assert_eq!(matches, 1, "({l}, {c}, {r})"),
                        Tier::Danger => assert_eq!(matches, 0, "({l}, {c}, {r})"),
                        Tier::Error => {
                            assert!(!(t.in_range(l) && t.in_range(c) && t.in_range(r)));
                            assert_eq!(matches, 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn strided_sweep_never_falls_back_inside_the_band() {
        let t = Thresholds::DEFAULT;
        for l in (50..=800).step_by(7) {
            for c in (50..=800).step_by(7) {
                for r in (50..=800).step_by(7) {
                    let scenario = t.classify(l, c, r);
                    assert_ne!(scenario, Scenario::Error, "({l}, {c}, {r})");
                    if scenario.tier() == Tier::Normal {
                        assert_eq!(t.normal_tier_matches(l, c, r), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn custom_thresholds() {
        let t = Thresholds {
            side_min: 100,
            side_max: 200,
            ..Thresholds::DEFAULT
        };
        assert_eq!(t.classify(150, 650, 150), Scenario::Straight);
        assert_eq!(t.classify(250, 650, 250), Scenario::CrossRoad);
        assert_eq!(classify(150, 650, 150), Scenario::LeftAndRightTooClose);
    }

    #[test]
    fn repeated_calls_agree() {
        for &l in &PROBES {
            let first = classify(l, 650, 300);
            for _ in 0..3 {
                assert_eq!(classify(l, 650, 300), first);
            }
        }
    }

    #[test]
    fn discriminants_round_trip() {
        for (i, scenario) in Scenario::ALL.iter().enumerate() {
            assert_eq!(u8::from(*scenario) as usize, i);
            assert_eq!(Scenario::try_from(i as u8), Ok(*scenario));
        }
        assert_eq!(Scenario::try_from(16), Err(InvalidScenario(16)));
        assert_eq!(Scenario::default(), Scenario::Error);
    }

    #[test]
    fn tiers() {
        assert!(Scenario::Error.is_error());
        assert!(Scenario::CenterTooClose.is_danger());
        assert!(!Scenario::Blocked.is_danger());
        assert_eq!(Scenario::Blocked.tier(), Tier::Normal);
        assert_eq!(Scenario::ALL.iter().filter(|s| s.is_danger()).count(), 7);
    }

    #[test]
    fn displays_variant_name() {
        assert_eq!(Scenario::TeeJoint.to_string(), "TeeJoint");
        assert_eq!(InvalidScenario(20).to_string(), "no scenario has discriminant 20");
    }
}
