//! Brute-force check of the normal-tier conditions.
//!
//! The classifier keeps the last normal condition that holds, so its result
//! only matches a plain prioritised match if the conditions never overlap.
//! The sweep classifies every in-band triple and counts overlaps and
//! unmatched triples.

use std::fmt;

use nav_core::{Millimeters, Scenario, Thresholds};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCount {
    pub scenario: Scenario,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub step: usize,
    pub triples: u64,
    pub counts: Vec<ScenarioCount>,
    /// Triples where more than one normal condition holds.
    pub overlaps: u64,
    /// In-band triples that still classify as `Error`.
    pub fallbacks: u64,
    pub first_overlap: Option<[Millimeters; 3]>,
    pub first_fallback: Option<[Millimeters; 3]>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.overlaps == 0 && self.fallbacks == 0
    }
}

pub fn run(thresholds: &Thresholds, step: usize) -> SweepReport {
    let mut counts = [0u64; Scenario::ALL.len()];
    let mut report = SweepReport {
        step,
        triples: 0,
        counts: Vec::new(),
        overlaps: 0,
        fallbacks: 0,
        first_overlap: None,
        first_fallback: None,
    };
    let band = || (thresholds.min_dist..=thresholds.max_dist).step_by(step);

    for left in band() {
        debug!(left, "sweeping");
        for center in band() {
            for right in band() {
                let scenario = thresholds.classify(left, center, right);
                counts[usize::from(u8::from(scenario))] += 1;
                report.triples += 1;

                if scenario.is_error() {
                    report.fallbacks += 1;
                    report.first_fallback.get_or_insert([left, center, right]);
                }
                if thresholds.normal_tier_matches(left, center, right) > 1 {
                    report.overlaps += 1;
                    report.first_overlap.get_or_insert([left, center, right]);
                }
            }
        }
    }

    report.counts = Scenario::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&scenario, count)| ScenarioCount { scenario, count })
        .collect();
    report
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} triples (step {} mm)", self.triples, self.step)?;
        for entry in &self.counts {
            writeln!(f, "  {:<30} {}", entry.scenario.name(), entry.count)?;
        }
        write!(
            f,
            "overlaps: {}, unmatched: {}",
            self.overlaps, self.fallbacks
        )?;
        if let Some([l, c, r]) = self.first_overlap {
            write!(f, "\nfirst overlap at ({l}, {c}, {r})")?;
        }
        if let Some([l, c, r]) = self.first_fallback {
            write!(f, "\nfirst unmatched at ({l}, {c}, {r})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_disjoint() {
        let report = run(&Thresholds::DEFAULT, 25);
        // 50, 75, ..., 800
        assert_eq!(report.triples, 31 * 31 * 31);
        assert!(report.is_clean(), "{report}");
        assert_eq!(
            report.counts.iter().map(|c| c.count).sum::<u64>(),
            report.triples
        );
        assert!(report.counts.iter().all(|c| c.scenario != Scenario::Error));
    }

    #[test]
    fn every_scenario_but_error_is_reachable() {
        let report = run(&Thresholds::DEFAULT, 10);
        assert_eq!(report.counts.len(), 15);
    }

    #[test]
    fn custom_thresholds_stay_disjoint() {
        let thresholds = Thresholds {
            side_min: 120,
            side_max: 480,
            center_min: 300,
            center_open: 500,
            ..Thresholds::DEFAULT
        };
        assert!(run(&thresholds, 20).is_clean());
    }

    #[test]
    fn display_summarises() {
        let report = run(&Thresholds::DEFAULT, 375);
        let text = report.to_string();
        assert!(text.starts_with("27 triples (step 375 mm)"));
        assert!(text.ends_with("overlaps: 0, unmatched: 0"));
    }
}
