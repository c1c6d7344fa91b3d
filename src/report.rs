//! Per-family aggregation and the end-of-run summary.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::console::Console;
use crate::error::TrialResult;
use crate::workload::WorkloadKind;

/// How many times faster the native run was: `max(script,1) / max(native,1)`, integer division.
pub fn speed_ratio(native_ms: u64, script_ms: u64) -> u64 {
    script_ms.max(1) / native_ms.max(1)
}

/// Integer mean; zero when nothing was counted.
pub fn average(sum: u64, count: u32) -> u64 {
    if count == 0 {
        return 0;
    }
    sum / u64::from(count)
}

/// One successful native/interpreted pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub native_ms: u64,
    pub script_ms: u64,
}

impl Sample {
    pub fn ratio(&self) -> u64 {
        speed_ratio(self.native_ms, self.script_ms)
    }

    /// Native time under 1ms; its ratio is clamped rather than measured.
    pub fn native_below_resolution(&self) -> bool {
        self.native_ms == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyTotals {
    pub kind: WorkloadKind,
    pub runs: u32,
    pub failed_runs: u32,
    pub native_ms: u64,
    pub script_ms: u64,
    pub ratio_sum: u64,
    pub sub_ms_native_runs: u32,
}

impl FamilyTotals {
    pub fn new(kind: WorkloadKind) -> Self {
        Self {
            kind,
            runs: 0,
            failed_runs: 0,
            native_ms: 0,
            script_ms: 0,
            ratio_sum: 0,
            sub_ms_native_runs: 0,
        }
    }

    pub fn record(&mut self, sample: Sample) {
        self.runs += 1;
        self.native_ms = self.native_ms.saturating_add(sample.native_ms);
        self.script_ms = self.script_ms.saturating_add(sample.script_ms);
        self.ratio_sum = self.ratio_sum.saturating_add(sample.ratio());
        if sample.native_below_resolution() {
            self.sub_ms_native_runs += 1;
        }
    }

    pub fn record_failure(&mut self) {
        self.failed_runs += 1;
    }

    pub fn native_avg_ms(&self) -> u64 {
        average(self.native_ms, self.runs)
    }

    pub fn script_avg_ms(&self) -> u64 {
        average(self.script_ms, self.runs)
    }

    /// Average of `script - native`; negative when the interpreter was faster.
    pub fn avg_diff_ms(&self) -> i64 {
        if self.runs == 0 {
            return 0;
        }
        let diff = i128::from(self.script_ms) - i128::from(self.native_ms);
        i64::try_from(diff / i128::from(self.runs)).unwrap_or(i64::MAX)
    }

    pub fn avg_ratio(&self) -> u64 {
        average(self.ratio_sum, self.runs)
    }
}

pub fn print_summary(console: &Console, totals: &FamilyTotals, native: &str, script: &str) {
    console.line(&format!("----- {} -----", totals.kind.summary_title()).blue().bold().to_string());

    if totals.runs == 0 {
        console.line(&format!("No successful runs ({} failed).", totals.failed_runs));
        return;
    }

    console.line(&format!(
        "{} average time to complete is {}ms.",
        native,
        totals.native_avg_ms().to_string().green().bold()
    ));
    console.line(&format!(
        "{} average time to complete is {}ms.",
        script,
        totals.script_avg_ms().to_string().red().bold()
    ));
    console.line(&format!(
        "{} was on average {}ms faster than {}.",
        native,
        totals.avg_diff_ms().to_string().green().bold(),
        script
    ));
    console.line(&format!(
        "{} was on average {}x faster than {}.",
        native,
        totals.avg_ratio().to_string().green().bold(),
        script
    ));
    if totals.sub_ms_native_runs > 0 {
        console.line(&format!(
            "{} of {} {} runs finished in under 1ms; their ratios are lower bounds.",
            totals.sub_ms_native_runs, totals.runs, native
        ));
    }
    if totals.failed_runs > 0 {
        console.line(&format!(
            "{} {} runs failed and were left out of the averages.",
            totals.failed_runs, script
        ));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilySummary {
    pub workload: WorkloadKind,
    pub runs: u32,
    pub failed_runs: u32,
    pub native_avg_ms: u64,
    pub script_avg_ms: u64,
    pub avg_diff_ms: i64,
    pub avg_ratio: u64,
    pub sub_ms_native_runs: u32,
}

impl From<&FamilyTotals> for FamilySummary {
    fn from(t: &FamilyTotals) -> Self {
        Self {
            workload: t.kind,
            runs: t.runs,
            failed_runs: t.failed_runs,
            native_avg_ms: t.native_avg_ms(),
            script_avg_ms: t.script_avg_ms(),
            avg_diff_ms: t.avg_diff_ms(),
            avg_ratio: t.avg_ratio(),
            sub_ms_native_runs: t.sub_ms_native_runs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub native: String,
    pub script: String,
    pub families: Vec<FamilySummary>,
}

impl Summary {
    pub fn new(native: &str, script: &str, totals: &[FamilyTotals]) -> Self {
        Self {
            generated_at: Utc::now(),
            native: native.to_string(),
            script: script.to_string(),
            families: totals.iter().map(FamilySummary::from).collect(),
        }
    }

    pub fn write_json(&self, path: &Path) -> TrialResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Capture;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn totals(samples: &[(u64, u64)]) -> FamilyTotals {
        let mut t = FamilyTotals::new(WorkloadKind::Math);
        for &(native_ms, script_ms) in samples {
            t.record(Sample { native_ms, script_ms });
        }
        t
    }

    #[test]
    fn ratio_clamps_zero_times() {
        assert_eq!(speed_ratio(0, 5), 5);
        assert_eq!(speed_ratio(3, 0), 0);
        assert_eq!(speed_ratio(0, 0), 1);
        assert_eq!(speed_ratio(4, 10), 2);
    }

    #[test]
    fn ratio_does_not_conflate_one_and_two_ms() {
        // An OR-with-1 trick would turn 2ms into 3ms here.
        assert_eq!(speed_ratio(2, 10), 5);
    }

    #[test]
    fn average_of_three_runs() {
        let t = totals(&[(10, 100), (20, 200), (30, 300)]);
        assert_eq!(t.native_avg_ms(), 20);
        assert_eq!(t.script_avg_ms(), 200);
        assert_eq!(average(60, 3), 20);
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(0, 0), 0);
        assert_eq!(FamilyTotals::new(WorkloadKind::Sort).avg_diff_ms(), 0);
    }

    #[test]
    fn single_run_totals_equal_the_run() {
        let t = totals(&[(7, 91)]);
        assert_eq!(t.runs, 1);
        assert_eq!(t.native_ms, 7);
        assert_eq!(t.script_ms, 91);
        assert_eq!(t.ratio_sum, 13);
    }

    #[test]
    fn diff_can_be_negative() {
        let t = totals(&[(50, 10), (50, 30)]);
        assert_eq!(t.avg_diff_ms(), -30);
    }

    #[test]
    fn sub_ms_native_runs_are_counted() {
        let t = totals(&[(0, 5), (2, 8), (0, 1)]);
        assert_eq!(t.sub_ms_native_runs, 2);
    }

    #[test]
    fn failures_stay_out_of_sums() {
        let mut t = totals(&[(10, 20)]);
        t.record_failure();
        assert_eq!(t.runs, 1);
        assert_eq!(t.failed_runs, 1);
        assert_eq!(t.native_avg_ms(), 10);
    }

    #[test]
    fn summary_prints_averages() {
        colored::control::set_override(false);
        let capture = Capture::new();
        let console = Console::new(capture.clone());
        let t = totals(&[(10, 100), (20, 200), (30, 300)]);
        print_summary(&console, &t, "Rust", "Luau");
        let out = capture.contents();
        assert!(out.contains("----- Summary for Math Speed Test -----"));
        assert!(out.contains("Rust average time to complete is 20ms."));
        assert!(out.contains("Luau average time to complete is 200ms."));
        assert!(out.contains("Rust was on average 180ms faster than Luau."));
        assert!(out.contains("Rust was on average 10x faster than Luau."));
        assert!(!out.contains("under 1ms"));
    }

    #[test]
    fn family_summary_from_totals() {
        let t = totals(&[(10, 100), (30, 300)]);
        let s = FamilySummary::from(&t);
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({
                "workload": "math",
                "runs": 2,
                "failed_runs": 0,
                "native_avg_ms": 20,
                "script_avg_ms": 200,
                "avg_diff_ms": 180,
                "avg_ratio": 10,
                "sub_ms_native_runs": 0
            })
        );
    }

    #[test]
    fn write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = Summary::new("Rust", "Luau", &[totals(&[(1, 9)])]);
        summary.write_json(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["native"], "Rust");
        assert_eq!(value["families"][0]["avg_ratio"], 9);
    }

    proptest! {
        #[test]
        fn ratio_matches_clamped_division(a in 0u64..100_000, b in 0u64..100_000) {
            prop_assert_eq!(speed_ratio(a, b), b.max(1) / a.max(1));
        }
    }
}
