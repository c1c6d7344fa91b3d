use std::path::PathBuf;

use clap::Parser;

use crate::workload::WorkloadKind;

pub const DEFAULT_MATH_RUNS: u32 = 100;
pub const DEFAULT_SORT_RUNS: u32 = 15;

/// Times Rust against embedded Luau on a nested-loop and a sort workload.
#[derive(Parser, Debug, Clone)]
#[command(name = "trials", version, about)]
pub struct TrialConfig {
    /// Math runs; run n loops over 0..=n*1000
    #[arg(long, env = "TRIALS_MATH_RUNS", default_value_t = DEFAULT_MATH_RUNS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub math_runs: u32,

    /// Sort runs; run n sorts n*100000 values
    #[arg(long, env = "TRIALS_SORT_RUNS", default_value_t = DEFAULT_SORT_RUNS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub sort_runs: u32,

    /// Run a single workload family
    #[arg(long, value_enum)]
    pub only: Option<WorkloadKind>,

    /// Seed for the native random array
    #[arg(long, env = "TRIALS_SEED")]
    pub seed: Option<u64>,

    /// Also write the summary as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            math_runs: DEFAULT_MATH_RUNS,
            sort_runs: DEFAULT_SORT_RUNS,
            only: None,
            seed: None,
            json: None,
        }
    }
}

impl TrialConfig {
    /// Families to run, in order, with their run counts.
    pub fn plan(&self) -> Vec<(WorkloadKind, u32)> {
        WorkloadKind::ALL
            .into_iter()
            .filter(|kind| self.only.is_none_or(|only| only == *kind))
            .map(|kind| (kind, self.runs_for(kind)))
            .collect()
    }

    pub fn runs_for(&self, kind: WorkloadKind) -> u32 {
        match kind {
            WorkloadKind::Math => self.math_runs,
            WorkloadKind::Sort => self.sort_runs,
        }
    }
}
