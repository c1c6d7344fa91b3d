//! Native workloads: a factorial-style nested loop and a large random sort.

use std::fmt;
use std::hint::black_box;
use std::time::Instant;

use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use crate::stopwatch::{elapsed_ms, with_stopwatch};

/// Values in a sort workload are drawn from `[0, SORT_VALUE_BOUND)`.
pub const SORT_VALUE_BOUND: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Math,
    Sort,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 2] = [WorkloadKind::Math, WorkloadKind::Sort];

    /// Units of work per step of the multiplier `n`.
    pub fn scale(self) -> u64 {
        match self {
            WorkloadKind::Math => 1_000,
            WorkloadKind::Sort => 100_000,
        }
    }

    pub fn size(self, n: u32) -> u64 {
        u64::from(n) * self.scale()
    }

    pub fn banner(self) -> String {
        match self {
            WorkloadKind::Math => format!("STARTING MATH SPEED TEST. {}X", self.scale()),
            WorkloadKind::Sort => format!("STARTING ALGO SPEED TEST. {}X", self.scale()),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WorkloadKind::Math => "Mathematical Performance Test",
            WorkloadKind::Sort => "Algorithm Performance Test",
        }
    }

    pub fn summary_title(self) -> &'static str {
        match self {
            WorkloadKind::Math => "Summary for Math Speed Test",
            WorkloadKind::Sort => "Summary for Algo Speed Test",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadKind::Math => write!(f, "math"),
            WorkloadKind::Sort => write!(f, "sort"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathRun {
    pub outer_iterations: u64,
    pub inner_iterations: u64,
    pub elapsed_ms: u64,
}

/// For every `i` in `0..=n*1000`, multiplies `1..=i` together (wrapping).
pub fn run_math(n: u32) -> MathRun {
    let last = WorkloadKind::Math.size(n);
    let mut outer_iterations = 0u64;
    let mut inner_iterations = 0u64;

    let start = Instant::now();
    for i in 0..=last {
        let mut result: u64 = 1;
        for j in 1..=i {
            result = result.wrapping_mul(j);
        }
        black_box(result);
        outer_iterations += 1;
        inner_iterations += i;
    }
    let elapsed_ms = elapsed_ms(start);

    MathRun {
        outer_iterations,
        inner_iterations,
        elapsed_ms,
    }
}

#[derive(Debug, Clone)]
pub struct SortRun {
    pub values: Vec<u32>,
    pub elapsed_ms: u64,
}

pub fn random_values<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..SORT_VALUE_BOUND)).collect()
}

/// Sorts in place; only the sort itself is timed.
pub fn sort_timed(values: &mut [u32]) -> u64 {
    let ((), ms) = with_stopwatch(|| values.sort_unstable());
    ms
}

pub fn run_sort<R: Rng + ?Sized>(n: u32, rng: &mut R) -> SortRun {
    let len = usize::try_from(WorkloadKind::Sort.size(n)).unwrap_or(usize::MAX);
    let mut values = random_values(len, rng);
    let elapsed_ms = sort_timed(&mut values);
    SortRun { values, elapsed_ms }
}
