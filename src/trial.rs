//! Driver: runs each workload family for sizes 1..=runs and accumulates results.

use tracing::{error, info};

use crate::config::TrialConfig;
use crate::console::Console;
use crate::report::{self, FamilyTotals, Sample, Summary};
use crate::runner::Runner;
use crate::workload::WorkloadKind;

pub struct Trial<'a> {
    console: Console,
    native: &'a mut dyn Runner,
    script: &'a mut dyn Runner,
}

impl<'a> Trial<'a> {
    pub fn new(console: Console, native: &'a mut dyn Runner, script: &'a mut dyn Runner) -> Self {
        Self {
            console,
            native,
            script,
        }
    }

    pub fn run_family(&mut self, kind: WorkloadKind, runs: u32) -> FamilyTotals {
        let console = self.console.clone();
        console.line("\n");
        console.rule();
        console.rule();
        console.line(&kind.banner());
        console.line(kind.title());
        console.rule();
        info!(workload = %kind, runs, "starting family");

        let mut totals = FamilyTotals::new(kind);
        for n in 1..=runs {
            if let Some(sample) = self.run_once(kind, n) {
                totals.record(sample);
            } else {
                totals.record_failure();
            }
        }
        totals
    }

    /// One native/interpreted pair. `None` when either side failed.
    fn run_once(&mut self, kind: WorkloadKind, n: u32) -> Option<Sample> {
        let console = self.console.clone();
        let size = kind.size(n);
        console.rule();

        let native_ms = self.timed_step(&console, kind, n, size, Side::Native)?;
        let script_ms = self.timed_step(&console, kind, n, size, Side::Script)?;

        let sample = Sample {
            native_ms,
            script_ms,
        };
        console.line(&format!(
            "{} is {}x faster than {}",
            self.native.label(),
            sample.ratio(),
            self.script.label()
        ));
        console.line(&format!("{}\n", crate::console::RULE));
        Some(sample)
    }

    fn timed_step(
        &mut self,
        console: &Console,
        kind: WorkloadKind,
        n: u32,
        size: u64,
        side: Side,
    ) -> Option<u64> {
        let runner = match side {
            Side::Native => &mut *self.native,
            Side::Script => &mut *self.script,
        };
        let label = runner.label().to_string();

        console.line(&format!("Starting Test ({}) for {}", size, label));
        match runner.run(kind, n) {
            Ok(ms) => {
                console.line(&format!(
                    "Test Finished :: {} Test ({}) Finished in {}ms.",
                    label, size, ms
                ));
                Some(ms)
            }
            Err(e) => {
                error!(workload = %kind, n, runner = %label, error = %e, "run failed");
                console.line(&format!("Error with {} code.\n{}", label, e));
                None
            }
        }
    }

    /// Runs every family in `config`, prints the summaries and returns them.
    pub fn run_all(&mut self, config: &TrialConfig) -> Summary {
        let totals: Vec<FamilyTotals> = config
            .plan()
            .into_iter()
            .map(|(kind, runs)| self.run_family(kind, runs))
            .collect();

        self.console.line("\n");
        self.console.rule();
        for family in &totals {
            report::print_summary(&self.console, family, self.native.label(), self.script.label());
            self.console.line("");
        }
        self.console.line("\n");

        Summary::new(self.native.label(), self.script.label(), &totals)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Native,
    Script,
}
