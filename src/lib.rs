//! # lua-trials
//!
//! Times a factorial-style nested loop and a large random sort natively in Rust
//! and as equivalent scripts inside an embedded Luau interpreter, then reports
//! per-run and average comparisons.
//!
//! ## Example
//! ```ignore
//! use lua_trials::{Console, LuaRunner, NativeRunner, Trial, TrialConfig};
//!
//! let console = Console::stdout();
//! let mut native = NativeRunner::new(Some(42));
//! let mut script = LuaRunner::new(console.clone());
//! let config = TrialConfig { math_runs: 3, sort_runs: 2, ..TrialConfig::default() };
//! let summary = Trial::new(console, &mut native, &mut script).run_all(&config);
//! ```

pub mod bench_scripts;
pub mod config;
pub mod console;
pub mod error;
pub mod lua_api;
pub mod report;
pub mod runner;
pub mod stopwatch;
pub mod trial;
pub mod workload;

// --- Core types ---
pub use config::TrialConfig;
pub use console::{Capture, Console};
pub use error::{TrialError, TrialResult};
pub use report::{FamilyTotals, Sample, Summary, average, speed_ratio};
pub use runner::{LuaRunner, NativeRunner, Runner};
pub use stopwatch::{Stopwatch, TimerSlot, elapsed_ms, with_stopwatch};
pub use trial::Trial;
pub use workload::WorkloadKind;
