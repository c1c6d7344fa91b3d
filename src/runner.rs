//! Workload strategies: run a workload natively or inside a fresh Luau state.

use mlua::Lua;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::bench_scripts::{RESULT_GLOBAL, script_for};
use crate::console::Console;
use crate::error::{TrialError, TrialResult};
use crate::lua_api;
use crate::lua_api::context::ScriptContext;
use crate::workload::{self, WorkloadKind};

pub trait Runner {
    /// Name shown in progress lines ("Rust", "Luau").
    fn label(&self) -> &str;

    /// Runs workload `kind` with multiplier `n`, returning the timed section in ms.
    fn run(&mut self, kind: WorkloadKind, n: u32) -> TrialResult<u64>;
}

pub struct NativeRunner {
    rng: StdRng,
}

impl NativeRunner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Runner for NativeRunner {
    fn label(&self) -> &str {
        "Rust"
    }

    fn run(&mut self, kind: WorkloadKind, n: u32) -> TrialResult<u64> {
        let ms = match kind {
            WorkloadKind::Math => {
                let run = workload::run_math(n);
                debug!(n, outer = run.outer_iterations, ms = run.elapsed_ms, "native math done");
                run.elapsed_ms
            }
            WorkloadKind::Sort => {
                let run = workload::run_sort(n, &mut self.rng);
                debug!(n, len = run.values.len(), ms = run.elapsed_ms, "native sort done");
                run.elapsed_ms
            }
        };
        Ok(ms)
    }
}

/// Creates a Lua state with the host API registered for one run.
pub fn create_lua_state(console: Console, multiplier: u32) -> Result<Lua, mlua::Error> {
    let lua = Lua::new();
    lua.set_app_data(ScriptContext::new(console, multiplier));
    lua_api::register_all(&lua)?;
    Ok(lua)
}

/// Runs the bundled script for each workload (or a custom one) in a new Lua state per call.
pub struct LuaRunner {
    console: Console,
    script_override: Option<String>,
}

impl LuaRunner {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            script_override: None,
        }
    }

    /// Uses `source` instead of the bundled script for every workload.
    pub fn with_script(console: Console, source: impl Into<String>) -> Self {
        Self {
            console,
            script_override: Some(source.into()),
        }
    }

    pub fn run_source(&self, kind: WorkloadKind, n: u32, source: &str) -> TrialResult<u64> {
        let lua = create_lua_state(self.console.clone(), n)?;

        let outcome = lua.load(source).set_name(format!("{}_trial", kind)).exec();
        if let Err(e) = outcome {
            // Only a misuse that escaped the script replaces the interpreter's message.
            return Err(TrialError::misuse_in(&e).unwrap_or(TrialError::Script {
                workload: kind,
                message: e.to_string(),
            }));
        }

        // A misuse the script caught with pcall still invalidates the run.
        let caught = lua
            .app_data_mut::<ScriptContext>()
            .and_then(|mut ctx| ctx.misuse.take());
        if let Some(misuse) = caught {
            return Err(misuse);
        }

        let elapsed: Option<u64> = lua.globals().get(RESULT_GLOBAL)?;
        let ms = elapsed.ok_or(TrialError::MissingResult {
            workload: kind,
            global: RESULT_GLOBAL,
        })?;
        debug!(n, workload = %kind, ms, "lua run done");
        Ok(ms)
    }
}

impl Runner for LuaRunner {
    fn label(&self) -> &str {
        "Luau"
    }

    fn run(&mut self, kind: WorkloadKind, n: u32) -> TrialResult<u64> {
        match &self.script_override {
            Some(source) => self.run_source(kind, n, source),
            None => self.run_source(kind, n, script_for(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Capture;

    fn runner() -> LuaRunner {
        LuaRunner::new(Console::new(Capture::new()))
    }

    #[test]
    fn native_math_reports_time() {
        let mut native = NativeRunner::new(Some(1));
        assert!(native.run(WorkloadKind::Math, 1).is_ok());
    }

    #[test]
    fn native_sort_is_repeatable_with_seed() {
        let mut a = NativeRunner::new(Some(3));
        let mut b = NativeRunner::new(Some(3));
        let left = workload::random_values(16, &mut a.rng);
        let right = workload::random_values(16, &mut b.rng);
        assert_eq!(left, right);
    }

    #[test]
    fn lua_math_script_sets_result() {
        let mut lua = runner();
        assert!(lua.run(WorkloadKind::Math, 1).is_ok());
    }

    #[test]
    fn parse_error_is_reported_not_raised() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Math, 1, "for i = do end")
            .unwrap_err();
        assert!(matches!(err, TrialError::Script { workload: WorkloadKind::Math, .. }));
    }

    #[test]
    fn runtime_error_is_reported() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Sort, 1, "error('boom')")
            .unwrap_err();
        match err {
            TrialError::Script { message, .. } => assert!(message.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_result_global_is_an_error() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Math, 1, "local x = 1")
            .unwrap_err();
        assert!(matches!(err, TrialError::MissingResult { .. }));
    }

    #[test]
    fn double_start_maps_to_already_running() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Math, 1, "bench.start_timer() bench.start_timer()")
            .unwrap_err();
        assert!(matches!(err, TrialError::AlreadyRunning));
    }

    #[test]
    fn pcall_caught_double_start_is_still_an_error() {
        let lua = runner();
        let err = lua
            .run_source(
                WorkloadKind::Math,
                1,
                "bench.start_timer()\npcall(bench.start_timer)\nelapsed_ms = bench.end_timer()",
            )
            .unwrap_err();
        assert!(matches!(err, TrialError::AlreadyRunning));
    }

    #[test]
    fn later_runtime_error_wins_over_caught_misuse() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Math, 1, "pcall(bench.end_timer)\nerror('boom')")
            .unwrap_err();
        match err {
            TrialError::Script { message, .. } => assert!(message.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn uncaught_end_without_start_maps_to_not_running() {
        let lua = runner();
        let err = lua
            .run_source(WorkloadKind::Sort, 1, "elapsed_ms = bench.end_timer()")
            .unwrap_err();
        assert!(matches!(err, TrialError::NotRunning));
    }

    #[test]
    fn state_does_not_leak_between_runs() {
        let lua = runner();
        lua.run_source(WorkloadKind::Math, 1, "bench.start_timer() elapsed_ms = bench.end_timer()")
            .unwrap();
        let err = lua
            .run_source(WorkloadKind::Math, 1, "local x = 1")
            .unwrap_err();
        assert!(matches!(err, TrialError::MissingResult { .. }));
    }
}
