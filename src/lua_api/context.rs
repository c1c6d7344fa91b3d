use crate::console::Console;
use crate::error::TrialError;
use crate::stopwatch::TimerSlot;

/// Host state for one script run, set via `lua.set_app_data()` before the script executes.
/// Each run gets a fresh Lua state, so nothing carries over between runs.
pub struct ScriptContext {
    pub timer: TimerSlot,
    pub console: Console,
    /// Exposed to the script as `bench.multiplier`.
    pub multiplier: u32,
    /// First timer misuse raised by a callback, kept even if the script catches it.
    pub misuse: Option<TrialError>,
}

impl ScriptContext {
    pub fn new(console: Console, multiplier: u32) -> Self {
        Self {
            timer: TimerSlot::new(),
            console,
            multiplier,
            misuse: None,
        }
    }

    /// Records `err` if it is the first misuse and converts it into the Lua error to raise.
    pub fn raise_misuse(&mut self, err: TrialError) -> mlua::Error {
        if self.misuse.is_none() {
            self.misuse = err.timer_misuse();
        }
        mlua::Error::external(err)
    }
}
