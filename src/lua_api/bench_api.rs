//! Lua API exposed to trial scripts: host timer, same-line console output and the
//! workload multiplier.

use super::context::ScriptContext;
use mlua::{Lua, Result};

/// Register the read-only `bench` table.
pub fn register(lua: &Lua) -> Result<()> {
    let multiplier = lua
        .app_data_ref::<ScriptContext>()
        .ok_or_else(|| mlua::Error::runtime("No script context"))?
        .multiplier;

    let bench = lua.create_table()?;

    // bench.start_timer() -> nil. Errors if the timer is already running.
    bench.set(
        "start_timer",
        lua.create_function(|lua, ()| {
            let mut ctx = lua
                .app_data_mut::<ScriptContext>()
                .ok_or_else(|| mlua::Error::runtime("No script context"))?;
            ctx.timer.start().map_err(|e| ctx.raise_misuse(e))
        })?,
    )?;

    // bench.end_timer() -> number (elapsed ms). Errors if no timer is running.
    bench.set(
        "end_timer",
        lua.create_function(|lua, ()| {
            let mut ctx = lua
                .app_data_mut::<ScriptContext>()
                .ok_or_else(|| mlua::Error::runtime("No script context"))?;
            ctx.timer.stop().map_err(|e| ctx.raise_misuse(e))
        })?,
    )?;

    // bench.print_same_line(s) -> nil. Overwrites the current console line.
    bench.set(
        "print_same_line",
        lua.create_function(|lua, msg: String| {
            let console = lua
                .app_data_ref::<ScriptContext>()
                .ok_or_else(|| mlua::Error::runtime("No script context"))?
                .console
                .clone();
            console.same_line(&msg);
            Ok(())
        })?,
    )?;

    // bench.multiplier -> number (read-only)
    bench.set("multiplier", multiplier)?;
    bench.set_readonly(true);

    lua.globals().set("bench", bench)?;
    Ok(())
}
