pub mod bench_api;
pub mod context;

use mlua::{Lua, Result};

/// Register all host APIs on a Lua state. `ScriptContext` must already be set as app data.
pub fn register_all(lua: &Lua) -> Result<()> {
    bench_api::register(lua)?;
    Ok(())
}
