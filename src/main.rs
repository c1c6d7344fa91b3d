use std::process;

use clap::Parser;
use lua_trials::{Console, LuaRunner, NativeRunner, Trial, TrialConfig};
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Diagnostics go to stderr so they never interleave with the console report.
/// Filter comes from TRIALS_LOG, then RUST_LOG.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter = std::env::var("TRIALS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() {
    init_tracing();
    let config = TrialConfig::parse();
    info!(?config, "trials starting");

    let console = Console::stdout();
    let mut native = NativeRunner::new(config.seed);
    let mut script = LuaRunner::new(console.clone());

    let summary = Trial::new(console, &mut native, &mut script).run_all(&config);

    if let Some(path) = &config.json {
        match summary.write_json(path) {
            Ok(()) => println!("Summary written to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write summary to {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }
}
