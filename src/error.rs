use thiserror::Error;

use crate::workload::WorkloadKind;

pub type TrialResult<T> = Result<T, TrialError>;

#[derive(Error, Debug)]
pub enum TrialError {
    #[error("Attempt to start timer while timer running")]
    AlreadyRunning,

    #[error("Attempt to stop timer while no timer running")]
    NotRunning,

    #[error("Lua {workload} script failed: {message}")]
    Script {
        workload: WorkloadKind,
        message: String,
    },

    #[error("Lua {workload} script finished without setting '{global}'")]
    MissingResult {
        workload: WorkloadKind,
        global: &'static str,
    },

    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrialError {
    /// A fresh copy of a timer misuse error; `None` for every other kind.
    pub fn timer_misuse(&self) -> Option<TrialError> {
        match self {
            TrialError::AlreadyRunning => Some(TrialError::AlreadyRunning),
            TrialError::NotRunning => Some(TrialError::NotRunning),
            _ => None,
        }
    }

    /// The timer misuse a Lua error was raised from, looking through callback wrappers.
    pub fn misuse_in(err: &mlua::Error) -> Option<TrialError> {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<TrialError>()?.timer_misuse())
    }
}
