// src/exit.rs
//! Process exit codes for the `centrality` binary.

use std::process::Termination;

use crate::error::CentralityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CentralityExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, corrupt trend log).
    Error = 1,
    /// Configuration or date argument rejected.
    InvalidInput = 2,
    /// Replay or checkpoint could not move forward.
    NoProgress = 3,
}

impl CentralityExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a failed command to its exit code.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CentralityError>() {
            Some(CentralityError::Config(_) | CentralityError::InvalidDate { .. }) => {
                Self::InvalidInput
            }
            Some(
                CentralityError::BoundaryNotAdvanced { .. }
                | CentralityError::CheckpointNotAdvanced(_),
            ) => Self::NoProgress,
            _ => Self::Error,
        }
    }
}

impl Termination for CentralityExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
