//! Application error type.
//!
//! One error type for the whole pipeline, carrying the process exit code:
//!
//! - `2`: configuration / IO problems (bad grid settings, unwritable output)
//! - `3`: domain errors on model inputs (Z < 1, degenerate grids or curves)
//! - `4`: no usable result (every Z in a batch failed)
//! - `5`: NNLS iteration cap exceeded (recoverable per Z inside a batch)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
