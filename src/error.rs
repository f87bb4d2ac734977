/// Exit code for usage and I/O failures.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a malformed embedded dataset.
pub const EXIT_DATASET: u8 = 3;
/// Exit code for terminal/runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

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

/// Integrity failures detected while building a [`crate::data::Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("duplicate company id '{0}' in dataset")]
    DuplicateId(String),
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        AppError::new(EXIT_DATASET, format!("Dataset integrity error: {err}"))
    }
}
