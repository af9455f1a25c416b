//! Application error type.
//!
//! Every failure that reaches the caller is an `AppError`: a kind (used for
//! exit codes and by tests) plus a human-readable message.

/// Failure categories surfaced by report generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be read, or the invocation itself is invalid.
    Input,
    /// No candidate text encoding produced a parseable CSV.
    Encoding,
    /// Required columns are absent from the header row.
    MissingColumn(Vec<String>),
    /// Nothing survived cleaning.
    EmptyDataset,
    /// Chart rasterization failed.
    ChartRender,
    /// The workbook could not be serialized or written.
    Save,
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn encoding(last_error: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Encoding,
            format!("Failed to read CSV file with any encoding. Last error: {last_error}"),
        )
    }

    pub fn missing_columns(missing: Vec<String>) -> Self {
        let message = format!("Missing required columns: {}", missing.join(", "));
        Self::new(ErrorKind::MissingColumn(missing), message)
    }

    pub fn empty_dataset() -> Self {
        Self::new(
            ErrorKind::EmptyDataset,
            "No valid data found in the CSV file after processing",
        )
    }

    pub fn chart(message: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::ChartRender, format!("Error creating charts: {message}"))
    }

    pub fn save(message: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Save, format!("Failed to save Excel file: {message}"))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Input | ErrorKind::Encoding | ErrorKind::MissingColumn(_) => 2,
            ErrorKind::EmptyDataset => 3,
            ErrorKind::ChartRender => 4,
            ErrorKind::Save => 5,
        }
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
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
