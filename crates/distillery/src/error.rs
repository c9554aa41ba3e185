// ABOUTME: Error types for distillery including the ErrorCode enum and DistillError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of distillation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Io,
    Options,
    Render,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Io => "I/O error",
            ErrorCode::Options => "invalid options",
            ErrorCode::Render => "render error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type. Malformed HTML is never an error; failures come from
/// reading input, parsing options, or rendering output.
#[derive(Debug, thiserror::Error)]
pub struct DistillError {
    pub code: ErrorCode,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for DistillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "distillery: {}: {}", self.op, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl DistillError {
    /// Create an Io error.
    pub fn io(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Io,
            op: op.into(),
            source,
        }
    }

    /// Create an Options error.
    pub fn options(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Options,
            op: op.into(),
            source,
        }
    }

    /// Create a Render error.
    pub fn render(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Render,
            op: op.into(),
            source,
        }
    }

    pub fn is_io(&self) -> bool {
        self.code == ErrorCode::Io
    }

    pub fn is_options(&self) -> bool {
        self.code == ErrorCode::Options
    }

    pub fn is_render(&self) -> bool {
        self.code == ErrorCode::Render
    }
}
