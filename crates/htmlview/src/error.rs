//! Error types for template stores and rendering.

use std::io;

/// Errors that can occur while building a store, compiling templates,
/// or rendering into a response sink.
///
/// Every failure in this crate is recoverable: misconfiguration surfaces at
/// store construction, compilation failures surface from the reload step,
/// and execution failures surface from [`render`](crate::HtmlInstance::render).
/// Nothing in the render path panics or aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Store was configured without a usable template source.
    #[error("configuration error: {0}")]
    Config(String),

    /// Template syntax error or compilation failure.
    #[error("template error: {0}")]
    Template(String),

    /// Template not found in the set.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Data payload serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Glob pattern could not be parsed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O failure reading template files or writing to the sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<glob::GlobError> for RenderError {
    fn from(err: glob::GlobError) -> Self {
        RenderError::Io(err.into_error())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            ErrorKind::WriteFailure => RenderError::Io(io::Error::other(err.to_string())),
            _ => RenderError::Template(err.to_string()),
        }
    }
}
