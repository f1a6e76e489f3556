use thiserror::Error;

pub type Result<T> = std::result::Result<T, LabelError>;

#[derive(Debug, Error)]
pub enum LabelError {
    /// open_jtalk reported an error, a warning under strict mode, or exited unsuccessfully.
    #[error("open_jtalk failed: {diagnostics}")]
    ExternalTool { diagnostics: String },

    /// The trace log has fewer sections than the requested output needs.
    #[error("unexpected log format: section #{required} is required but the log has {found} sections")]
    UnexpectedLogFormat { required: usize, found: usize },

    #[error("malformed label `{line}`: {reason}")]
    MalformedLabel { line: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LabelError {
    pub(crate) fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLabel {
            line: line.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
