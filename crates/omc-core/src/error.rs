use thiserror::Error;

/// Fatal, per-operation compilation failures. A failed build leaves no
/// trace in the shared registry or the uniqueness set.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid operation input: {0}")]
    InvalidInput(String),

    #[error("duplicate method name: {0}")]
    DuplicateMethodName(String),

    #[error("unsupported MIME type for response body: method {method}, status {status}")]
    UnsupportedResponseMimeType { method: String, status: u16 },

    #[error(
        "stream response for method {method}, status {status} resolves to {type_name}, which has no byte-array property"
    )]
    MissingByteArrayField {
        method: String,
        status: u16,
        type_name: String,
    },
}

/// Non-fatal diagnostics recorded during a build and routed to the log
/// facade. Building continues after a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    #[error("method {method}, status {status}: response declares a body but the operation produces nothing")]
    NoProduceWithBody { method: String, status: u16 },
}
