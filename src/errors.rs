/// Errors surfaced by the cookie-backed storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to execute '{method}' on 'Storage': {required} {} required, but only {present} present.", argument_noun(.required))]
    Arguments {
        method: String,
        required: usize,
        present: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Expiry out of range for ttl {0}")]
    ExpiryOutOfRange(f64),

    #[error("Cannot format expiry date: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error("Unknown storage method: {0}")]
    UnknownMethod(String),

    #[error("Cookie storage is already initialized")]
    AlreadyInitialized,

    #[error("Cookie storage is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Jar(#[from] anyhow::Error),
}

fn argument_noun(required: &usize) -> &'static str {
    if *required == 1 {
        "argument"
    } else {
        "arguments"
    }
}
