use std::io;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification used when reporting a degraded call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The server could not be started, failed, hung, or reported an error.
    ProcessFailure,
    /// The server answered with something that is not valid JSON.
    ParseFailure,
}

/// Errors produced while talking to an external tool server.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("failed to start server '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to communicate with server: {0}")]
    Io(#[from] io::Error),

    #[error("server exited with {}: {stderr}", describe_exit(.code))]
    Exit { code: Option<i32>, stderr: String },

    #[error("server did not finish within {0:?}")]
    Timeout(Duration),

    #[error("server returned error: code={code}, message={message}")]
    Server { code: i64, message: String },

    #[error("malformed server response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RetrieveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RetrieveError::Parse(_) => FailureKind::ParseFailure,
            RetrieveError::Spawn { .. }
            | RetrieveError::Io(_)
            | RetrieveError::Exit { .. }
            | RetrieveError::Timeout(_)
            | RetrieveError::Server { .. } => FailureKind::ProcessFailure,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Errors produced by catalog operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("cannot pick from an empty catalog")]
    Empty,
}
