use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollabError {
    #[error("Not logged in. Please run 'collab login' first.")]
    NoToken,

    #[error("Unauthorized: {}", unauthorized_reason(.message))]
    Unauthorized { message: Option<String> },

    #[error("HTTP {status}: {}", http_reason(.message, .error))]
    Http {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type CollabResult<T> = Result<T, CollabError>;

fn unauthorized_reason(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("please run 'collab login' again")
}

fn http_reason<'a>(message: &'a Option<String>, error: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("request failed")
}

impl CollabError {
    /// HTTP status of a server-side rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CollabError::Http { status, .. } => Some(*status),
            CollabError::Unauthorized { .. } => Some(401),
            CollabError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `message` field of the server's error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CollabError::Http { message, .. } | CollabError::Unauthorized { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// The `error` field of the server's error body.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            CollabError::Http { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// `message` from the body, then the error's own text.
    pub fn message_or_text(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// `error` from the body, then the error's own text.
    pub fn error_or_text(&self) -> String {
        self.server_error()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> CollabResult<T>;
    fn with_context<F>(self, f: F) -> CollabResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> CollabResult<T> {
        self.map_err(|e| CollabError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> CollabResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CollabError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> CollabResult<T> {
        self.ok_or_else(|| CollabError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> CollabResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| CollabError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! collab_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::CollabError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::CollabError::$error_type(format!($fmt, $($arg)*))
    };
}
