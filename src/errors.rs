use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKeepError {
    Validation(String),
    Request { status: u16, message: Option<String> },
    Network(String),
    Auth(String),
    NotFoundLocal(String),
    Serialization(String),
    Storage(String),
    Config(String),
}

impl LinkKeepError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkKeepError::Validation(_) => "E001",
            LinkKeepError::Request { .. } => "E002",
            LinkKeepError::Network(_) => "E003",
            LinkKeepError::Auth(_) => "E004",
            LinkKeepError::NotFoundLocal(_) => "E005",
            LinkKeepError::Serialization(_) => "E006",
            LinkKeepError::Storage(_) => "E007",
            LinkKeepError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkKeepError::Validation(_) => "Validation Error",
            LinkKeepError::Request { .. } => "Request Error",
            LinkKeepError::Network(_) => "Network Error",
            LinkKeepError::Auth(_) => "Authentication Error",
            LinkKeepError::NotFoundLocal(_) => "Link Not Found",
            LinkKeepError::Serialization(_) => "Serialization Error",
            LinkKeepError::Storage(_) => "Storage Error",
            LinkKeepError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            LinkKeepError::Request { status, message } => match message {
                Some(msg) => format!("{} (HTTP {})", msg, status),
                None => format!("HTTP {}", status),
            },
            LinkKeepError::Validation(msg)
            | LinkKeepError::Network(msg)
            | LinkKeepError::Auth(msg)
            | LinkKeepError::NotFoundLocal(msg)
            | LinkKeepError::Serialization(msg)
            | LinkKeepError::Storage(msg)
            | LinkKeepError::Config(msg) => msg.clone(),
        }
    }

    /// Server-supplied message, only present on non-2xx responses that carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            LinkKeepError::Request {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }

    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            LinkKeepError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkKeepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkKeepError {}

// 便捷的构造函数
impl LinkKeepError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Validation(msg.into())
    }

    pub fn request(status: u16, message: Option<String>) -> Self {
        LinkKeepError::Request { status, message }
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Network(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Auth(msg.into())
    }

    pub fn not_found_local<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::NotFoundLocal(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Serialization(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkKeepError::Config(msg.into())
    }
}

impl From<std::io::Error> for LinkKeepError {
    fn from(err: std::io::Error) -> Self {
        LinkKeepError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LinkKeepError {
    fn from(err: serde_json::Error) -> Self {
        LinkKeepError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkKeepError {
    fn from(err: config::ConfigError) -> Self {
        LinkKeepError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkKeepError>;

/// Tagged failure returned by session and link operations.
///
/// `message` is what a user should see: the server's message when it sent
/// one, otherwise the operation's generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub error: LinkKeepError,
    pub message: String,
}

impl ActionFailure {
    /// Prefer the server's message, fall back to `fallback`
    pub fn from_error(error: LinkKeepError, fallback: &str) -> Self {
        let message = error
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        Self { error, message }
    }

    /// Always use `message`, discarding whatever the server said
    pub fn fixed(error: LinkKeepError, message: &str) -> Self {
        Self {
            error,
            message: message.to_string(),
        }
    }

    /// Local validation failure; the message is the validation text itself
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        let msg = msg.into();
        Self {
            error: LinkKeepError::Validation(msg.clone()),
            message: msg,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.error, LinkKeepError::Validation(_))
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ActionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub type Outcome<T> = std::result::Result<T, ActionFailure>;
