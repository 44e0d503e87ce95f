//! Structured Logging with Sensitive Data Redaction
//!
//! Log lines go to stderr as `[ts] LEVEL [module] message | k=v ...`.
//! Field values are redacted by key name:
//! - mnemonics, private keys, seeds, entropy: fully hidden
//! - addresses: first and last characters only
//! - URLs, paths and errors: embedded bech32 addresses shortened the same way

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Minimum level that is emitted (stored as `LogLevel as u8`)
static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Environment variable read by `init_from_env`
pub const ENV_LOG_LEVEL: &str = "COSMOS_STDTX_LOG";

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Off = 4,
}

impl LogLevel {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" | "none" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

pub fn set_level(level: LogLevel) {
    MIN_LEVEL.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(MIN_LEVEL.load(Ordering::SeqCst))
}

/// Apply `COSMOS_STDTX_LOG` if it names a known level
pub fn init_from_env() {
    if let Some(level) = std::env::var(ENV_LOG_LEVEL).ok().as_deref().and_then(LogLevel::parse) {
        set_level(level);
    }
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field (auto-redacts by key name)
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let value_str = value.to_string();
        let redacted = redact_if_sensitive(key, &value_str);
        self.fields.push((key, redacted));
        self
    }

    pub fn render(&self) -> String {
        let fields_str = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");

        if fields_str.is_empty() {
            format!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message)
        } else {
            format!(
                "[{}] {} [{}] {} | {}",
                timestamp, self.level, self.module, self.message, fields_str
            )
        }
    }

    pub fn log(self) {
        if self.level < level() {
            return;
        }
        eprintln!("{}", self.render());
    }
}

fn redact_if_sensitive(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    let fully_redacted_keys = [
        "mnemonic", "private_key", "privatekey", "secret", "seed", "entropy",
        "passphrase", "password", "key_hex",
    ];
    if fully_redacted_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_value(value);
    }

    let address_keys = ["address", "signer", "sender", "recipient", "from", "to"];
    if address_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_address(value);
    }

    let text_keys = ["url", "path", "error"];
    if text_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_embedded_addresses(value);
    }

    value.to_string()
}

fn redact_value(value: &str) -> String {
    if value.is_empty() {
        return "[EMPTY]".to_string();
    }
    if value.len() <= 4 {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED:{}chars]", value.len())
    }
}

/// Keep the bech32 prefix plus a few data characters, and the tail
fn redact_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if !trimmed.is_ascii() || trimmed.len() <= 16 {
        return redact_value(trimmed);
    }

    let prefix_len = trimmed.rfind('1').map(|sep| sep + 5).unwrap_or(6).min(trimmed.len() - 8);
    let suffix = &trimmed[trimmed.len() - 4..];
    format!("{}...{}", &trimmed[..prefix_len], suffix)
}

/// Shorten every bech32-looking token inside free text (URLs, error messages)
fn redact_embedded_addresses(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();

    for c in text.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            token.push(c);
            continue;
        }
        flush_token(&mut out, &mut token);
        out.push(c);
    }
    flush_token(&mut out, &mut token);
    out
}

fn flush_token(out: &mut String, token: &mut String) {
    if looks_like_address(token) {
        out.push_str(&redact_address(token));
    } else {
        out.push_str(token);
    }
    token.clear();
}

fn looks_like_address(token: &str) -> bool {
    token.len() >= 39 && token.rfind('1').map(|sep| sep > 0).unwrap_or(false)
}

#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Debug, $module, $msg).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Debug, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_info {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Info, $module, $msg).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Info, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warn, $module, $msg).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Warn, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}

#[macro_export]
macro_rules! log_error {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, $module, $msg).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new($crate::utils::logging::LogLevel::Error, $module, $msg)
            $(.field(stringify!($key), &$value))*
            .log()
    };
}
