/// ログ出力設定
///
/// 環境変数からログのフィルターと出力形式を読み込む。
use thiserror::Error;

/// フィルター未指定時のデフォルト
pub const DEFAULT_LOG_FILTER: &str = "info";

/// ログ設定のエラー型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoggingConfigError {
    #[error("Invalid LOG_FORMAT: {0} (expected 'json' or 'text')")]
    InvalidFormat(String),
}

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// CloudWatch向けJSON（1行1レコード）
    #[default]
    Json,
    /// ローカル実行向けのテキスト形式
    Text,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggingConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(LoggingConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// ログ設定
///
/// 環境変数:
/// - RUST_LOG: フィルターディレクティブ（デフォルト: info）
/// - LOG_FORMAT: json または text（デフォルト: json）
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    filter: String,
    format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LoggingConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 空文字は未設定として扱う。LOG_FORMATが不正な場合はエラーを返す。
    pub fn from_env() -> Result<Self, LoggingConfigError> {
        let get_optional_string = |key: &str| -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.trim().is_empty())
        };

        let filter = get_optional_string("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let format = match get_optional_string("LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self { filter, format })
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(filter: impl Into<String>, format: LogFormat) -> Self {
        Self {
            filter: filter.into(),
            format,
        }
    }

    /// フィルターディレクティブを取得
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 出力形式を取得
    pub fn format(&self) -> LogFormat {
        self.format
    }
}
