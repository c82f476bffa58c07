/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// tracingクレートを使用し、JSON形式での出力をサポートする。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::{LogFormat, LoggingConfig};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`・`LOG_FORMAT`から設定を読み込む。
/// `LOG_FORMAT`が不正な場合は標準エラーに報告し、デフォルト（JSON）で初期化する。
///
/// この関数は複数回呼び出しても安全で、最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use chat::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    let config = LoggingConfig::from_env().unwrap_or_else(|err| {
        eprintln!("Failed to load logging config: {}", err);
        LoggingConfig::default()
    });

    init_logging_with(&config);
}

/// 指定した設定でログサブスクライバーを初期化する
pub fn init_logging_with(config: &LoggingConfig) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_new(config.filter()).unwrap_or_else(|_| EnvFilter::new("info"));

        match config.format() {
            LogFormat::Json => {
                // JSON形式のログレイヤー（Lambda/CloudWatch向け）
                let json_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .flatten_event(true)
                    .with_current_span(false);

                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(json_layer)
                    .try_init();
            }
            LogFormat::Text => {
                let text_layer = tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false);

                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(text_layer)
                    .try_init();
            }
        }
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
///
/// # 注意
/// この関数はテスト専用であり、本番環境では`init_logging`を使用すること。
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
