// ログ出力ポート
//
// ハンドラーが診断用のテキスト行を記録するための抽象化。
// 本番ではtracing経由でCloudWatchへ出力し、テストではメモリに蓄積して
// 出力順序を検証する。

/// テキスト行を1行ずつ記録するトレイト
///
/// 呼び出しは同期的で、記録順はそのまま出力順となる。
pub trait LogSink: Send + Sync {
    /// テキスト行を1行記録する
    fn record(&self, line: &str);
}

/// tracingのINFOイベントとして記録するLogSink
///
/// 各行は`message`フィールドとして出力される。
/// JSONサブスクライバー初期化後はCloudWatchに1行1レコードで届く。
#[derive(Debug, Clone)]
pub struct TracingLogSink {
    /// ログに付与するルート名（message, $connect, $disconnect）
    route: &'static str,
}

impl TracingLogSink {
    /// 新しいTracingLogSinkを作成
    pub fn new(route: &'static str) -> Self {
        Self { route }
    }
}

impl LogSink for TracingLogSink {
    fn record(&self, line: &str) {
        tracing::info!(route = self.route, "{}", line);
    }
}
