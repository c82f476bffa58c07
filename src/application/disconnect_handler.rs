/// 切断ハンドラー
///
/// $disconnectルートでLambdaが呼び出された際の処理を実行する
use serde_json::Value;

use crate::domain::{RequestInfo, Response};
use crate::infrastructure::LogSink;

/// 切断時に記録する行のプレフィックス
pub const DISCONNECTED_PREFIX: &str = "***Disconnected";

/// WebSocket切断リクエストを処理するハンドラー
///
/// 切断はクリーンアップ処理のため、常に200 OKを返す。
pub struct DisconnectHandler<S>
where
    S: LogSink,
{
    sink: S,
}

impl<S> DisconnectHandler<S>
where
    S: LogSink,
{
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn handle(&self, event: &Value) -> Response {
        let info = RequestInfo::from_event(event);

        self.sink
            .record(&format!("{} {}", DISCONNECTED_PREFIX, info.connection_id));

        Response::disconnected()
    }
}
