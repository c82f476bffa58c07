/// 接続ハンドラー
///
/// $connectルートでLambdaが呼び出された際の処理を実行する。
/// 接続IDを記録して接続を受け入れる。永続化は行わない。
use serde_json::Value;

use crate::domain::{RequestInfo, Response};
use crate::infrastructure::LogSink;

/// 接続時に記録する行のプレフィックス
pub const CONNECTED_PREFIX: &str = "***Connected";

/// WebSocket接続リクエストを処理するハンドラー
pub struct ConnectHandler<S>
where
    S: LogSink,
{
    sink: S,
}

impl<S> ConnectHandler<S>
where
    S: LogSink,
{
    /// 新しいConnectHandlerを作成
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// WebSocket接続リクエストを処理
    ///
    /// 200以外を返すとAPI Gatewayが接続を拒否するため、
    /// connectionIdが欠落していても常に200 OKを返す。
    pub fn handle(&self, event: &Value) -> Response {
        let info = RequestInfo::from_event(event);

        self.sink
            .record(&format!("{} {}", CONNECTED_PREFIX, info.connection_id));

        Response::connected()
    }
}
