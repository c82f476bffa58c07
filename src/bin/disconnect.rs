/// WebSocket $disconnect ルートハンドラー
///
/// API Gateway WebSocketの切断通知を受け取り、接続IDをログに記録する。
use chat::application::DisconnectHandler;
use chat::domain::{RequestInfo, Response};
use chat::infrastructure::{TracingLogSink, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 切断はクリーンアップ処理のため常に200 OKを返却する。
async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let request = RequestInfo::from_event(&event.payload);

    debug!(
        connection_id = request.connection_id,
        request_id = request.request_id,
        "WebSocket切断リクエスト受信"
    );

    let disconnect_handler = DisconnectHandler::new(TracingLogSink::new("$disconnect"));

    Ok(disconnect_handler.handle(&event.payload))
}
