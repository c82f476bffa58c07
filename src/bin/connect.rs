/// WebSocket $connect ルートハンドラー
///
/// API Gateway WebSocketの接続リクエストを受け入れ、接続IDをログに記録する。
use chat::application::ConnectHandler;
use chat::domain::{RequestInfo, Response};
use chat::infrastructure::{TracingLogSink, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::info;

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
/// 接続を拒否しないよう常に200 OKを返却する。
async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let request = RequestInfo::from_event(&event.payload);

    info!(
        connection_id = request.connection_id,
        request_id = request.request_id,
        source_ip = request.source_ip,
        request_time = request.request_time,
        event_type = "connect",
        "WebSocket接続"
    );

    let connect_handler = ConnectHandler::new(TracingLogSink::new("$connect"));

    Ok(connect_handler.handle(&event.payload))
}
