/// WebSocket messageルートハンドラー
///
/// API Gateway WebSocketのmessageルートを処理し、
/// メッセージ本文と実行コンテキストをログに記録して固定レスポンスを返す。
///
/// デコード失敗・フィールドアクセス失敗はLambdaランタイムへエラーとして返却し、
/// ランタイム既定のエラー処理に委ねる。
use chat::application::MessageHandler;
use chat::domain::{RequestInfo, Response};
use chat::infrastructure::{TracingLogSink, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // Lambda関数を初期化して実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. requestContextからアクセス情報を取得してログ出力
/// 2. MessageHandlerでメッセージを処理
/// 3. 成功時は200 OK、失敗時はエラーをランタイムへ返却
async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let (payload, context) = event.into_parts();
    let request = RequestInfo::from_event(&payload);

    // メッセージボディを取得（ログ用、全文記録）
    let body = payload
        .get("body")
        .and_then(|b| b.as_str())
        .unwrap_or("(empty)");

    info!(
        connection_id = request.connection_id,
        request_id = request.request_id,
        route_key = request.route_key,
        source_ip = request.source_ip,
        request_time = request.request_time,
        event_type = "message",
        body = body,
        "WebSocketメッセージ受信"
    );

    let message_handler = MessageHandler::new(TracingLogSink::new("message"));

    match message_handler.handle(&payload, &context) {
        Ok(response) => Ok(response),
        Err(err) => {
            error!(
                connection_id = request.connection_id,
                error = %err,
                "メッセージ処理エラー"
            );
            Err(err.into())
        }
    }
}
