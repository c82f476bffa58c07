/// メッセージハンドラー
///
/// messageルートでLambdaが呼び出された際の処理を実行する。
/// イベントのbodyをJSONとしてデコードし、ネストしたmessageオブジェクトの
/// userとmessageをログに記録して固定レスポンスを返す。
use serde_json::Value;
use thiserror::Error;

use crate::domain::{FieldAccessError, JsonKind, Response, get_field, render_log_value};
use crate::infrastructure::LogSink;

/// メッセージ処理開始マーカー
pub const MESSAGE_START_MARKER: &str = "***Processing message";
/// メッセージ処理終了マーカー
pub const MESSAGE_END_MARKER: &str = "***End of message";
/// コンテキスト処理開始マーカー
pub const CONTEXT_START_MARKER: &str = "***Processing context";
/// コンテキスト処理終了マーカー
pub const CONTEXT_END_MARKER: &str = "***End of context";

/// メッセージハンドラーのエラー型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MessageHandlerError {
    /// bodyが欠落・文字列でない・JSONとして不正
    #[error("failed to decode body: {0}")]
    Decode(String),

    /// オブジェクト以外の値へのフィールドアクセス
    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),
}

/// WebSocketメッセージを処理するハンドラー
///
/// 記録はすべて注入されたLogSinkに対して同期的に行う。
/// エラーは捕捉せず呼び出し元へ伝播し、それまでに記録した行はそのまま残る。
pub struct MessageHandler<S>
where
    S: LogSink,
{
    /// ログ出力先
    sink: S,
}

impl<S> MessageHandler<S>
where
    S: LogSink,
{
    /// 新しいMessageHandlerを作成
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// メッセージイベントを処理
    ///
    /// # 処理フロー
    /// 1. 開始マーカーを記録
    /// 2. bodyをJSONとしてデコードし、エンベロープ全体を記録
    /// 3. messageペイロードを取り出して記録（欠落時はnull）
    /// 4. ペイロードのuser・messageを記録
    /// 5. 終了マーカー、コンテキストとその前後マーカーを記録
    /// 6. `{200, "Message"}`を返却
    ///
    /// # 引数
    /// * `event` - API Gateway WebSocketイベント
    /// * `context` - 実行コンテキスト（Debug表現をログに記録するのみ）
    ///
    /// # 戻り値
    /// * 成功時は`Ok(Response)`
    /// * デコード失敗時は`Err(MessageHandlerError::Decode)`
    /// * ペイロードがオブジェクトでない場合は`Err(MessageHandlerError::FieldAccess)`
    pub fn handle<C>(&self, event: &Value, context: &C) -> Result<Response, MessageHandlerError>
    where
        C: std::fmt::Debug + ?Sized,
    {
        self.sink.record(MESSAGE_START_MARKER);

        let envelope = decode_body(event)?;
        self.sink.record(&render_log_value(Some(&envelope)));

        // エンベロープ自体がオブジェクトでなければここでエラー
        let payload = get_field(Some(&envelope), "message")?;
        self.sink.record(&render_log_value(payload));

        let user = get_field(payload, "user")?;
        self.sink.record(&render_log_value(user));

        let message = get_field(payload, "message")?;
        self.sink.record(&render_log_value(message));

        self.sink.record(MESSAGE_END_MARKER);

        self.sink.record(CONTEXT_START_MARKER);
        self.sink.record(&format!("{:?}", context));
        self.sink.record(CONTEXT_END_MARKER);

        Ok(Response::message())
    }
}

/// イベントのbody文字列をJSONとしてデコード
fn decode_body(event: &Value) -> Result<Value, MessageHandlerError> {
    let body = match event.get("body") {
        Some(Value::String(body)) => body,
        Some(other) => {
            return Err(MessageHandlerError::Decode(format!(
                "body must be a string, got {}",
                JsonKind::of(Some(other))
            )));
        }
        None => return Err(MessageHandlerError::Decode("missing body".to_string())),
    };

    serde_json::from_str(body).map_err(|err| MessageHandlerError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JsonKind;
    use crate::infrastructure::log_sink::tests::MemoryLogSink;
    use serde_json::json;

    // ==================== テストヘルパー ====================

    /// テスト用のコンテキスト（Debug表現のみ使用される）
    const CONTEXT: &str = "Context { request_id: \"req-123\" }";

    fn create_test_handler() -> (MessageHandler<MemoryLogSink>, MemoryLogSink) {
        let sink = MemoryLogSink::new();
        let handler = MessageHandler::new(sink.clone());
        (handler, sink)
    }

    fn event_with_body(body: &str) -> Value {
        json!({
            "requestContext": {
                "connectionId": "test-connection-123",
                "routeKey": "message"
            },
            "body": body
        })
    }

    // ==================== 正常系 ====================

    #[test]
    fn test_handle_valid_message_returns_fixed_response() {
        let (handler, _) = create_test_handler();
        let event = event_with_body(r#"{"message": {"user": "alice", "message": "hi"}}"#);

        let response = handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(response, Response::ok("Message"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": "Message"})
        );
    }

    #[test]
    fn test_handle_records_lines_in_order() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#"{"message": {"user": "alice", "message": "hi"}}"#);

        handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "***Processing message",
                r#"{"message":{"user":"alice","message":"hi"}}"#,
                r#"{"user":"alice","message":"hi"}"#,
                "alice",
                "hi",
                "***End of message",
                "***Processing context",
                r#""Context { request_id: \"req-123\" }""#,
                "***End of context",
            ]
        );
    }

    #[test]
    fn test_handle_payload_without_user_records_null() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#"{"message": {"message": "hi"}}"#);

        let response = handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(response, Response::message());
        let lines = sink.lines();
        assert_eq!(lines[3], "null");
        assert_eq!(lines[4], "hi");
    }

    #[test]
    fn test_handle_ignores_extra_fields() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(
            r#"{"action": "message", "message": {"user": "bob", "message": "yo", "ts": 1}}"#,
        );

        let response = handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(response, Response::message());
        assert_eq!(sink.lines()[3], "bob");
    }

    #[test]
    fn test_handle_non_string_fields_are_rendered_as_json() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#"{"message": {"user": 42, "message": ["a", "b"]}}"#);

        handler.handle(&event, CONTEXT).unwrap();

        let lines = sink.lines();
        assert_eq!(lines[3], "42");
        assert_eq!(lines[4], r#"["a","b"]"#);
    }

    #[test]
    fn test_handle_is_idempotent() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#"{"message": {"user": "alice", "message": "hi"}}"#);

        let first = handler.handle(&event, CONTEXT).unwrap();
        let first_lines = sink.lines();
        sink.clear();
        let second = handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_lines, sink.lines());
    }

    #[test]
    fn test_handle_fault_is_repeatable() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body("{}");

        let first = handler.handle(&event, CONTEXT).unwrap_err();
        let first_lines = sink.lines();
        sink.clear();
        let second = handler.handle(&event, CONTEXT).unwrap_err();

        assert!(matches!(first, MessageHandlerError::FieldAccess(_)));
        assert_eq!(first, second);
        assert_eq!(first_lines, sink.lines());
    }

    #[test]
    fn test_handle_large_integer_is_recorded_exactly() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(
            r#"{"message": {"user": 123456789012345678901234567890, "message": "hi"}}"#,
        );

        handler.handle(&event, CONTEXT).unwrap();

        assert_eq!(sink.lines()[3], "123456789012345678901234567890");
    }

    // ==================== FieldAccessError ====================

    #[test]
    fn test_handle_missing_message_key_fails_on_field_access() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body("{}");

        let result = handler.handle(&event, CONTEXT);

        assert_eq!(
            result.unwrap_err(),
            MessageHandlerError::FieldAccess(FieldAccessError {
                key: "user".to_string(),
                found: JsonKind::Null,
            })
        );
        // 失敗までに記録した行は残る
        assert_eq!(sink.lines(), vec!["***Processing message", "{}", "null"]);
    }

    #[test]
    fn test_handle_null_message_fails_on_field_access() {
        let (handler, _) = create_test_handler();
        let event = event_with_body(r#"{"message": null}"#);

        let result = handler.handle(&event, CONTEXT);

        assert!(matches!(result, Err(MessageHandlerError::FieldAccess(_))));
    }

    #[test]
    fn test_handle_string_message_fails_on_field_access() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#"{"message": "hello"}"#);

        let err = handler.handle(&event, CONTEXT).unwrap_err();

        match err {
            MessageHandlerError::FieldAccess(err) => {
                assert_eq!(err.key, "user");
                assert_eq!(err.found, JsonKind::String);
            }
            _ => panic!("Expected FieldAccess"),
        }
        assert_eq!(sink.lines().last().unwrap(), "hello");
    }

    #[test]
    fn test_handle_string_envelope_recorded_raw_then_fails() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body(r#""hi""#);

        let err = handler.handle(&event, CONTEXT).unwrap_err();

        assert_eq!(
            err,
            MessageHandlerError::FieldAccess(FieldAccessError {
                key: "message".to_string(),
                found: JsonKind::String,
            })
        );
        assert_eq!(sink.lines(), vec!["***Processing message", "hi"]);
    }

    #[test]
    fn test_handle_non_object_envelope_fails_on_field_access() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body("[1, 2]");

        let err = handler.handle(&event, CONTEXT).unwrap_err();

        assert_eq!(
            err,
            MessageHandlerError::FieldAccess(FieldAccessError {
                key: "message".to_string(),
                found: JsonKind::Array,
            })
        );
        assert_eq!(sink.lines(), vec!["***Processing message", "[1,2]"]);
    }

    // ==================== DecodeError ====================

    #[test]
    fn test_handle_invalid_json_fails_on_decode() {
        let (handler, sink) = create_test_handler();
        let event = event_with_body("not valid json");

        let result = handler.handle(&event, CONTEXT);

        assert!(matches!(result, Err(MessageHandlerError::Decode(_))));
        // デコード前の開始マーカーのみ記録される
        assert_eq!(sink.lines(), vec!["***Processing message"]);
    }

    #[test]
    fn test_handle_missing_body_fails_on_decode() {
        let (handler, sink) = create_test_handler();
        let event = json!({"requestContext": {"connectionId": "conn-1"}});

        let result = handler.handle(&event, CONTEXT);

        assert_eq!(
            result.unwrap_err(),
            MessageHandlerError::Decode("missing body".to_string())
        );
        assert_eq!(sink.lines(), vec!["***Processing message"]);
    }

    #[test]
    fn test_handle_non_string_body_fails_on_decode() {
        let (handler, _) = create_test_handler();
        let event = json!({"body": {"message": {"user": "alice"}}});

        let result = handler.handle(&event, CONTEXT);

        assert_eq!(
            result.unwrap_err(),
            MessageHandlerError::Decode("body must be a string, got object".to_string())
        );
    }

    #[test]
    fn test_handle_empty_body_fails_on_decode() {
        let (handler, _) = create_test_handler();
        let event = event_with_body("");

        let result = handler.handle(&event, CONTEXT);

        assert!(matches!(result, Err(MessageHandlerError::Decode(_))));
    }

    // ==================== エラー型テスト ====================

    #[test]
    fn test_message_handler_error_display() {
        assert_eq!(
            MessageHandlerError::Decode("missing body".to_string()).to_string(),
            "failed to decode body: missing body"
        );
        assert_eq!(
            MessageHandlerError::FieldAccess(FieldAccessError {
                key: "user".to_string(),
                found: JsonKind::Null,
            })
            .to_string(),
            "cannot access field 'user' on null value"
        );
    }
}
