/// Lambdaレスポンス
///
/// API Gateway WebSocketに返却する固定形のレスポンス。
use serde::Serialize;

/// messageルートの応答ボディ
pub const MESSAGE_BODY: &str = "Message";
/// $connectルートの応答ボディ
pub const CONNECTED_BODY: &str = "Connected";
/// $disconnectルートの応答ボディ
pub const DISCONNECTED_BODY: &str = "Disconnected";

/// HTTP形式のレスポンス `{ "statusCode": <int>, "body": <string> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// 200 OKのレスポンスを作成
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// messageルートのレスポンス（入力内容に依存しない）
    pub fn message() -> Self {
        Self::ok(MESSAGE_BODY)
    }

    pub fn connected() -> Self {
        Self::ok(CONNECTED_BODY)
    }

    pub fn disconnected() -> Self {
        Self::ok(DISCONNECTED_BODY)
    }
}
