/// API Gateway WebSocketイベントのrequestContext
///
/// アクセスログ用にrequestContextから識別情報を抽出する。
/// 欠落したフィールドは`unknown`（数値は0）として扱い、エラーにはしない。
use serde_json::Value;

/// 欠落フィールドのプレースホルダー
pub const UNKNOWN: &str = "unknown";

/// requestContextから抽出したアクセス情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestInfo<'a> {
    /// API Gateway接続ID
    pub connection_id: &'a str,
    /// ルートキー（$connect, $disconnect, message）
    pub route_key: &'a str,
    /// API GatewayリクエストID
    pub request_id: &'a str,
    /// 接続元IP
    pub source_ip: &'a str,
    /// リクエスト受信時刻（ミリ秒エポック）
    pub request_time: i64,
}

impl<'a> RequestInfo<'a> {
    /// イベントからアクセス情報を抽出
    pub fn from_event(event: &'a Value) -> Self {
        let request_context = event.get("requestContext");

        let get_str = |key: &str| -> &'a str {
            request_context
                .and_then(|ctx| ctx.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or(UNKNOWN)
        };

        let source_ip = request_context
            .and_then(|ctx| ctx.get("identity"))
            .and_then(|identity| identity.get("sourceIp"))
            .and_then(|ip| ip.as_str())
            .unwrap_or(UNKNOWN);

        let request_time = request_context
            .and_then(|ctx| ctx.get("requestTimeEpoch"))
            .and_then(|time| time.as_i64())
            .unwrap_or(0);

        Self {
            connection_id: get_str("connectionId"),
            route_key: get_str("routeKey"),
            request_id: get_str("requestId"),
            source_ip,
            request_time,
        }
    }
}
