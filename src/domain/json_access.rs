/// JSON値への安全なフィールドアクセス
///
/// デコード済みのJSON値からキーで値を取り出す。
/// キーが存在しない場合は`None`、オブジェクト以外の値（nullを含む）に
/// キーアクセスした場合は`FieldAccessError`を返す。
use serde_json::Value;
use thiserror::Error;

/// JSON値の種別（エラー報告用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// 値の種別を判定する（値が存在しない場合はNull扱い）
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => JsonKind::Null,
            Some(Value::Bool(_)) => JsonKind::Bool,
            Some(Value::Number(_)) => JsonKind::Number,
            Some(Value::String(_)) => JsonKind::String,
            Some(Value::Array(_)) => JsonKind::Array,
            Some(Value::Object(_)) => JsonKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// オブジェクト以外の値へのキーアクセスエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot access field '{key}' on {found} value")]
pub struct FieldAccessError {
    /// 要求されたキー
    pub key: String,
    /// アクセス対象の値の種別
    pub found: JsonKind,
}

/// 値からキーに対応するフィールドを取得する
///
/// # 引数
/// * `target` - アクセス対象の値（`None`は値が存在しないことを表す）
/// * `key` - 取得するキー
///
/// # 戻り値
/// * `Ok(Some(&Value))` - キーが存在する場合
/// * `Ok(None)` - オブジェクトにキーが存在しない場合
/// * `Err(FieldAccessError)` - 対象がオブジェクトでない場合
///
/// # 例
/// ```
/// use chat::domain::get_field;
/// use serde_json::json;
///
/// let payload = json!({"user": "alice"});
/// assert_eq!(get_field(Some(&payload), "user").unwrap(), Some(&json!("alice")));
/// assert_eq!(get_field(Some(&payload), "message").unwrap(), None);
/// assert!(get_field(None, "user").is_err());
/// ```
pub fn get_field<'a>(target: Option<&'a Value>, key: &str) -> Result<Option<&'a Value>, FieldAccessError> {
    match target {
        Some(Value::Object(map)) => Ok(map.get(key)),
        other => Err(FieldAccessError {
            key: key.to_string(),
            found: JsonKind::of(other),
        }),
    }
}

/// ログ出力用に値を文字列化する
///
/// 文字列はクォートなしの生テキスト、null・欠落は`null`、
/// それ以外はコンパクトなJSONテキストとする。
pub fn render_log_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
