// アプリケーション層モジュール
pub mod connect_handler;
pub mod disconnect_handler;
pub mod message_handler;

// 再エクスポート
pub use connect_handler::ConnectHandler;
pub use disconnect_handler::DisconnectHandler;
pub use message_handler::{MessageHandler, MessageHandlerError};
