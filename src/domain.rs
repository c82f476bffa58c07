// Domain layer modules
pub mod json_access;
pub mod request_context;
pub mod response;

// Re-exports
pub use json_access::{FieldAccessError, JsonKind, get_field, render_log_value};
pub use request_context::RequestInfo;
pub use response::Response;
