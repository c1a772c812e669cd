pub mod admin_context;
pub mod session_gate;

pub use admin_context::{admin_context_middleware, AdminContext};
pub use session_gate::require_admin_session;
