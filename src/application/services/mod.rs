pub mod activity_service;
pub mod notification_service;
pub mod permission_service;
pub mod session_service;

pub use activity_service::*;
pub use notification_service::*;
pub use permission_service::*;
pub use session_service::*;
