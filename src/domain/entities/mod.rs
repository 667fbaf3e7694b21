pub mod activity;
pub mod notification;
pub mod role;
pub mod user;

pub use activity::*;
pub use notification::*;
pub use role::*;
pub use user::*;
