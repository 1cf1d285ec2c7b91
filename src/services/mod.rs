pub mod appointment_service;
pub mod auth_service;
pub mod catalog_service;
pub mod course_service;
pub mod notification_service;
pub mod payment_service;
pub mod promotion_service;
pub mod review_service;
pub mod room_service;
pub mod stats_service;
pub mod user_service;
pub mod wallet_service;

pub use appointment_service::*;
pub use auth_service::*;
pub use catalog_service::*;
pub use course_service::*;
pub use notification_service::*;
pub use payment_service::*;
pub use promotion_service::*;
pub use review_service::*;
pub use room_service::*;
pub use stats_service::*;
pub use user_service::*;
pub use wallet_service::*;
