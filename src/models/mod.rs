pub mod admin;
pub mod appointment;
pub mod catalog;
pub mod common;
pub mod course;
pub mod notification;
pub mod pagination;
pub mod payment;
pub mod promotion;
pub mod review;
pub mod room;
pub mod user;
pub mod wallet;

pub use admin::*;
pub use appointment::*;
pub use catalog::*;
pub use common::*;
pub use course::*;
pub use notification::*;
pub use pagination::*;
pub use payment::*;
pub use promotion::*;
pub use review::*;
pub use room::*;
pub use user::*;
pub use wallet::*;
