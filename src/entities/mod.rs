pub mod appointments;
pub mod notifications;
pub mod payments;
pub mod promotions;
pub mod reviews;
pub mod rooms;
pub mod service_categories;
pub mod services;
pub mod treatment_course_services;
pub mod treatment_courses;
pub mod treatment_package_services;
pub mod treatment_packages;
pub mod treatment_sessions;
pub mod users;
pub mod wallet_transactions;
pub mod wallets;

pub use appointments as appointment_entity;
pub use notifications as notification_entity;
pub use payments as payment_entity;
pub use promotions as promotion_entity;
pub use reviews as review_entity;
pub use rooms as room_entity;
pub use service_categories as service_category_entity;
pub use services as service_entity;
pub use treatment_course_services as course_service_entity;
pub use treatment_courses as course_entity;
pub use treatment_package_services as package_service_entity;
pub use treatment_packages as package_entity;
pub use treatment_sessions as session_entity;
pub use users as user_entity;
pub use wallet_transactions as wallet_transaction_entity;
pub use wallets as wallet_entity;

pub use appointments::AppointmentStatus;
pub use notifications::NotificationKind;
pub use payments::{PaymentMethod, PaymentPurpose, PaymentStatus};
pub use promotions::PromotionKind;
pub use treatment_courses::CourseStatus;
pub use treatment_sessions::SessionStatus;
pub use users::UserRole;
pub use wallet_transactions::{WalletTransactionDirection, WalletTransactionKind};
