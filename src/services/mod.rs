pub mod event_service;
pub mod event_store;
pub mod notification_service;
pub mod session_service;
pub mod slug;
pub mod upload_service;
pub mod vendor_service;
pub mod writeup_service;
