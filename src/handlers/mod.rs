pub mod admin_handlers;
pub mod auth_handlers;
pub mod event_handlers;
pub mod health_handlers;
pub mod photo_handlers;
pub mod vendor_handlers;
