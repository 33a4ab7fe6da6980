//! Shared application state handed to every handler.
//!
//! All services are built once from `AppConfig` in `main` and injected here;
//! nothing is looked up from globals.

use crate::{
    config::AppConfig,
    services::{
        event_service::EventService, notification_service::NotificationService,
        session_service::SessionService, upload_service::UploadService,
        vendor_service::VendorService, writeup_service::WriteupService,
    },
};
use chrono::Duration;

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub sessions: SessionService,
    pub notifications: NotificationService,
    pub uploads: UploadService,
    pub writeups: WriteupService,
    pub vendors: VendorService,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        // capped at one day
        let ttl = Duration::seconds(cfg.notification_ttl_secs.min(86_400) as i64);
        let notifications = NotificationService::new(ttl);

        Self {
            events: EventService::new(notifications.clone()),
            sessions: SessionService::new(cfg.login_policy()),
            uploads: UploadService::new(cfg.max_upload_bytes),
            writeups: WriteupService::new(cfg.writeup.clone()),
            vendors: VendorService::new(notifications.clone()),
            notifications,
        }
    }
}
