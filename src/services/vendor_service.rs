//! Vendor inquiry intake.

use crate::{
    models::vendor::{VendorInquiry, VendorInquiryInput},
    services::notification_service::NotificationService,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum VendorError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
}

#[derive(Clone)]
pub struct VendorService {
    inquiries: Arc<RwLock<Vec<VendorInquiry>>>,
    notifications: NotificationService,
}

impl VendorService {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            inquiries: Arc::new(RwLock::new(Vec::new())),
            notifications,
        }
    }

    /// Validate and record an inquiry.
    pub async fn submit(&self, input: VendorInquiryInput) -> Result<VendorInquiry, VendorError> {
        let inquiry = match build_inquiry(input) {
            Ok(inquiry) => inquiry,
            Err(err) => {
                self.notifications.error(err.to_string());
                return Err(err);
            }
        };

        info!(
            "vendor inquiry from {} <{}>",
            inquiry.company, inquiry.email
        );
        self.inquiries.write().await.insert(0, inquiry.clone());
        self.notifications.success("Your inquiry has been received!");
        Ok(inquiry)
    }

    /// Newest first.
    pub async fn list(&self) -> Vec<VendorInquiry> {
        self.inquiries.read().await.clone()
    }
}

fn build_inquiry(input: VendorInquiryInput) -> Result<VendorInquiry, VendorError> {
    let company = required(&input.company, "company")?;
    let contact = required(&input.contact, "contact")?;
    let email = required(&input.email, "email")?;
    if !looks_like_email(&email) {
        return Err(VendorError::InvalidEmail(email));
    }

    let services: Vec<String> = input
        .services
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if services.is_empty() {
        return Err(VendorError::MissingField("services"));
    }

    Ok(VendorInquiry {
        id: Uuid::new_v4(),
        company,
        contact,
        email,
        phone: optional(input.phone),
        services,
        notes: optional(input.notes),
        event_id: input.event_id,
        received_at: Utc::now(),
    })
}

fn required(value: &str, field: &'static str) -> Result<String, VendorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(VendorError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;
    use chrono::Duration;

    fn input() -> VendorInquiryInput {
        VendorInquiryInput {
            company: " Bright Lights Co ".into(),
            contact: "Dana".into(),
            email: "dana@brightlights.com".into(),
            phone: Some("".into()),
            services: "lighting, staging,, sound ".into(),
            notes: None,
            event_id: None,
        }
    }

    #[tokio::test]
    async fn submit_parses_services_and_notifies() {
        let notifications = NotificationService::new(Duration::seconds(5));
        let vendors = VendorService::new(notifications.clone());
        let inquiry = vendors.submit(input()).await.unwrap();

        assert_eq!(inquiry.company, "Bright Lights Co");
        assert_eq!(inquiry.services, vec!["lighting", "staging", "sound"]);
        assert_eq!(inquiry.phone, None);
        assert_eq!(vendors.list().await.len(), 1);

        let recent = notifications.recent();
        assert_eq!(recent[0].message, "Your inquiry has been received!");
        assert_eq!(recent[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let vendors = VendorService::new(NotificationService::new(Duration::seconds(5)));

        let mut no_company = input();
        no_company.company = "   ".into();
        assert_eq!(
            vendors.submit(no_company).await.unwrap_err(),
            VendorError::MissingField("company")
        );

        let mut no_services = input();
        no_services.services = " , ".into();
        assert_eq!(
            vendors.submit(no_services).await.unwrap_err(),
            VendorError::MissingField("services")
        );
        assert!(vendors.list().await.is_empty());
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("ab.co"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@localhost"));
        assert!(!looks_like_email("a b@c.io"));
    }
}
