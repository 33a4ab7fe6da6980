//! Vendor partnership inquiries submitted from the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VendorInquiry {
    pub id: Uuid,
    pub company: String,
    pub contact: String,
    pub email: String,
    pub phone: Option<String>,
    /// Offered services, one entry per service.
    pub services: Vec<String>,
    pub notes: Option<String>,
    /// Event the vendor is interested in, if any.
    pub event_id: Option<Uuid>,
    pub received_at: DateTime<Utc>,
}

/// Form payload. `services` arrives as the comma-separated text field.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct VendorInquiryInput {
    pub company: String,
    pub contact: String,
    pub email: String,
    pub phone: Option<String>,
    pub services: String,
    pub notes: Option<String>,
    pub event_id: Option<Uuid>,
}
