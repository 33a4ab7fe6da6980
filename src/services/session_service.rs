//! Identity derivation and the signed-in session table.
//!
//! There is no real authentication here: an email maps to one of two fixed
//! identities, and the password check mirrors the login form's shared demo
//! password.

use crate::models::user::{Role, User};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

pub const ADMIN_USER_ID: &str = "admin1";
pub const VOLUNTEER_USER_ID: &str = "volunteer1";

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error(
        "Invalid credentials. Use {admin} or {volunteer} with the configured password."
    )]
    InvalidCredentials { admin: String, volunteer: String },
}

/// Map an email to its identity.
///
/// Exactly `admin_email` yields the admin; every other address yields the
/// shared volunteer identity.
pub fn derive_user_from_email(email: &str, admin_email: &str) -> User {
    if email == admin_email {
        User {
            id: ADMIN_USER_ID.to_string(),
            email: email.to_string(),
            name: Some("Admin User".to_string()),
            role: Role::Admin,
        }
    } else {
        User {
            id: VOLUNTEER_USER_ID.to_string(),
            email: email.to_string(),
            name: Some("Volunteer User".to_string()),
            role: Role::Volunteer,
        }
    }
}

/// Addresses and shared password accepted by `login`.
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    pub admin_email: String,
    pub volunteer_email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<String, User>>>,
    policy: Arc<LoginPolicy>,
}

impl SessionService {
    pub fn new(policy: LoginPolicy) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            policy: Arc::new(policy),
        }
    }

    pub fn derive_user(&self, email: &str) -> User {
        derive_user_from_email(email, &self.policy.admin_email)
    }

    /// Check the demo credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let email = email.trim();
        let known = email == self.policy.admin_email || email == self.policy.volunteer_email;
        if !known || password != self.policy.password {
            warn!("rejected login for {}", email);
            return Err(SessionError::InvalidCredentials {
                admin: self.policy.admin_email.clone(),
                volunteer: self.policy.volunteer_email.clone(),
            });
        }

        let user = self.derive_user(email);
        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.clone());
        info!("{} signed in as {:?}", user.email, user.role);
        Ok(Session { token, user })
    }

    /// Clear the identity behind `token`. Returns whether a session existed.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn current_user(&self, token: &str) -> Option<User> {
        self.sessions.read().await.get(token).cloned()
    }
}
