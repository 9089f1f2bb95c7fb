//! Authentication: admin login, account signup and OTP password reset

mod session;
mod types;

use tracing::{info, warn};

use crate::catalog::Role;
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::transport::Transport;

pub use session::*;
pub use types::*;

/// Shown when a non-admin account tries to sign in
pub const ACCESS_DENIED: &str = "Access denied. Admin privileges required.";

/// Client for the `/api/auth` endpoints
#[derive(Clone, Debug)]
pub struct AuthClient {
    transport: Transport,
    options: ClientOptions,
}

impl AuthClient {
    pub(crate) fn new(transport: Transport, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    /// Sign in with email and password.
    ///
    /// The returned session becomes the bearer token of every client sharing
    /// this transport and is persisted when a session store is configured.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let data = self
            .transport
            .post("/api/auth/login")
            .json(&body)?
            .execute_data::<LoginData>()
            .await?;

        if self.options.require_admin && data.user.role != Role::Admin {
            warn!(email = %data.user.email, role = %data.user.role, "non-admin login rejected");
            return Err(Error::auth(ACCESS_DENIED));
        }

        let session = Session::new(data.token, data.user);
        self.transport.set_session(Some(session.clone()));
        if let Some(store) = &self.options.session_store {
            store.save(&session).await?;
        }

        info!(user_id = %session.user.id, "logged in");
        Ok(session)
    }

    /// Create an account
    pub async fn signup(&self, request: &SignupRequest) -> Result<User> {
        let data = self
            .transport
            .post("/api/auth/signup")
            .json(request)?
            .execute_data::<SignupData>()
            .await?;

        let user = data.into_user();
        info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    /// Check the account exists and email it a one-time code
    pub async fn send_reset_code(&self, email: &str) -> Result<()> {
        let body = OtpRequest {
            email,
            otp: None,
            new_password: None,
        };
        self.transport
            .post("/api/auth/validateUserAndSendOtp")
            .json(&body)?
            .execute_empty()
            .await
    }

    /// Confirm the one-time code is valid
    pub async fn verify_reset_code(&self, email: &str, otp: &str) -> Result<()> {
        let body = OtpRequest {
            email,
            otp: Some(otp),
            new_password: None,
        };
        self.transport
            .post("/api/auth/validate-otp")
            .json(&body)?
            .execute_empty()
            .await
    }

    /// Set a new password using a verified one-time code
    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<()> {
        let body = OtpRequest {
            email,
            otp: Some(otp),
            new_password: Some(new_password),
        };
        self.transport
            .post("/api/auth/reset-password-otp")
            .json(&body)?
            .execute_empty()
            .await
    }

    /// Load a previously persisted session, dropping it if expired
    pub async fn restore(&self) -> Result<Option<Session>> {
        let store = match &self.options.session_store {
            Some(store) => store,
            None => return Ok(None),
        };

        match store.load().await? {
            Some(session) if session.is_expired() => {
                info!(user_id = %session.user.id, "stored session expired");
                store.clear().await?;
                Ok(None)
            }
            Some(session) => {
                self.transport.set_session(Some(session.clone()));
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Forget the current session here and in the store
    pub async fn logout(&self) -> Result<()> {
        self.transport.set_session(None);
        if let Some(store) = &self.options.session_store {
            store.clear().await?;
        }
        info!("logged out");
        Ok(())
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.transport.session()
    }
}
