use tracing::warn;
use validator::Validate;

use super::validation;
use crate::auth::{AuthClient, Session, ACCESS_DENIED};
use crate::error::{Error, Result, ValidationFailure};
use crate::store::SharedSlice;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password. Please try again.";

/// The sign-in screen.
///
/// Errors are shown inline under the form through the auth slice rather
/// than as a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn check(&self) -> Result<()> {
        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "Email", &self.email);
        validation::require(&mut failure, "Password", &self.password);
        validation::merge_format_errors(&mut failure, self.validate(), &[("email", "Email")]);
        validation::finish(failure)
    }

    /// Sign in and record the outcome in `slice`
    pub async fn submit(&self, auth: &AuthClient, slice: &SharedSlice<Session>) -> Result<Session> {
        let token = slice.begin().await;

        let outcome = match self.check() {
            Ok(()) => auth
                .login(self.email.trim(), &self.password)
                .await
                .map_err(sign_in_error),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(session) => {
                slice.finish(token, Ok(session.clone())).await;
                Ok(session)
            }
            Err(err) => {
                slice.finish(token, Err(err.user_message())).await;
                Err(err)
            }
        }
    }
}

/// Only the admin gate keeps its own wording; every other failure reads
/// the same so the form does not reveal which part was wrong.
fn sign_in_error(err: Error) -> Error {
    match err {
        Error::Auth(msg) if msg == ACCESS_DENIED => Error::Auth(msg),
        other => {
            warn!(error = %other, "sign-in failed");
            Error::auth(INVALID_CREDENTIALS)
        }
    }
}
