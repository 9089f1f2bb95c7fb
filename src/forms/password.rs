use tracing::info;
use validator::Validate;

use super::validation;
use crate::auth::AuthClient;
use crate::error::{Error, Result, ValidationFailure};

/// Where the reset flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStep {
    #[default]
    Email,
    Code,
    NewPassword,
    Done,
}

/// Forgotten-password flow: email, then one-time code, then new password.
///
/// Each step only advances after the server accepted the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PasswordReset {
    step: ResetStep,
    #[validate(email(message = "Please enter a valid email address"))]
    email: String,
    code: String,
}

impl PasswordReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn expect_step(&self, step: ResetStep) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(Error::general(format!(
                "password reset is at {:?}, not {:?}",
                self.step, step
            )))
        }
    }

    /// Step 1: ask the server to email a code to `email`
    pub async fn request_code(&mut self, auth: &AuthClient, email: &str) -> Result<()> {
        self.expect_step(ResetStep::Email)?;
        self.email = email.trim().to_string();

        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "Email", &self.email);
        validation::merge_format_errors(&mut failure, self.validate(), &[("email", "Email")]);
        validation::finish(failure)?;

        auth.send_reset_code(&self.email).await?;
        self.step = ResetStep::Code;
        Ok(())
    }

    /// Step 2: check the emailed code
    pub async fn verify_code(&mut self, auth: &AuthClient, code: &str) -> Result<()> {
        self.expect_step(ResetStep::Code)?;
        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "Code", code);
        validation::finish(failure)?;

        auth.verify_reset_code(&self.email, code.trim()).await?;
        self.code = code.trim().to_string();
        self.step = ResetStep::NewPassword;
        Ok(())
    }

    /// Step 3: set the new password; a mismatched confirmation never leaves
    /// the client
    pub async fn set_password(
        &mut self,
        auth: &AuthClient,
        password: &str,
        confirmation: &str,
    ) -> Result<()> {
        self.expect_step(ResetStep::NewPassword)?;
        let mut failure = ValidationFailure::default();
        validation::require(&mut failure, "New password", password);
        validation::check_passwords(&mut failure, password, confirmation);
        validation::finish(failure)?;

        auth.reset_password(&self.email, &self.code, password).await?;
        info!(email = %self.email, "password reset");
        self.step = ResetStep::Done;
        Ok(())
    }

    /// Go back to the email step, e.g. after an expired code
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}
