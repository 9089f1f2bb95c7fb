use tracing::info;
use validator::Validate;

use super::validation::{self, DIGITS};
use crate::auth::{AuthClient, SignupRequest, User};
use crate::catalog::Role;
use crate::error::{Error, Result, ValidationFailure};
use crate::notice::{Notice, Notifier};
use crate::storage::{ImageFile, StorageClient, UploadKind};

const LABELS: &[(&str, &str)] = &[("email", "Email"), ("phone", "Phone")];

/// Everything the "add broker" screen collects
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BrokerForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub title: String,
    pub country: String,
    pub address: String,
    pub postal_code: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(regex(path = *DIGITS, message = "Phone number must contain digits only"))]
    pub phone: String,

    pub broker_id: String,
    pub agency: String,
    pub previous_agency: String,
    pub agent_license: String,
    pub tax_number: String,

    pub password: String,
    pub confirm_password: String,
    pub avatar: Option<ImageFile>,
}

impl BrokerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local checks only; nothing is sent
    pub fn check(&self) -> Result<()> {
        let mut failure = ValidationFailure::default();
        for (label, value) in [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Date of birth", &self.dob),
            ("Title", &self.title),
            ("Country", &self.country),
            ("Address", &self.address),
            ("Postal code", &self.postal_code),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Broker ID", &self.broker_id),
            ("Agency", &self.agency),
            ("Previous agency", &self.previous_agency),
            ("Agent license", &self.agent_license),
            ("Tax number", &self.tax_number),
            ("Password", &self.password),
        ] {
            validation::require(&mut failure, label, value);
        }
        validation::require_some(&mut failure, "Photo", self.avatar.as_ref());

        validation::merge_format_errors(&mut failure, self.validate(), LABELS);
        if let Some(avatar) = &self.avatar {
            if !avatar.is_image() {
                failure.invalid(validation::IMAGES_ONLY);
            }
        }
        validation::check_passwords(&mut failure, &self.password, &self.confirm_password);
        validation::finish(failure)
    }

    fn signup_request(&self, image: Option<String>) -> SignupRequest {
        let text = |value: &str| Some(value.trim().to_string());
        SignupRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: Some(Role::Broker),
            phone: text(&self.phone),
            image,
            title: text(&self.title),
            dob: text(&self.dob),
            country: text(&self.country),
            address: text(&self.address),
            postal_code: text(&self.postal_code),
            broker_id: text(&self.broker_id),
            agency: text(&self.agency),
            previous_agency: text(&self.previous_agency),
            agent_license: text(&self.agent_license),
            tax_number: text(&self.tax_number),
        }
    }

    /// Upload the photo, then register the broker with its URL.
    ///
    /// The uploaded photo is discarded again if the signup is rejected.
    pub async fn submit(
        &self,
        auth: &AuthClient,
        storage: &StorageClient,
        notifier: &dyn Notifier,
    ) -> Result<User> {
        let checked = self.check().and_then(|()| {
            self.avatar
                .as_ref()
                .ok_or_else(|| Error::general("broker photo missing"))
        });
        let avatar = match checked {
            Ok(avatar) => std::slice::from_ref(avatar),
            Err(err) => {
                notifier.notify(Notice::from_error(&err, "Failed to add broker"));
                return Err(err);
            }
        };
        let outcome = storage
            .upload_then(avatar, UploadKind::User, |urls| async move {
                let request = self.signup_request(urls.into_iter().next());
                auth.signup(&request).await
            })
            .await;

        match outcome {
            Ok(user) => {
                info!(email = %user.email, "broker added");
                notifier.notify(Notice::success("Success", "Broker added successfully!"));
                Ok(user)
            }
            Err(err) => {
                notifier.notify(Notice::from_error(&err, "Failed to add broker"));
                Err(err)
            }
        }
    }
}
