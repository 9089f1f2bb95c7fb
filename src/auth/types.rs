//! Types for authentication and user records

use serde::{Deserialize, Serialize};

use crate::catalog::Role;

/// A broker, buyer or admin account as the server reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub role: Role,

    /// Profile picture URL
    #[serde(default, alias = "avatar", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_agency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// Credentials posted to `/api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

/// Account creation payload for `/api/auth/signup`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_agency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
}

/// Signup responses come back either as `{ user }` or as the bare user
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignupData {
    Wrapped { user: User },
    Bare(User),
}

impl SignupData {
    pub(crate) fn into_user(self) -> User {
        match self {
            SignupData::Wrapped { user } | SignupData::Bare(user) => user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<&'a str>,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_accepts_mongo_id_and_avatar_alias() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "firstName": "Kevin",
            "lastName": "Adams",
            "email": "kevin@example.com",
            "role": "broker",
            "avatar": "https://cdn.example.com/k.png"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Broker);
        assert_eq!(user.image.as_deref(), Some("https://cdn.example.com/k.png"));
        assert_eq!(user.display_name(), "Kevin Adams");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_value(json!({
            "id": "u2",
            "email": "anon@example.com",
            "role": "buyer"
        }))
        .unwrap();
        assert_eq!(user.display_name(), "anon@example.com");
    }

    #[test]
    fn signup_request_uses_camel_case_and_skips_empty() {
        let request = SignupRequest {
            first_name: "Sara".into(),
            last_name: "Hassan".into(),
            email: "sara@example.com".into(),
            password: "secret123".into(),
            role: Some(Role::Broker),
            broker_id: Some("BR-9".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "Sara");
        assert_eq!(value["brokerId"], "BR-9");
        assert_eq!(value["role"], "broker");
        assert!(value.get("image").is_none());
    }
}
