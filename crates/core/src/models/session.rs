//! Session and login models

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::UserType;

/// Current layout version of [`PersistedSession`]
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// Login form submission
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Login view state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            show_password: false,
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Reset the text fields after a successful login
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Payload returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: u64,
    pub username: String,
    pub user_type: UserType,
    pub image: Option<String>,
    pub token: TokenPair,
}

impl LoginResponse {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            user_type: Some(self.user_type),
            image: self.image.clone(),
        }
    }
}

/// The logged-in actor as seen by the views
///
/// Parsed from the persisted `userInfo` blob, so every field beyond
/// `id` and `username` is optional and unknown fields are ignored. A role
/// the console does not know reads as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
    #[serde(default, deserialize_with = "lenient_user_type")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserType {
    Name(String),
    Other(IgnoredAny),
}

fn lenient_user_type<'de, D>(deserializer: D) -> Result<Option<UserType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawUserType>::deserialize(deserializer)? {
        Some(RawUserType::Name(name)) => UserType::from_name(&name),
        Some(RawUserType::Other(_)) | None => None,
    })
}

/// Authentication state of the console
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Persisted data not yet checked for this load
    #[default]
    Unverified,
    Valid(Identity),
    Invalid,
}

impl SessionState {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Valid(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Consolidated session record written on login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub version: u32,
    pub id: Uuid,
    pub token: TokenPair,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
}

impl PersistedSession {
    pub fn new(token: TokenPair, identity: Identity) -> Self {
        Self {
            version: SESSION_SCHEMA_VERSION,
            id: Uuid::new_v4(),
            token,
            identity,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_minimal_blob() {
        let identity: Identity = serde_json::from_str(r#"{"id":1,"username":"john"}"#).unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "john");
        assert!(identity.user_type.is_none());
        assert!(identity.image.is_none());
    }

    #[test]
    fn test_identity_tolerates_unknown_role() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":1,"username":"john","user_type":"Employee"}"#).unwrap();
        assert_eq!(identity.username, "john");
        assert!(identity.user_type.is_none());

        let identity: Identity =
            serde_json::from_str(r#"{"id":1,"username":"john","user_type":7}"#).unwrap();
        assert!(identity.user_type.is_none());

        let identity: Identity =
            serde_json::from_str(r#"{"id":1,"username":"john","user_type":"Security Guard"}"#)
                .unwrap();
        assert_eq!(identity.user_type, Some(UserType::SecurityGuard));
    }

    #[test]
    fn test_identity_from_login_response_blob() {
        let response = LoginResponse {
            id: 4,
            username: "john".to_string(),
            user_type: UserType::Receptionist,
            image: None,
            token: TokenPair {
                access: "a".to_string(),
                refresh: "r".to_string(),
            },
        };
        let blob = serde_json::to_string(&response).unwrap();
        let identity: Identity = serde_json::from_str(&blob).unwrap();
        assert_eq!(identity, response.identity());
    }
}
