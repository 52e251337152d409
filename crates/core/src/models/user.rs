//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Console roles, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "Security Guard")]
    SecurityGuard,
    Receptionist,
    Admin,
}

impl UserType {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserType::SecurityGuard => "Security Guard",
            UserType::Receptionist => "Receptionist",
            UserType::Admin => "Admin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(UserType::Admin),
            "receptionist" => Some(UserType::Receptionist),
            "security guard" | "security_guard" | "security" => Some(UserType::SecurityGuard),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A console operator account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(rename = "user_name")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub image: Option<String>,
    #[serde(rename = "createdOn")]
    pub created_on: DateTime<Utc>,
    #[serde(rename = "updatedOn")]
    pub updated_on: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub user_type: UserType,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewUser {
    pub(crate) fn into_user(self, id: u64, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            user_type: self.user_type,
            image: self.image,
            created_on: now,
            updated_on: now,
        }
    }
}

/// Mutable user fields; `None` leaves the stored value untouched
///
/// Nullable fields take `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    pub user_type: Option<UserType>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
}

impl UserPatch {
    pub(crate) fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(user_type) = self.user_type {
            user.user_type = user_type;
        }
        if let Some(image) = self.image {
            user.image = image;
        }
    }
}
