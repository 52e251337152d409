//! Data models for the visitor console

mod device;
mod key;
mod pass;
mod report;
mod session;
mod user;
mod visitor;
mod zone;

use serde::{Deserialize, Deserializer};

pub use device::*;
pub use key::*;
pub use pass::*;
pub use report::*;
pub use session::*;
pub use user::*;
pub use visitor::*;
pub use zone::*;

/// Nullable patch field: absent stays `None`, `null` becomes `Some(None)`
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_patch_fields() {
        let absent: UserPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.email, None);

        let cleared: UserPatch = serde_json::from_str(r#"{"email":null}"#).unwrap();
        assert_eq!(cleared.email, Some(None));

        let set: UserPatch = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(set.email, Some(Some("a@b.c".to_string())));
    }
}
