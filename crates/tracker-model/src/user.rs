//! Session user

use serde::{Deserialize, Serialize};

/// Sign-in state as reported by the backend's `user` query and the auth endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub signed_in: bool,
    #[serde(default)]
    pub given_name: Option<String>,
}

impl User {
    /// Anonymous visitor
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signed-in user with a display name
    #[must_use]
    pub fn signed_in(given_name: impl Into<String>) -> Self {
        Self {
            signed_in: true,
            given_name: Some(given_name.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_camel_case() {
        let user: User = serde_json::from_value(json!({ "signedIn": true, "givenName": "Ada" })).unwrap();
        assert_eq!(user, User::signed_in("Ada"));
    }

    #[test]
    fn missing_fields_mean_anonymous() {
        let user: User = serde_json::from_value(json!({})).unwrap();
        assert!(!user.signed_in);
    }
}
