//! Records of the user-management service (`/api/...`).

use serde::{Deserialize, Serialize};

/// A user of the user-management service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FullUser {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Login name.
    #[serde(default)]
    pub login: String,
    /// Password; omitted from the body when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
}

impl FullUser {
    /// Starts building a user.
    #[must_use]
    pub fn builder() -> FullUserBuilder {
        FullUserBuilder::default()
    }
}

/// Fluent builder for [`FullUser`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct FullUserBuilder {
    inner: FullUser,
}

impl FullUserBuilder {
    /// Sets the login.
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.inner.login = login.into();
        self
    }

    /// Sets the password.
    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.inner.pass = Some(pass.into());
        self
    }

    /// Finishes the user.
    #[must_use]
    pub fn build(self) -> FullUser {
        self.inner
    }
}

/// Status block returned by most endpoints of the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Info {
    /// `success` or `fail`.
    #[serde(default)]
    pub status: String,
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
}

impl Info {
    /// Creates a status block.
    #[must_use]
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }
}

/// Body wrapper `{"info": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEnvelope {
    /// Status block.
    pub info: Info,
}

/// Credentials for `/api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtAuthData {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl JwtAuthData {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<&FullUser> for JwtAuthData {
    fn from(user: &FullUser) -> Self {
        Self::new(user.login.clone(), user.pass.clone().unwrap_or_default())
    }
}

/// Body of `PUT /api/user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordUpdate {
    /// New password.
    pub password: String,
}

impl PasswordUpdate {
    /// Creates the body.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_password_is_not_sent() {
        let user = FullUser::builder().login("aisen42").build();
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"login": "aisen42"}));
    }

    #[test]
    fn test_credentials_from_user() {
        let user = FullUser::builder().login("admin").pass("admin").build();
        assert_eq!(JwtAuthData::from(&user), JwtAuthData::new("admin", "admin"));
    }

    #[test]
    fn test_info_envelope_shape() {
        let envelope: InfoEnvelope = serde_json::from_value(json!({
            "info": {"status": "success", "message": "User created"}
        }))
        .unwrap();
        assert_eq!(envelope.info, Info::new("success", "User created"));
    }

    #[test]
    fn test_round_trip_keeps_server_id() {
        let sent = FullUser::builder().login("aisen7").pass("aisimem002").build();
        let mut echoed = serde_json::to_value(&sent).unwrap();
        echoed["id"] = json!(77);
        echoed["games"] = json!([]);

        let received: FullUser = serde_json::from_value(echoed).unwrap();
        assert_eq!(received.id, Some(77));
        assert_eq!(FullUser { id: None, ..received }, sent);
    }
}
