//! Identity values exchanged during a sign-in attempt.

use serde::{Deserialize, Serialize};

/// Identity provider offered by the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Google
    Google,
    /// GitHub
    GitHub,
    /// Microsoft
    Microsoft,
}

impl ProviderKind {
    /// Name shown to users.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
            Self::Microsoft => "Microsoft",
        }
    }

    /// Short mark drawn in place of the provider's logo on text surfaces.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Google => "G",
            Self::GitHub => "GH",
            Self::Microsoft => "MS",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity assertion returned by the provider popup.
///
/// Not persisted; it is turned into a [`LoginRequest`] as soon as it arrives.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Provider-unique subject id.
    pub uid: String,
    /// Identity token to be verified by the backend.
    pub id_token: String,
    /// Email address, if the provider shared it.
    pub email: Option<String>,
    /// Display name, if the provider shared it.
    pub display_name: Option<String>,
    /// Avatar URL, if the provider shared it.
    pub photo_url: Option<String>,
}

impl Credential {
    /// Create a credential with only the mandatory fields.
    #[must_use]
    pub fn new(uid: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            id_token: id_token.into(),
            email: None,
            display_name: None,
            photo_url: None,
        }
    }

    /// Set the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the avatar URL.
    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

// Tokens never reach the logs
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("uid", &self.uid)
            .field("id_token", &"<redacted>")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("photo_url", &self.photo_url)
            .finish()
    }
}

/// Payload sent to the backend to establish an application session.
///
/// Field names on the wire are `idToken`, `email`, `name`, `photoURL`, `uid`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Identity token.
    pub id_token: String,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Provider-unique subject id.
    pub uid: String,
}

impl LoginRequest {
    /// Normalise a credential into a login request.
    #[must_use]
    pub fn from_credential(credential: Credential) -> Self {
        Self {
            id_token: credential.id_token,
            email: credential.email,
            name: credential.display_name,
            photo_url: credential.photo_url,
            uid: credential.uid,
        }
    }
}

impl From<Credential> for LoginRequest {
    fn from(credential: Credential) -> Self {
        Self::from_credential(credential)
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("id_token", &"<redacted>")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("photo_url", &self.photo_url)
            .field("uid", &self.uid)
            .finish()
    }
}

/// Result of the session-establishment action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Whether a session was established.
    pub success: bool,
    /// Message to show the user.
    #[serde(default)]
    pub message: String,
}

impl SessionResponse {
    /// A successful response.
    #[must_use]
    pub fn welcome(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A response that resolved but reported `success: false`.
    #[must_use]
    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("uid-42", "token-abc")
            .with_email("ada@example.com")
            .with_display_name("Ada")
            .with_photo_url("https://example.com/ada.png")
    }

    #[test]
    fn login_request_uses_backend_field_names() {
        let request = LoginRequest::from_credential(credential());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "idToken": "token-abc",
                "email": "ada@example.com",
                "name": "Ada",
                "photoURL": "https://example.com/ada.png",
                "uid": "uid-42",
            })
        );
    }

    #[test]
    fn missing_profile_fields_are_sent_as_null() {
        let request: LoginRequest = Credential::new("uid-1", "t").into();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["email"].is_null());
        assert!(json["photoURL"].is_null());
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let rendered = format!("{:?} {:?}", credential(), LoginRequest::from_credential(credential()));
        assert!(!rendered.contains("token-abc"));
        assert!(rendered.contains("uid-42"));
    }

    #[test]
    fn session_response_message_is_optional() {
        let response: SessionResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(response, SessionResponse::welcome(""));
    }
}
