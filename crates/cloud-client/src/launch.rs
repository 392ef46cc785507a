//! Identity passed in by whoever launched the studio.

use reqwest::Url;

/// Value sent as `user_id` when none was supplied.
pub const ANONYMOUS_USER: &str = "anonymous";

/// The launch URL could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid launch URL: {0}")]
pub struct LaunchError(pub String);

/// `user_id` and `security_code` from the launch URL. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub user_id: Option<String>,
    pub security_code: Option<String>,
}

impl LaunchParams {
    pub fn new(user_id: Option<String>, security_code: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|v| !v.trim().is_empty()),
            security_code: security_code.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Read the parameters from a full launch URL.
    pub fn from_url(url: &str) -> Result<Self, LaunchError> {
        let parsed = Url::parse(url).map_err(|e| LaunchError(e.to_string()))?;
        let mut user_id = None;
        let mut security_code = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "user_id" => user_id = Some(value.into_owned()),
                "security_code" => security_code = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(Self::new(user_id, security_code))
    }

    pub fn user_id_or_anonymous(&self) -> &str {
        self.user_id.as_deref().unwrap_or(ANONYMOUS_USER)
    }
}
