//! Signed-in user session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile of the signed-in user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Channel the stat cards are built from
    pub youtube_channel: Option<String>,
}

/// Auth state handed to the dashboard.
///
/// The token lives here and nowhere else; signing out drops it together with
/// the profile.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    token: Option<String>,
    user: Option<UserProfile>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// An anonymous session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            token: None,
            user: None,
            signed_in_at: None,
        }
    }

    pub fn sign_in(&mut self, token: impl Into<String>, user: UserProfile) {
        self.token = Some(token.into());
        self.user = Some(user);
        self.signed_in_at = Some(Utc::now());
        tracing::info!(session = %self.id, "Signed in");
    }

    pub fn sign_out(&mut self) {
        if self.token.take().is_some() {
            tracing::info!(session = %self.id, "Signed out");
        }
        self.user = None;
        self.signed_in_at = None;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    /// The signed-in user's channel, if they configured one
    pub fn channel(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.youtube_channel.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.sign_in(
            "tok-123",
            UserProfile {
                first_name: "Sam".to_string(),
                youtube_channel: Some("rustlang".to_string()),
                ..UserProfile::default()
            },
        );
        assert_eq!(session.token(), Some("tok-123"));
        assert_eq!(session.channel(), Some("rustlang"));
        assert!(session.signed_in_at().is_some());

        session.sign_out();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(session.channel().is_none());
    }

    #[test]
    fn test_blank_channel_is_none() {
        let mut session = Session::new();
        session.sign_in(
            "t",
            UserProfile {
                youtube_channel: Some("  ".to_string()),
                ..UserProfile::default()
            },
        );
        assert!(session.channel().is_none());
    }
}
