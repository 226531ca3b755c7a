//! Logged-in user record mirrored to local storage.
//!
//! # Invariants
//! - Serialized shape is `{name, email, bio, avatar, ...extra}`.
//! - Unknown fields survive a load/merge/save cycle through `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    /// Image URL; empty means the initials fallback is rendered.
    #[serde(default)]
    pub avatar: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Avatar fallback text: first letter of every name word, or `U`.
    pub fn initials(&self) -> String {
        let initials = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect::<String>();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Merges present patch fields; extra keys overwrite by name.
    pub fn merge(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        self.extra.extend(patch.extra);
    }
}

/// Profile form edits. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub extra: Map<String, Value>,
}
