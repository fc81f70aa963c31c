use serde::{Deserialize, Serialize};

/// Anything that carries a stable identity key for list rendering.
pub trait Identifiable {
    type Id: Eq + Clone;

    fn identity(&self) -> &Self::Id;
}

/// A user's identity data as returned by the profile service.
///
/// Fields are private so a profile can't change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: String,
    name: String,
    #[serde(rename = "avatarURL")]
    avatar_url: String,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_url: avatar_url.into(),
        }
    }

    /// Decodes a profile from its JSON wire form (`id`, `name`, `avatarURL`).
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}

impl Identifiable for UserProfile {
    type Id = String;

    fn identity(&self) -> &String {
        &self.id
    }
}
