// Story and character records consumed by the composers.
//
// These mirror the JSON document the story-writing language model returns:
//
//   { "title": "...", "content": "...",
//     "characters": [ { "name", "role", "description", "traits": [...] } ] }
//
// Deserialization is lenient in the places that reply has historically been
// sloppy: a missing or `null` `traits` array becomes empty, a missing
// `description` becomes empty, and a missing `characters` list becomes
// empty. The role stays a raw string; `Role::from_label` interprets it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::palette::Role;

/// One character as described by the story generator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub traits: Vec<String>,
}

impl CharacterInfo {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn role(&self) -> Role {
        Role::from_label(&self.role)
    }
}

/// A generated story before it is illustrated or stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub characters: Vec<CharacterInfo>,
}

impl StoryDraft {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
