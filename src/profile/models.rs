use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

/// The character the assistant plays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub occupation: String,
    pub background: String,
    pub personality: String,
    pub likes: String,
    pub dislikes: String,
    pub goals: String,
    pub fears: String,
    pub speaking_style: String,
    pub appearance: String,
}

/// The person chatting with the character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub occupation: String,
    pub interests: String,
    pub background: String,
    pub personality: String,
    pub goals: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioProfile {
    pub location: String,
    pub time: String,
    pub context: String,
    pub objectives: String,
}

/// Sampling settings forwarded to the completion endpoint. Values are
/// not range checked here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub temperature: f64,
    pub max_tokens: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Character,
    User,
    Scenario,
    Settings,
}

impl ProfileKind {
    pub fn all() -> [ProfileKind; 4] {
        [
            ProfileKind::Character,
            ProfileKind::User,
            ProfileKind::Scenario,
            ProfileKind::Settings,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Character => "character",
            ProfileKind::User => "user",
            ProfileKind::Scenario => "scenario",
            ProfileKind::Settings => "settings",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(anyhow!("Unknown profile kind: {}", s))
    }
}
