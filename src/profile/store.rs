use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::models::{CharacterProfile, ProfileKind, ScenarioProfile, Settings, UserProfile};
use crate::ai::prompt::compose;

/// Durable storage for profile records, addressed by kind. Stores
/// deal in raw bytes so any key-value backend can implement it;
/// decoding and typed access go through `load` and `save`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns `None` when nothing has been saved for `kind` yet.
    async fn read(&self, kind: ProfileKind) -> Result<Option<Vec<u8>>, Error>;
    async fn write(&self, kind: ProfileKind, contents: &[u8]) -> Result<(), Error>;
}

/// A record with a fixed schema that lives under one profile kind.
pub trait ProfileRecord: Serialize + DeserializeOwned + Default + Send + Sync {
    const KIND: ProfileKind;
}

impl ProfileRecord for CharacterProfile {
    const KIND: ProfileKind = ProfileKind::Character;
}

impl ProfileRecord for UserProfile {
    const KIND: ProfileKind = ProfileKind::User;
}

impl ProfileRecord for ScenarioProfile {
    const KIND: ProfileKind = ProfileKind::Scenario;
}

impl ProfileRecord for Settings {
    const KIND: ProfileKind = ProfileKind::Settings;
}

/// Load a record, falling back to its defaults when it was never
/// saved or the stored contents can't be parsed (bad UTF-8, bad
/// syntax or fields of the wrong type).
pub async fn load<R: ProfileRecord>(store: &dyn ProfileStore) -> Result<R, Error> {
    let Some(contents) = store.read(R::KIND).await? else {
        return Ok(R::default());
    };

    match serde_json::from_slice::<R>(&contents) {
        Ok(record) => Ok(record),
        Err(e) => {
            tracing::warn!(
                "Stored {} profile is malformed, using defaults: {}",
                R::KIND,
                e
            );
            Ok(R::default())
        }
    }
}

pub async fn save<R: ProfileRecord>(store: &dyn ProfileStore, record: &R) -> Result<(), Error> {
    let contents = serde_json::to_vec_pretty(record)?;
    store.write(R::KIND, &contents).await?;
    tracing::debug!("Saved {} profile", R::KIND);
    Ok(())
}

/// Load the record for `kind` as JSON.
pub async fn load_value(store: &dyn ProfileStore, kind: ProfileKind) -> Result<Value, Error> {
    let value = match kind {
        ProfileKind::Character => serde_json::to_value(load::<CharacterProfile>(store).await?)?,
        ProfileKind::User => serde_json::to_value(load::<UserProfile>(store).await?)?,
        ProfileKind::Scenario => serde_json::to_value(load::<ScenarioProfile>(store).await?)?,
        ProfileKind::Settings => serde_json::to_value(load::<Settings>(store).await?)?,
    };
    Ok(value)
}

/// Parse `value` against the schema for `kind`. Fields not in the
/// schema are dropped and missing ones get their defaults.
pub fn parse_value(kind: ProfileKind, value: Value) -> Result<Value, serde_json::Error> {
    match kind {
        ProfileKind::Character => {
            serde_json::to_value(serde_json::from_value::<CharacterProfile>(value)?)
        }
        ProfileKind::User => serde_json::to_value(serde_json::from_value::<UserProfile>(value)?),
        ProfileKind::Scenario => {
            serde_json::to_value(serde_json::from_value::<ScenarioProfile>(value)?)
        }
        ProfileKind::Settings => serde_json::to_value(serde_json::from_value::<Settings>(value)?),
    }
}

/// Save an already parsed record for `kind`. See `parse_value`.
pub async fn save_value(
    store: &dyn ProfileStore,
    kind: ProfileKind,
    value: &Value,
) -> Result<(), Error> {
    let contents = serde_json::to_vec_pretty(value)?;
    store.write(kind, &contents).await?;
    tracing::debug!("Saved {} profile", kind);
    Ok(())
}

/// The three records that make up the system prompt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profiles {
    pub character: CharacterProfile,
    pub user: UserProfile,
    pub scenario: ScenarioProfile,
}

impl Profiles {
    pub async fn load(store: &dyn ProfileStore) -> Result<Self, Error> {
        Ok(Self {
            character: load(store).await?,
            user: load(store).await?,
            scenario: load(store).await?,
        })
    }

    pub fn system_prompt(&self) -> String {
        compose(&self.character, &self.user, &self.scenario)
    }
}

/// Stores each record as a pretty printed JSON file named after its
/// kind, e.g. `character.json`. Saves overwrite the whole file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: ProfileKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn read(&self, kind: ProfileKind) -> Result<Option<Vec<u8>>, Error> {
        match tokio::fs::read(self.path(kind)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, kind: ProfileKind, contents: &[u8]) -> Result<(), Error> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path(kind), contents).await?;
        Ok(())
    }
}
