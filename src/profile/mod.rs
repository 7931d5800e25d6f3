//! Persisted profile records that feed the system prompt and the
//! completion settings.

mod models;
pub use models::{CharacterProfile, ProfileKind, ScenarioProfile, Settings, UserProfile};

mod store;
pub use store::{
    JsonFileStore, ProfileRecord, ProfileStore, Profiles, load, load_value, parse_value, save,
    save_value,
};
