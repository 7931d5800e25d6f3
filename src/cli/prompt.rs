use anyhow::Result;

use crate::core::AppConfig;
use crate::profile::{JsonFileStore, Profiles};

pub async fn run() -> Result<()> {
    let config = AppConfig::default();
    let store = JsonFileStore::new(&config.storage_path);
    let profiles = Profiles::load(&store).await?;
    println!("{}", profiles.system_prompt());
    Ok(())
}
