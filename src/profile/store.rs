use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use crate::profile::UserPreferences;
use crate::PopupItem;

pub struct ProfileStore {
    path: PathBuf,
    profiles: RwLock<HashMap<String, UserPreferences>>,
}

impl ProfileStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let profiles = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read profiles: {}", err))?;
            if data.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse profiles: {}", err))?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            profiles: RwLock::new(profiles),
        })
    }

    pub async fn list(&self) -> Vec<UserPreferences> {
        let guard = self.profiles.read().await;
        guard.values().cloned().collect()
    }

    pub async fn get(&self, user_id: &str) -> Option<UserPreferences> {
        let guard = self.profiles.read().await;
        guard.get(user_id).cloned()
    }

    pub async fn upsert(&self, profile: UserPreferences) -> Result<UserPreferences, String> {
        let mut guard = self.profiles.write().await;
        guard.insert(profile.user_id.clone(), profile.clone());
        self.persist(&guard).await?;
        Ok(profile)
    }

    pub async fn record_interaction(
        &self,
        user_id: &str,
        item: &PopupItem,
        hour: Option<u8>,
    ) -> Result<UserPreferences, String> {
        let mut guard = self.profiles.write().await;
        let profile = guard
            .get_mut(user_id)
            .ok_or_else(|| format!("user profile not found: {}", user_id))?;
        profile.update_from_interaction(item, hour);
        let updated = profile.clone();
        self.persist(&guard).await?;
        Ok(updated)
    }

    async fn persist(&self, profiles: &HashMap<String, UserPreferences>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(profiles)
            .map_err(|err| format!("failed to serialize profiles: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write profiles: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize profiles: {}", err))?;
        debug!(profiles = profiles.len(), path = %self.path.display(), "profiles persisted");
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create profile dir: {}", err))
}
