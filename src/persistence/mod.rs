//! Profile save/load
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp -> save, old save -> backup)
//! - Fallback to the backup when the save is corrupt (never when it is
//!   from a newer version)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, DriftResult};
use crate::profile::Profile;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Where the profile lives between sessions
pub trait ProfileStore {
    fn load(&mut self) -> DriftResult<Profile>;
    fn save(&mut self, profile: &Profile) -> DriftResult<()>;
}

/// Keeps the last saved profile in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<Profile>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            saved: Some(profile),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&Profile> {
        self.saved.as_ref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&mut self) -> DriftResult<Profile> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, profile: &Profile) -> DriftResult<()> {
        self.saved = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    profile: Profile,
}

/// JSON file on disk, with a `.bak` copy of the previous save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.sibling("bak")
    }

    fn read(path: &Path) -> DriftResult<Profile> {
        let json = fs::read_to_string(path)?;
        let envelope: SaveEnvelope = serde_json::from_str(&json)?;
        if envelope.version > SAVE_VERSION {
            return Err(DriftError::SaveVersion(envelope.version));
        }
        Ok(envelope.profile)
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&mut self) -> DriftResult<Profile> {
        if !self.path.exists() {
            log::info!("No save at {}, starting fresh", self.path.display());
            return Ok(Profile::default());
        }

        match Self::read(&self.path) {
            Ok(profile) => {
                log::info!("Loaded profile from {}", self.path.display());
                Ok(profile)
            }
            // Written by a newer build: never replace it with the older backup
            Err(err @ DriftError::SaveVersion(_)) => Err(err),
            Err(err) => {
                let backup = self.backup_path();
                if !backup.exists() {
                    return Err(err);
                }
                log::warn!("Save {} unreadable ({err}), trying backup", self.path.display());
                Self::read(&backup)
            }
        }
    }

    fn save(&mut self, profile: &Profile) -> DriftResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            profile: profile.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let tmp = self.sibling("tmp");
        fs::write(&tmp, json)?;
        if self.path.exists() {
            fs::copy(&self.path, self.backup_path())?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::UpgradeKind;

    fn sample_profile() -> Profile {
        let mut profile = Profile {
            coins: 321,
            record_drift_score: 4567,
            mute_music: true,
            ..Default::default()
        };
        profile.owned_cars[3] = true;
        profile
            .car_upgrades_mut("car_3")
            .set_level(UpgradeKind::Handling, 2);
        profile
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), Profile::default());
        store.save(&sample_profile()).unwrap();
        assert_eq!(store.load().unwrap(), sample_profile());
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("saves").join("profile.json"));

        assert_eq!(store.load().unwrap(), Profile::default());
        store.save(&sample_profile()).unwrap();

        let mut reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.load().unwrap(), sample_profile());
    }

    #[test]
    fn test_file_store_falls_back_to_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("profile.json"));

        store.save(&sample_profile()).unwrap();
        store.save(&Profile::default()).unwrap();
        assert!(store.backup_path().exists());

        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load().unwrap(), sample_profile());
    }

    #[test]
    fn test_file_store_corrupt_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "garbage").unwrap();
        let mut store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(DriftError::Json(_))));
    }

    #[test]
    fn test_rejects_future_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, r#"{"version": 99, "profile": {}}"#).unwrap();
        let mut store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(DriftError::SaveVersion(99))));
    }

    #[test]
    fn test_future_version_does_not_fall_back_to_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("profile.json"));
        store.save(&sample_profile()).unwrap();
        store.save(&sample_profile()).unwrap();
        assert!(store.backup_path().exists());

        let newer = r#"{"version": 2, "profile": {"coins": 9000}}"#;
        fs::write(store.path(), newer).unwrap();
        assert!(matches!(store.load(), Err(DriftError::SaveVersion(2))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), newer);
    }
}
