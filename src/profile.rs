//! Onboarding profile, persisted as JSON in the app data directory. A
//! missing or unreadable file just means onboarding has not happened yet.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};
use tauri::State;

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    Student,
    Employee,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Severe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub stress_factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub user_type: UserType,
    pub stress_level: StressLevel,
    pub goals: Vec<String>,
    pub personal: PersonalInfo,
}

pub struct ProfileStore {
    path: PathBuf,
    data: RwLock<Option<OnboardingProfile>>,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read profile from {}", path.display()))?;
            serde_json::from_str(&contents).ok()
        } else {
            None
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> Option<OnboardingProfile> {
        self.data.read().unwrap().clone()
    }

    pub fn save(&self, profile: OnboardingProfile) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = Some(profile);
            self.persist(guard.as_ref())?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        *guard = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove profile at {}", self.path.display()))?;
        }
        Ok(())
    }

    fn persist(&self, data: Option<&OnboardingProfile>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write profile to {}", self.path.display()))
    }
}

#[tauri::command]
pub fn get_profile(state: State<'_, AppState>) -> Option<OnboardingProfile> {
    state.profile.get()
}

#[tauri::command]
pub fn save_profile(state: State<'_, AppState>, profile: OnboardingProfile) -> Result<(), String> {
    state.profile.save(profile).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn clear_profile(state: State<'_, AppState>) -> Result<(), String> {
    state.profile.clear().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> OnboardingProfile {
        OnboardingProfile {
            user_type: UserType::Student,
            stress_level: StressLevel::High,
            goals: vec!["Sleep better".to_string()],
            personal: PersonalInfo {
                name: "Maya".to_string(),
                age: Some(21),
                occupation: "undergrad".to_string(),
                stress_factors: vec!["exams".to_string()],
            },
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mindease-profile-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_means_no_profile() {
        let store = ProfileStore::new(temp_path("missing")).unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn save_then_reload_round_trips() {
        let path = temp_path("roundtrip");
        let store = ProfileStore::new(path.clone()).unwrap();
        store.save(sample_profile()).unwrap();

        let reloaded = ProfileStore::new(path.clone()).unwrap();
        let profile = reloaded.get().unwrap();
        assert_eq!(profile.personal.name, "Maya");
        assert_eq!(profile.stress_level, StressLevel::High);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_file_is_treated_as_unonboarded() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();

        let store = ProfileStore::new(path.clone()).unwrap();
        assert!(store.get().is_none());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn clear_removes_file_and_memory() {
        let path = temp_path("clear");
        let store = ProfileStore::new(path.clone()).unwrap();
        store.save(sample_profile()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(store.get().is_none());
        assert!(!path.exists());
    }
}
