use serde::{Deserialize, Serialize};
use std::fmt;

use super::fs::write_private;
use super::paths::DataDir;
use crate::auth::RelockPolicy;
use crate::error::Result;

/// Passcode accepted before the user configures one.
pub const DEFAULT_PASSCODE: &str = "1234";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub group_by_category: bool,
    pub use_biometric_auth: bool,
    pub require_auth_on_launch: bool,
    pub relock_policy: RelockPolicy,
    /// Placeholder credential for the passcode fallback. Compared verbatim.
    pub passcode: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            group_by_category: true,
            use_biometric_auth: true,
            require_auth_on_launch: true,
            relock_policy: RelockPolicy::default(),
            passcode: DEFAULT_PASSCODE.to_string(),
        }
    }
}

impl AppSettings {
    /// Keep at least one authentication requirement in force: with biometrics
    /// off, launch always asks for the passcode.
    pub fn normalized(mut self) -> Self {
        if !self.use_biometric_auth {
            self.require_auth_on_launch = true;
        }
        self
    }

    /// Restore the security toggles; display preferences and the passcode
    /// are kept.
    pub fn reset_security(&mut self) {
        let defaults = Self::default();
        self.use_biometric_auth = defaults.use_biometric_auth;
        self.require_auth_on_launch = defaults.require_auth_on_launch;
        self.relock_policy = defaults.relock_policy;
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("group_by_category", &self.group_by_category)
            .field("use_biometric_auth", &self.use_biometric_auth)
            .field("require_auth_on_launch", &self.require_auth_on_launch)
            .field("relock_policy", &self.relock_policy)
            .field("passcode", &"[REDACTED]")
            .finish()
    }
}

/// Settings as exposed to the presentation layer. The passcode is left out
/// so it can never be read back or replaced through this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub group_by_category: bool,
    pub use_biometric_auth: bool,
    pub require_auth_on_launch: bool,
    pub relock_policy: RelockPolicy,
}

impl From<&AppSettings> for SettingsView {
    fn from(settings: &AppSettings) -> Self {
        Self {
            group_by_category: settings.group_by_category,
            use_biometric_auth: settings.use_biometric_auth,
            require_auth_on_launch: settings.require_auth_on_launch,
            relock_policy: settings.relock_policy,
        }
    }
}

impl SettingsView {
    /// Copy the exposed fields onto `settings`, keeping its passcode.
    pub fn apply_to(&self, settings: &AppSettings) -> AppSettings {
        AppSettings {
            group_by_category: self.group_by_category,
            use_biometric_auth: self.use_biometric_auth,
            require_auth_on_launch: self.require_auth_on_launch,
            relock_policy: self.relock_policy,
            passcode: settings.passcode.clone(),
        }
        .normalized()
    }
}

pub fn load_settings(data_dir: &DataDir) -> Result<AppSettings> {
    let path = data_dir.settings_path();

    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings.normalized())
}

pub fn save_settings(data_dir: &DataDir, settings: &AppSettings) -> Result<()> {
    let path = data_dir.settings_path();
    let content = serde_json::to_string_pretty(settings)?;
    write_private(&path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::init(dir.path()).unwrap();

        let settings = load_settings(&data_dir).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(settings.group_by_category);
        assert!(settings.use_biometric_auth);
        assert!(settings.require_auth_on_launch);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::init(dir.path()).unwrap();

        let settings = AppSettings {
            group_by_category: false,
            relock_policy: RelockPolicy::OnBackground,
            ..AppSettings::default()
        };
        save_settings(&data_dir, &settings).unwrap();

        assert_eq!(load_settings(&data_dir).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::init(dir.path()).unwrap();
        std::fs::write(data_dir.settings_path(), r#"{"group_by_category": false}"#).unwrap();

        let settings = load_settings(&data_dir).unwrap();
        assert!(!settings.group_by_category);
        assert!(settings.use_biometric_auth);
        assert_eq!(settings.passcode, DEFAULT_PASSCODE);
    }

    #[test]
    fn test_disabling_biometrics_forces_launch_auth() {
        let settings = AppSettings {
            use_biometric_auth: false,
            require_auth_on_launch: false,
            ..AppSettings::default()
        }
        .normalized();
        assert!(settings.require_auth_on_launch);
    }

    #[test]
    fn test_reset_security_keeps_display_preferences() {
        let mut settings = AppSettings {
            group_by_category: false,
            use_biometric_auth: false,
            relock_policy: RelockPolicy::OnTerminate,
            ..AppSettings::default()
        };
        settings.reset_security();
        assert!(!settings.group_by_category);
        assert!(settings.use_biometric_auth);
        assert_eq!(settings.relock_policy, RelockPolicy::Never);
    }

    #[cfg(unix)]
    #[test]
    fn test_settings_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let data_dir = DataDir::init(dir.path()).unwrap();
        save_settings(&data_dir, &AppSettings::default()).unwrap();

        let mode = std::fs::metadata(data_dir.settings_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_view_never_carries_passcode() {
        let settings = AppSettings {
            passcode: "9876".into(),
            ..AppSettings::default()
        };
        let view = SettingsView::from(&settings);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("passcode"));
        assert!(!json.contains("9876"));

        let applied = SettingsView {
            use_biometric_auth: false,
            require_auth_on_launch: false,
            ..view
        }
        .apply_to(&settings);
        assert_eq!(applied.passcode, "9876");
        assert!(applied.require_auth_on_launch);
    }

    #[test]
    fn test_debug_redacts_passcode() {
        let debug = format!("{:?}", AppSettings::default());
        assert!(!debug.contains(DEFAULT_PASSCODE));
    }
}
