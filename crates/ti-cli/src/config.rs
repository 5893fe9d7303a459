//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the sheet file.
    pub sheet_path: PathBuf,
    /// Editor used by `ti edit`; falls back to `$EDITOR` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            sheet_path: data_dir.join("sheet.json"),
            editor: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `<config dir>/ti/config.toml`, the given
    /// file, then `TI_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // TI_SHEET_PATH, TI_EDITOR
        figment = figment.merge(Env::prefixed("TI_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ti.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ti"))
}

/// Returns the platform-specific data directory for ti.
///
/// On Linux: `~/.local/share/ti`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ti"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_ti() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ti");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_sheet() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.sheet_path, data_dir.join("sheet.json"));
        assert!(config.editor.is_none());
    }

    #[test]
    fn test_explicit_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config_file = temp.path().join("config.toml");
        let sheet = temp.path().join("work.json");
        std::fs::write(
            &config_file,
            format!(
                "sheet_path = \"{}\"\neditor = \"vim -n\"\n",
                sheet.display()
            ),
        )
        .unwrap();

        let config = Config::load_from(Some(config_file.as_path())).unwrap();
        assert_eq!(config.sheet_path, sheet);
        assert_eq!(config.editor.as_deref(), Some("vim -n"));
    }
}
