//! Configuration file loading and discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".policy-diff.yaml",
    ".policy-diff.yml",
    "policy-diff.yaml",
    "policy-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/policy-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let search_dirs = [
        std::env::current_dir().ok(),
        find_git_root(),
        dirs::config_dir().map(|dir| dir.join("policy-diff")),
        dirs::home_dir(),
    ];
    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI flags that
    /// were not given leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        if other.normalizer.schema_file.is_some() {
            self.normalizer
                .schema_file
                .clone_from(&other.normalizer.schema_file);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.width != super::defaults::DEFAULT_REPORT_WIDTH {
            self.output.width = other.output.width;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }

        if !other.diff.highlight {
            self.diff.highlight = false;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Policy Diff Configuration
# Place this file at .policy-diff.yaml in your project root or ~/.config/policy-diff/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Policy Diff Configuration File
# ===============================
#
# Place it at:
#   - .policy-diff.yaml in your project root
#   - ~/.config/policy-diff/policy-diff.yaml for global config
#
# CLI arguments always override file settings.

# Field normalizer
# YAML field schema replacing the built-in comparison fields:
#   schema_file: ./fields.yaml
normalizer: {}

# Output configuration
output:
  # Format: auto, summary, json, side-by-side, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false
  # Width of side-by-side output (minimum 40)
  width: 120

# Behavior flags
behavior:
  # Exit with code 1 if any clause changed
  fail_on_change: false
  # Suppress non-essential output
  quiet: false

# Version diff presentation
diff:
  # Mark words unique to each side of a modified clause
  highlight: true

# Waiting periods used by the eligibility command
eligibility:
  default_waiting_days: 30
  waiting_periods:
    - { treatment: general, label: General Treatment, days: 30 }
    - { treatment: hospitalization, label: Hospitalization, days: 30 }
    - { treatment: surgery, label: Surgical Procedure, days: 90 }
    - { treatment: maternity, label: Maternity Coverage, days: 730 }
    - { treatment: pre-existing, label: Pre-Existing Condition, days: 1095 }
    - { treatment: dental, label: Dental Treatment, days: 180 }
    - { treatment: vision, label: Vision Care, days: 90 }
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".policy-diff.yaml");
        std::fs::write(&config_path, "output:\n  format: json\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("policy-diff.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".policy-diff.yml"), "").unwrap();

        let found = find_config_in_dir(tmp.path()).unwrap();
        assert!(found.ends_with(".policy-diff.yml"));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
output:
  format: side-by-side
  width: 100
behavior:
  fail_on_change: true
diff:
  highlight: false
eligibility:
  default_waiting_days: 45
  waiting_periods:
    - { treatment: dental, label: Dental, days: 60 }
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.output.format, ReportFormat::SideBySide);
        assert_eq!(config.output.width, 100);
        assert!(config.behavior.fail_on_change);
        assert!(!config.diff.highlight);
        assert_eq!(config.eligibility.default_waiting_days, 45);
        assert_eq!(config.eligibility.waiting_periods.len(), 1);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "output: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.output.width = 90;
        let overrides = AppConfig::builder()
            .output_format(ReportFormat::Markdown)
            .fail_on_change(true)
            .highlight(false)
            .build();

        base.merge(&overrides);

        assert_eq!(base.output.format, ReportFormat::Markdown);
        // default width in overrides leaves the file value alone
        assert_eq!(base.output.width, 90);
        assert!(base.behavior.fail_on_change);
        assert!(!base.diff.highlight);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("output:"));
        assert!(example.contains("waiting_periods"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output:\n  format: json").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
