//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `CHATLINE_BACKEND__KIND=session_rpc`
pub const ENV_PREFIX: &str = "CHATLINE_";

const PROJECT_FILENAMES: [&str; 2] = ["chatline.toml", ".chatline.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CHATLINE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./chatline.toml` or `./.chatline.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/chatline/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        Self::figment(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
            ENV_PREFIX,
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
        env_prefix: &str,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        // An explicit path must exist; Toml::file would silently skip it
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/chatline/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chatline").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./chatline.toml or ./.chatline.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const NO_ENV: &str = "CHATLINE_LOADER_TEST_UNSET_";

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.backend.kind, "direct");
        assert_eq!(config.session.max_chars, 2000);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("chatline"));
    }

    #[test]
    fn test_layering_priority() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[session]\nmax_chars = 100\ngreeting = \"global\"\n[output]\ncolor = false\n",
        );
        let project = write(
            dir.path(),
            "chatline.toml",
            "[session]\nmax_chars = 200\n",
        );
        let explicit = write(
            dir.path(),
            "explicit.toml",
            "[session]\ngreeting = \"explicit\"\n",
        );

        let config: FileConfig =
            ConfigLoader::figment(Some(&global), Some(&project), Some(&explicit), NO_ENV)
                .extract()
                .unwrap();

        assert_eq!(config.session.max_chars, 200);
        assert_eq!(config.session.greeting, "explicit");
        assert!(!config.output.color);
        assert_eq!(config.backend.direct.endpoint, "/api/chat");
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), Some(&missing), None, NO_ENV)
            .extract()
            .unwrap();
        assert_eq!(config.session.max_chars, 2000);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&missing), NO_ENV).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.toml", "[session]\nmax_chars = \"lots\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, Some(&bad), None, NO_ENV).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_files() {
        let prefix = "CHATLINE_LOADER_TEST_ENV_";
        // SAFETY: the variable names are unique to this test.
        unsafe {
            std::env::set_var(format!("{}BACKEND__KIND", prefix), "session_rpc");
            std::env::set_var(format!("{}SESSION__MAX_CHARS", prefix), "42");
        }
        let dir = tempfile::tempdir().unwrap();
        let project = write(
            dir.path(),
            "chatline.toml",
            "[session]\nmax_chars = 200\n",
        );

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), None, prefix)
            .extract()
            .unwrap();

        assert_eq!(config.backend.kind, "session_rpc");
        assert_eq!(config.session.max_chars, 42);
    }
}
