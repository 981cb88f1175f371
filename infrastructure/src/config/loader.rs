//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// The concrete sources one load merges, lowest priority first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
    /// Prefix of environment overrides; `None` disables them
    pub env_prefix: Option<String>,
}

impl ConfigSources {
    /// Find the sources for a normal run from the current directory
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path().filter(|p| p.exists()),
            project: ConfigLoader::project_config_path(),
            explicit: explicit.map(Path::to_path_buf),
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all discovered sources
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(&ConfigSources::discover(config_path))
    }

    /// Merge the given sources over the defaults
    pub fn load_from(sources: &ConfigSources) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [&sources.global, &sources.project, &sources.explicit]
            .into_iter()
            .flatten()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(prefix) = &sources.env_prefix {
            figment = figment.merge(Env::prefixed(prefix).split("__"));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/council/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Render a configuration as TOML (for --show-config)
    pub fn render(config: &FileConfig) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(config)
    }

    /// Describe the config file locations being used
    pub fn describe_sources(sources: &ConfigSources) -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        if let Some(prefix) = &sources.env_prefix {
            lines.push(format!("  [ENV  ] Environment: {}<SECTION>__<KEY>", prefix));
        }
        match &sources.explicit {
            Some(path) => lines.push(format!("  [FOUND] Explicit: {}", path.display())),
            None => lines.push("  [     ] Explicit: --config <path>".to_string()),
        }
        match &sources.project {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./council.toml or ./.council.toml".to_string()),
        }
        match (&sources.global, Self::global_config_path()) {
            (Some(path), _) => lines.push(format!("  [FOUND] Global:  {}", path.display())),
            (None, Some(path)) => lines.push(format!("  [     ] Global:  {}", path.display())),
            (None, None) => {}
        }
        lines.push("  [     ] Default: built-in defaults".to_string());
        lines.join("\n")
    }
}
