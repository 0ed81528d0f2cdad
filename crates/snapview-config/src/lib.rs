use serde::{Deserialize, Serialize};
use snapview_engine::providers::DEFAULT_STORY_SERVER;
use snapview_engine::{CallKind, CallVocabulary, RenderOptions, StructuredMode, UpdateScope};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Call identifiers recognised on top of the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraCalls {
    pub tests: Vec<String>,
    pub suites: Vec<String>,
    pub assertions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command re-recording one test; `$1` is the test path, `$2` the file.
    pub update_test_command: Option<String>,
    /// Command re-recording every test of a suite.
    pub update_file_command: Option<String>,
    /// Write each preview to `__snapshots__/output.html`.
    pub save_html: bool,
    /// Maximum snapshots per preview, 0 for all.
    pub preview_count: usize,
    /// Extra CSS added to every preview.
    pub css: String,
    /// Directory that root-relative asset paths resolve against. Defaults
    /// to `public` in the project root.
    pub public_path: Option<PathBuf>,
    pub story_server_url: String,
    /// Pretty-print serialized data snapshots instead of showing them as stored.
    pub reserialize_structured: bool,
    pub calls: ExtraCalls,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_test_command: None,
            update_file_command: None,
            save_html: false,
            preview_count: 0,
            css: String::new(),
            public_path: None,
            story_server_url: DEFAULT_STORY_SERVER.to_string(),
            reserialize_structured: false,
            calls: ExtraCalls::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded public path
        config.public_path = config
            .public_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/snapview");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The built-in call identifiers plus the configured extras.
    pub fn vocabulary(&self) -> CallVocabulary {
        let mut vocabulary = CallVocabulary::default();
        vocabulary.extend(CallKind::Test, self.calls.tests.iter().cloned());
        vocabulary.extend(CallKind::SuiteOrStory, self.calls.suites.iter().cloned());
        vocabulary.extend(CallKind::NamedAssertion, self.calls.assertions.iter().cloned());
        vocabulary
    }

    pub fn public_path(&self, project_root: &Path) -> PathBuf {
        self.public_path
            .clone()
            .unwrap_or_else(|| project_root.join("public"))
    }

    pub fn render_options(&self, project_root: &Path) -> RenderOptions {
        let structured = if self.reserialize_structured {
            StructuredMode::Reserialize
        } else {
            StructuredMode::Verbatim
        };

        RenderOptions::new(self.public_path(project_root).to_string_lossy())
            .with_extra_css(self.css.clone())
            .with_structured(structured)
            .with_max_entries(self.preview_count)
    }

    pub fn update_command(&self, scope: UpdateScope) -> Option<&str> {
        match scope {
            UpdateScope::Test => self.update_test_command.as_deref(),
            UpdateScope::File => self.update_file_command.as_deref(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
