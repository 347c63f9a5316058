use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::SkillVocabulary;
use crate::error::{Result, ScoutError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub vocabulary: SkillVocabulary,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, scout_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SCOUT_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(scout_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document as a patch over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| ScoutError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("scout/config.toml"))
    }

    fn load_project(scout_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&scout_root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ScoutError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| ScoutError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.vocabulary {
            merge_vocabulary(&mut self.vocabulary, patch);
        }
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if env_bool("SCOUT_ROBOT").unwrap_or(false) {
            self.robot.format = "json".to_string();
        }

        if let Some(value) = env_string("SCOUT_SEARCH_EMBEDDING_BACKEND") {
            self.search.embedding_backend = value;
        }
        if let Some(value) = env_u32("SCOUT_SEARCH_EMBEDDING_DIMS")? {
            self.search.embedding_dims = value;
        }
        if let Some(value) = env_u32("SCOUT_SEARCH_OVERSAMPLE_FACTOR")? {
            self.search.oversample_factor = value;
        }
        if let Some(value) = env_f64("SCOUT_SEARCH_SEMANTIC_WEIGHT")? {
            self.search.semantic_weight = value;
        }
        if let Some(value) = env_f64("SCOUT_SEARCH_SKILL_WEIGHT")? {
            self.search.skill_weight = value;
        }
        if let Some(value) = env_u32("SCOUT_SEARCH_DEFAULT_TOP_K")? {
            self.search.default_top_k = value;
        }

        if let Some(values) = env_list("SCOUT_VOCABULARY_QUERY_SKILLS") {
            self.vocabulary.query_skills = values;
        }
        if let Some(values) = env_list("SCOUT_VOCABULARY_RESUME_SKILLS") {
            self.vocabulary.resume_skills = values;
        }

        if let Some(value) = env_string("SCOUT_STORAGE_DATABASE") {
            self.storage.database = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub embedding_backend: String,
    #[serde(default)]
    pub embedding_dims: u32,
    /// Semantic candidates fetched per requested result
    #[serde(default)]
    pub oversample_factor: u32,
    #[serde(default)]
    pub semantic_weight: f64,
    #[serde(default)]
    pub skill_weight: f64,
    #[serde(default)]
    pub default_top_k: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            embedding_backend: "hash".to_string(),
            embedding_dims: 384,
            oversample_factor: 3,
            semantic_weight: 0.6,
            skill_weight: 0.4,
            default_top_k: 5,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.embedding_backend {
            self.embedding_backend = value;
        }
        if let Some(value) = patch.embedding_dims {
            self.embedding_dims = value;
        }
        if let Some(value) = patch.oversample_factor {
            self.oversample_factor = value;
        }
        if let Some(value) = patch.semantic_weight {
            self.semantic_weight = value;
        }
        if let Some(value) = patch.skill_weight {
            self.skill_weight = value;
        }
        if let Some(value) = patch.default_top_k {
            self.default_top_k = value;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.embedding_dims == 0 {
            return Err(ScoutError::Config(
                "search.embedding_dims must be greater than 0".to_string(),
            ));
        }
        if self.oversample_factor == 0 {
            return Err(ScoutError::Config(
                "search.oversample_factor must be at least 1".to_string(),
            ));
        }
        for (key, value) in [
            ("semantic_weight", self.semantic_weight),
            ("skill_weight", self.skill_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoutError::Config(format!(
                    "search.{key} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file name, relative to the scout root
    #[serde(default)]
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: "scout.db".to_string(),
        }
    }
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.database {
            self.database = value;
        }
    }

    /// Database path resolved against `scout_root` (absolute paths win)
    pub fn database_path(&self, scout_root: &Path) -> PathBuf {
        scout_root.join(&self.database)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub format: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub search: Option<SearchPatch>,
    pub vocabulary: Option<VocabularyPatch>,
    pub storage: Option<StoragePatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub embedding_backend: Option<String>,
    pub embedding_dims: Option<u32>,
    pub oversample_factor: Option<u32>,
    pub semantic_weight: Option<f64>,
    pub skill_weight: Option<f64>,
    pub default_top_k: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct VocabularyPatch {
    pub version: Option<u32>,
    pub query_skills: Option<Vec<String>>,
    pub resume_skills: Option<Vec<String>>,
    pub title_keywords: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
}

fn merge_vocabulary(vocabulary: &mut SkillVocabulary, patch: VocabularyPatch) {
    if let Some(value) = patch.version {
        vocabulary.version = value;
    }
    if let Some(values) = patch.query_skills {
        vocabulary.query_skills = values;
    }
    if let Some(values) = patch.resume_skills {
        vocabulary.resume_skills = values;
    }
    if let Some(values) = patch.title_keywords {
        vocabulary.title_keywords = values;
    }
    if let Some(values) = patch.locations {
        vocabulary.locations = values;
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|err| ScoutError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| ScoutError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
