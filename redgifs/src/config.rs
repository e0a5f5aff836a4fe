//! Configuration of the redgifs client
//!
//! The configuration is a YAML tree built from:
//! 1. the default configuration embedded in the crate (`redgifs.yaml`),
//! 2. an optional `config.yaml` found in the configuration directory,
//! 3. environment overrides of the form `REDGIFS_CONFIG__TAGS__CUTOFF=0.8`.
//!
//! Keys are case-insensitive.
//!
//! ```no_run
//! use redgifs::{Config, Tags};
//!
//! # fn main() -> redgifs::Result<()> {
//! let config = Config::load_config("")?;
//! let mut tags = Tags::from_config(&config)?;
//! let best = tags.search("japanes")?;
//! # Ok(())
//! # }
//! ```

use crate::fuzzy::MatchOptions;
use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{info, warn};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("redgifs.yaml");

const ENV_CONFIG_DIR: &str = "REDGIFS_CONFIG";
const ENV_PREFIX: &str = "REDGIFS_CONFIG__";
const LOCAL_CONFIG_DIR: &str = ".redgifs";

const DEFAULT_API_BASE_URL: &str = "https://api.redgifs.com";

/// Macro to generate getter/setter for usize values with default
///
/// A missing or null value gives the default; anything else than a
/// non-negative integer is an error.
macro_rules! impl_usize_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<usize> {
            let path: &[&str] = $path;
            match self.get_value(path) {
                Ok(Value::Number(n)) => n
                    .as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| anyhow!("{} must be a non-negative integer, got {}", path.join("."), n)),
                Ok(Value::Null) | Err(_) => Ok($default),
                Ok(other) => Err(anyhow!(
                    "{} must be a non-negative integer, got {:?}",
                    path.join("."),
                    other
                )),
            }
        }

        pub fn $setter(&self, value: usize) -> Result<()> {
            self.set_value($path, Value::Number(Number::from(value as u64)))
        }
    };
}

/// Configuration manager for the redgifs client
#[derive(Debug)]
pub struct Config {
    /// Directory relative paths are resolved against
    config_dir: Option<PathBuf>,
    /// `config.yaml` written by [`Config::save`]
    path: Option<PathBuf>,
    data: Mutex<Value>,
}

impl Config {
    /// Finds the configuration directory
    ///
    /// In order: the given `directory`, the `REDGIFS_CONFIG` environment
    /// variable, `.redgifs` in the current directory, `.redgifs` in the home
    /// directory.
    fn find_config_dir(directory: &str) -> Option<PathBuf> {
        if !directory.is_empty() {
            return Some(PathBuf::from(directory));
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return Some(PathBuf::from(env_path));
        }

        let local = Path::new(LOCAL_CONFIG_DIR);
        if local.is_dir() {
            return Some(local.to_path_buf());
        }

        home_dir()
            .map(|home| home.join(LOCAL_CONFIG_DIR))
            .filter(|dir| dir.is_dir())
    }

    /// Loads the configuration from `directory` (or the default locations
    /// when empty)
    ///
    /// A missing directory or `config.yaml` is not an error: the embedded
    /// defaults are used.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        let path = config_dir.as_ref().map(|dir| dir.join("config.yaml"));

        let external = match &path {
            Some(p) if p.is_file() => {
                info!(config_file = %p.display(), "Loaded config file");
                Some(fs::read_to_string(p)?)
            }
            Some(p) => {
                info!(config_file = %p.display(), "Config file not found, using default embedded config");
                None
            }
            None => None,
        };

        let mut value = Self::build_value(external.as_deref())?;
        Self::apply_overrides(&mut value, env::vars());

        Ok(Config {
            config_dir,
            path,
            data: Mutex::new(value),
        })
    }

    /// Builds a configuration from YAML text merged over the defaults
    ///
    /// Environment overrides are not applied and nothing is ever saved.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(Config {
            config_dir: None,
            path: None,
            data: Mutex::new(Self::build_value(Some(yaml))?),
        })
    }

    fn build_value(external: Option<&str>) -> Result<Value> {
        let mut value = Self::lower_keys_value(serde_yaml::from_str(DEFAULT_CONFIG)?);
        if let Some(yaml) = external {
            let external_value = Self::lower_keys_value(serde_yaml::from_str(yaml)?);
            merge_yaml(&mut value, &external_value);
        }
        Ok(value)
    }

    /// Applies `REDGIFS_CONFIG__A__B=value` style overrides
    fn apply_overrides(config: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                let key_path = stripped.split("__").collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                if let Err(e) = Self::set_value_internal(config, &key_path, yaml_value) {
                    warn!(env_var = %key, "Ignoring configuration override: {}", e);
                }
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    let key = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    new_map.insert(key, Self::lower_keys_value(v));
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Value>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))
    }

    /// Saves the current configuration to `config.yaml`
    ///
    /// Does nothing for a configuration without a directory.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(&*self.lock()?)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Sets a value at `path` (e.g. `&["tags", "cutoff"]`)
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.lock()?;
        Self::set_value_internal(&mut data, path, value)
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key_value = Value::String(path[0].to_lowercase());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets the value at `path`
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.lock()?;
        let mut current = &*data;
        for (i, key) in path.iter().enumerate() {
            match current {
                Value::Mapping(map) => match map.get(&Value::String(key.to_lowercase())) {
                    Some(next) => current = next,
                    None => return Err(anyhow!("Path {} does not exist", path[..=i].join("."))),
                },
                _ => return Err(anyhow!("Path {} is not a mapping", path[..i].join("."))),
            }
        }
        Ok(current.clone())
    }

    // ============ Tags ============

    /// Snapshot file overriding the embedded one, if configured
    ///
    /// A relative path is resolved against the configuration directory.
    pub fn get_snapshot_path(&self) -> Result<Option<PathBuf>> {
        match self.get_value(&["tags", "snapshot_path"]) {
            Ok(Value::String(s)) if !s.is_empty() => {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    return Ok(Some(path));
                }
                Ok(Some(match &self.config_dir {
                    Some(dir) => dir.join(path),
                    None => path,
                }))
            }
            _ => Ok(None),
        }
    }

    pub fn set_snapshot_path(&self, path: Option<&Path>) -> Result<()> {
        let value = match path {
            Some(p) => Value::String(p.to_string_lossy().to_string()),
            None => Value::Null,
        };
        self.set_value(&["tags", "snapshot_path"], value)
    }

    impl_usize_config!(
        get_max_matches,
        set_max_matches,
        &["tags", "max_matches"],
        crate::fuzzy::DEFAULT_MAX_MATCHES
    );

    /// Minimum similarity ratio of a close match
    pub fn get_cutoff(&self) -> Result<f64> {
        match self.get_value(&["tags", "cutoff"]) {
            Ok(Value::Number(n)) => match n.as_f64() {
                Some(cutoff) if (0.0..=1.0).contains(&cutoff) => Ok(cutoff),
                _ => Err(anyhow!("tags.cutoff must be between 0 and 1, got {}", n)),
            },
            _ => Ok(crate::fuzzy::DEFAULT_CUTOFF),
        }
    }

    pub fn set_cutoff(&self, cutoff: f64) -> Result<()> {
        self.set_value(&["tags", "cutoff"], Value::Number(Number::from(cutoff)))
    }

    /// Close-match limits from `tags.max_matches` and `tags.cutoff`
    pub fn match_options(&self) -> Result<MatchOptions> {
        Ok(MatchOptions::new(self.get_max_matches()?, self.get_cutoff()?))
    }

    // ============ API ============

    pub fn get_api_base_url(&self) -> String {
        match self.get_value(&["api", "base_url"]) {
            Ok(Value::String(s)) if !s.is_empty() => s.trim_end_matches('/').to_string(),
            _ => DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn set_api_base_url(&self, url: &str) -> Result<()> {
        self.set_value(&["api", "base_url"], Value::String(url.to_string()))
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences are replaced.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}
