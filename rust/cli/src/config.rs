//! Layered table configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults
//! 2. the TOML file named by `HOLDEM_CONFIG`
//! 3. `HOLDEM_SEED`, `HOLDEM_PLAYERS` and `HOLDEM_STACK`
//! 4. command-line flags
//!
//! The result is validated once all layers are applied.

use std::fs;
use std::str::FromStr;

use holdem_engine::errors::GameError;
use holdem_engine::game::{HandConfig, MAX_PLAYERS};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const PLAYERS_ENV: &str = "HOLDEM_PLAYERS";
pub const STACK_ENV: &str = "HOLDEM_STACK";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub starting_stack: u32,
    pub seed: Option<u64>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub ante: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 2,
            starting_stack: 1000,
            seed: None,
            small_blind: 10,
            big_blind: 20,
            ante: 0,
        }
    }
}

impl Config {
    pub fn hand_config(&self) -> HandConfig {
        HandConfig::new(self.small_blind, self.big_blind).with_ante(self.ante)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 || self.players > MAX_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "players must be between 2 and {MAX_PLAYERS}, got {}",
                self.players
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid(
                "starting_stack must be >0".into(),
            ));
        }
        self.hand_config().validate().map_err(|e| match e {
            GameError::ConfigurationError(msg) => ConfigError::Invalid(msg),
            other => ConfigError::Invalid(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub starting_stack: ValueSource,
    pub seed: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub ante: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            starting_stack: ValueSource::Default,
            seed: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            ante: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub players: Option<usize>,
    pub starting_stack: Option<u32>,
    pub seed: Option<u64>,
    pub small_blind: Option<u32>,
    pub big_blind: Option<u32>,
    pub ante: Option<u32>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    ante: Option<u32>,
}

/// Resolves every layer and validates the result.
pub fn resolve(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut resolved = load_with_sources()?;
    resolved.apply(overrides);
    resolved.config.validate()?;
    Ok(resolved)
}

/// Defaults, file and environment layers, unvalidated.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(f) = read_file()? {
        set(&mut cfg.players, &mut sources.players, f.players, ValueSource::File);
        set(
            &mut cfg.starting_stack,
            &mut sources.starting_stack,
            f.starting_stack,
            ValueSource::File,
        );
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        set(&mut cfg.small_blind, &mut sources.small_blind, f.small_blind, ValueSource::File);
        set(&mut cfg.big_blind, &mut sources.big_blind, f.big_blind, ValueSource::File);
        set(&mut cfg.ante, &mut sources.ante, f.ante, ValueSource::File);
    }

    if let Some(seed) = env_value::<u64>(SEED_ENV)? {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    set(&mut cfg.players, &mut sources.players, env_value(PLAYERS_ENV)?, ValueSource::Env);
    set(
        &mut cfg.starting_stack,
        &mut sources.starting_stack,
        env_value(STACK_ENV)?,
        ValueSource::Env,
    );

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Seed from `HOLDEM_SEED` or the file, ignoring every table setting.
pub fn resolve_seed() -> Result<Option<u64>, ConfigError> {
    if let Some(seed) = env_value::<u64>(SEED_ENV)? {
        return Ok(Some(seed));
    }
    Ok(read_file()?.and_then(|f| f.seed))
}

fn read_file() -> Result<Option<FileConfig>, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => {
            let s = fs::read_to_string(path)?;
            Ok(Some(toml::from_str(&s)?))
        }
        _ => Ok(None),
    }
}

impl ConfigResolved {
    pub fn apply(&mut self, o: &Overrides) {
        let (cfg, src) = (&mut self.config, &mut self.sources);
        set(&mut cfg.players, &mut src.players, o.players, ValueSource::Flag);
        set(&mut cfg.starting_stack, &mut src.starting_stack, o.starting_stack, ValueSource::Flag);
        if let Some(v) = o.seed {
            cfg.seed = Some(v);
            src.seed = ValueSource::Flag;
        }
        set(&mut cfg.small_blind, &mut src.small_blind, o.small_blind, ValueSource::Flag);
        set(&mut cfg.big_blind, &mut src.big_blind, o.big_blind, ValueSource::Flag);
        set(&mut cfg.ante, &mut src.ante, o.ante, ValueSource::Flag);
    }
}

fn set<T>(slot: &mut T, source: &mut ValueSource, value: Option<T>, from: ValueSource) {
    if let Some(v) = value {
        *slot = v;
        *source = from;
    }
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} is not a valid number: {raw:?}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_tables() {
        let bad = [
            Config { players: 1, ..Config::default() },
            Config { players: MAX_PLAYERS + 1, ..Config::default() },
            Config { starting_stack: 0, ..Config::default() },
            Config { small_blind: 0, ..Config::default() },
            Config { small_blind: 30, big_blind: 20, ..Config::default() },
        ];
        for cfg in bad {
            let e = cfg.validate().unwrap_err();
            assert!(e.to_string().contains("Invalid configuration"), "{e}");
        }
    }

    #[test]
    fn flags_override_and_record_their_source() {
        let mut resolved = ConfigResolved {
            config: Config::default(),
            sources: ConfigSources::default(),
        };
        resolved.apply(&Overrides {
            players: Some(6),
            seed: Some(9),
            ..Overrides::default()
        });
        assert_eq!(resolved.config.players, 6);
        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.players, ValueSource::Flag);
        assert_eq!(resolved.sources.starting_stack, ValueSource::Default);
    }
}
