//! Run configuration for the terminal host.
//!
//! Layered as defaults, then environment (`BLOCKFALL_SEED`,
//! `BLOCKFALL_TICK_MS`), then command-line flags.

use std::env;

use anyhow::{anyhow, Result};
use log::warn;

use crate::types::TICK_MS;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the shape generator; `None` picks one from the clock
    pub seed: Option<u32>,
    /// Frame period of the host loop
    pub tick_ms: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`RunConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = lookup(SEED_VAR) {
            match v.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!("ignoring {}={:?}: not a u32", SEED_VAR, v),
            }
        }
        if let Some(v) = lookup(TICK_MS_VAR) {
            match v.trim().parse::<u32>() {
                Ok(ms) if ms > 0 => config.tick_ms = ms,
                _ => warn!("ignoring {}={:?}: not a positive integer", TICK_MS_VAR, v),
            }
        }
        config
    }

    /// Apply `--seed N` / `--tick-ms N` flags on top of `self`.
    ///
    /// `args` excludes the program name.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = Some(
                        v.parse::<u32>()
                            .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                    );
                }
                "--tick-ms" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --tick-ms"))?;
                    let ms = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --tick-ms value: {}", v))?;
                    if ms == 0 {
                        return Err(anyhow!("--tick-ms must be positive"));
                    }
                    self.tick_ms = ms;
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = RunConfig::from_lookup(|_| None);
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = RunConfig::from_lookup(|name| match name {
            SEED_VAR => Some("42".to_string()),
            TICK_MS_VAR => Some(" 33 ".to_string()),
            _ => None,
        });
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_ms, 33);
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let config = RunConfig::from_lookup(|name| match name {
            SEED_VAR => Some("abc".to_string()),
            TICK_MS_VAR => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn flags_override_env() {
        let base = RunConfig {
            seed: Some(1),
            tick_ms: 20,
        };
        let config = base
            .with_args(&args(&["--seed", "7", "--tick-ms", "10"]))
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_ms, 10);
    }

    #[test]
    fn flag_errors() {
        let base = RunConfig::default();
        assert!(base.with_args(&args(&["--seed"])).is_err());
        assert!(base.with_args(&args(&["--seed", "x"])).is_err());
        assert!(base.with_args(&args(&["--tick-ms", "0"])).is_err());
        assert!(base.with_args(&args(&["--fast"])).is_err());
        assert_eq!(base.with_args(&[]).unwrap(), base);
    }
}
