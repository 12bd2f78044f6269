//! Game configuration
//!
//! Everything a restart keeps: the symbol set, the star thresholds, move
//! granularity and the two animation windows.
//!
//! # Environment Variables
//!
//! - `MEMORY_SEED`: u64 seed for the dealer
//! - `MEMORY_SYMBOLS`: comma-separated symbol names, each dealt twice
//! - `MEMORY_THRESHOLDS`: `three,two,one` move thresholds (e.g. `11,16,20`)
//! - `MEMORY_MOVE_COUNTING`: `turn` or `reveal`
//! - `MEMORY_RESOLUTION_DELAY_MS`: mismatch flip-back delay
//! - `MEMORY_SETTLE_DELAY_MS`: post-match settle delay
//! - `MEMORY_SHUFFLE`: `0` / `false` deals the symbols in order

use std::env;

use crate::deck::validate_pairing;
use crate::error::ConfigError;
use crate::scoring::StarThresholds;
use crate::types::{
    MoveCounting, SymbolId, CLASSIC_SYMBOLS, RESOLUTION_DELAY_MS, SETTLE_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Distinct symbols; each one is dealt onto two cards.
    pub symbols: Vec<SymbolId>,
    /// Exact card order to deal instead of doubling `symbols`.
    pub layout: Option<Vec<SymbolId>>,
    pub thresholds: StarThresholds,
    pub move_counting: MoveCounting,
    pub resolution_delay_ms: u32,
    pub settle_delay_ms: u32,
    /// Deal in symbol order when false.
    pub shuffle: bool,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: CLASSIC_SYMBOLS.iter().map(|s| SymbolId::new(*s)).collect(),
            layout: None,
            thresholds: StarThresholds::default(),
            move_counting: MoveCounting::PerTurn,
            resolution_delay_ms: RESOLUTION_DELAY_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            shuffle: true,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by any `MEMORY_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("MEMORY_SEED") {
            config.seed = parse_number("MEMORY_SEED", &v)?;
        }

        if let Some(v) = get("MEMORY_SYMBOLS") {
            config.symbols = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(SymbolId::new)
                .collect();
        }

        if let Some(v) = get("MEMORY_THRESHOLDS") {
            let parts = v
                .split(',')
                .map(|p| parse_number::<u32>("MEMORY_THRESHOLDS", p.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            let &[three, two, one] = parts.as_slice() else {
                return Err(ConfigError::InvalidValue {
                    key: "MEMORY_THRESHOLDS",
                    value: v,
                });
            };
            config.thresholds = StarThresholds::new(three, two, one)?;
        }

        if let Some(v) = get("MEMORY_MOVE_COUNTING") {
            config.move_counting =
                MoveCounting::from_str(&v).ok_or(ConfigError::InvalidValue {
                    key: "MEMORY_MOVE_COUNTING",
                    value: v,
                })?;
        }

        if let Some(v) = get("MEMORY_RESOLUTION_DELAY_MS") {
            config.resolution_delay_ms = parse_number("MEMORY_RESOLUTION_DELAY_MS", &v)?;
        }

        if let Some(v) = get("MEMORY_SETTLE_DELAY_MS") {
            config.settle_delay_ms = parse_number("MEMORY_SETTLE_DELAY_MS", &v)?;
        }

        if let Some(v) = get("MEMORY_SHUFFLE") {
            config.shuffle = match v.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MEMORY_SHUFFLE",
                        value: v,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_thresholds(mut self, thresholds: StarThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_move_counting(mut self, move_counting: MoveCounting) -> Self {
        self.move_counting = move_counting;
        self
    }

    /// Use `layout` verbatim as the deal and turn shuffling off.
    ///
    /// Handy for scripted games where card positions must be known.
    pub fn with_fixed_layout(mut self, layout: &[&str]) -> Self {
        self.layout = Some(layout.iter().map(|s| SymbolId::new(*s)).collect());
        self.shuffle = false;
        self
    }

    /// The full multiset of cards dealt by this configuration, in deal order.
    ///
    /// A fixed layout is dealt as written; otherwise every symbol is dealt
    /// twice. Shuffling only reorders the result.
    pub fn deal(&self) -> Vec<SymbolId> {
        match &self.layout {
            Some(layout) => layout.clone(),
            None => self
                .symbols
                .iter()
                .flat_map(|s| [s.clone(), s.clone()])
                .collect(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.deal().len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pairing(&self.deal())?;
        self.thresholds.validate()?;
        if self.resolution_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("resolution delay"));
        }
        if self.settle_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("settle delay"));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
