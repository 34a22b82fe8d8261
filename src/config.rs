use crate::error::{FfResult, FingerForgeError};
use crate::geometry::HandSide;
use crate::sizes::HandSize;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MIN_DEPTH: usize = 3;
pub const MAX_DEPTH: usize = 9;

#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub engine: EngineConfig,
    #[command(flatten)]
    pub hand: HandParams,
    #[command(flatten)]
    pub scope: PassageScope,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthMode {
    /// Grow the window while it spans at most `horizon` seconds.
    Auto { horizon: f32 },
    Fixed(usize),
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Use a constant window depth (clamped to 3..=9) instead of adapting it.
    #[arg(long)]
    pub fixed_depth: Option<usize>,

    #[arg(long, default_value_t = 3.5)]
    pub horizon_secs: f32,

    /// Log every fingering decision.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Split each window search across threads.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_depth: None,
            horizon_secs: 3.5,
            verbose: false,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn depth_mode(&self) -> DepthMode {
        match self.fixed_depth {
            Some(d) => DepthMode::Fixed(d.clamp(MIN_DEPTH, MAX_DEPTH)),
            None => DepthMode::Auto {
                horizon: self.horizon_secs,
            },
        }
    }
}

#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandParams {
    #[arg(long, default_value_t = HandSide::Right)]
    pub side: HandSide,
    #[arg(long, default_value_t = HandSize::M)]
    pub size: HandSize,
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageScope {
    #[arg(long, default_value_t = 0)]
    pub start_measure: u32,
    #[arg(long, default_value_t = 1000)]
    pub measure_limit: u32,
}

impl Default for PassageScope {
    fn default() -> Self {
        Self {
            start_measure: 0,
            measure_limit: 1000,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FingerForgeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let cfg: Config = serde_json::from_str(&content)?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn check(&self) -> FfResult<()> {
        if !(self.engine.horizon_secs.is_finite() && self.engine.horizon_secs > 0.0) {
            return Err(FingerForgeError::Config(format!(
                "horizon_secs must be positive, got {}",
                self.engine.horizon_secs
            )));
        }
        Ok(())
    }

    /// Overlays flags typed on the command line onto a file-loaded config.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field;
                }
            };
        }

        update_if_present!(engine.fixed_depth);
        update_if_present!(engine.horizon_secs);
        update_if_present!(engine.verbose);
        update_if_present!(engine.parallel);

        update_if_present!(hand.side);
        update_if_present!(hand.size);

        update_if_present!(scope.start_measure);
        update_if_present!(scope.measure_limit);
    }
}
