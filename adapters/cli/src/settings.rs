//! TOML configuration file and its resolution into session parameters.

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tile_chase_core::{ContactModel, EncounterRule, RetryLimit, Terrain, TerrainKind};
use tile_chase_world::{Config, MapInstructions};

/// Adversaries placed when neither the file nor the flags say otherwise.
const DEFAULT_ADVERSARIES: usize = 10;
const DEFAULT_STEP: Duration = Duration::from_millis(500);
/// The built-in map is an open 10×10 field of generic terrain.
const DEFAULT_MAP_SIZE: usize = 10;

/// Contents of an optional configuration file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) map: Option<Vec<String>>,
    pub(crate) adversaries: Option<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) retry_limit: Option<u32>,
    pub(crate) encounter: Option<EncounterRule>,
    pub(crate) contact: Option<ContactModel>,
    pub(crate) start_paused: Option<bool>,
    pub(crate) tick_ms: Option<u64>,
    pub(crate) step_ms: Option<u64>,
    /// Extra or rebound map symbols, keyed by the symbol.
    #[serde(default)]
    pub(crate) terrain: BTreeMap<String, Terrain>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file at {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid config toml")
    }
}

/// Fully resolved parameters for one CLI session.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) instructions: MapInstructions,
    pub(crate) adversaries: usize,
    pub(crate) world: Config,
    pub(crate) tick_interval: Duration,
    pub(crate) step: Duration,
}

impl Settings {
    /// Applies defaults to every key the file left out.
    pub(crate) fn resolve(file: FileConfig) -> Result<Self> {
        let instructions = match file.map {
            Some(rows) => MapInstructions::from_rows(rows).context("invalid map in config")?,
            None => MapInstructions::from_rows(vec![" ".repeat(DEFAULT_MAP_SIZE); DEFAULT_MAP_SIZE])
                .context("invalid built-in map")?,
        };

        let mut world = Config::default();
        for (symbol, terrain) in file.terrain {
            let mut chars = symbol.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                bail!("terrain key `{symbol}` must be exactly one character");
            };
            let _ = world.catalog.insert(TerrainKind::new(symbol, terrain));
        }
        if let Some(attempts) = file.retry_limit {
            world.retry_limit = RetryLimit::new(attempts).context("invalid retry_limit")?;
        }
        if let Some(seed) = file.seed {
            world.rng_seed = seed;
        }
        world.encounter = file.encounter.unwrap_or_default();
        world.contact = file.contact.unwrap_or_default();
        world.start_paused = file.start_paused.unwrap_or(false);

        let tick_interval = file.tick_ms.map_or(
            tile_chase_system_wander_clock::DEFAULT_TICK_INTERVAL,
            Duration::from_millis,
        );
        let step = file.step_ms.map_or(DEFAULT_STEP, Duration::from_millis);

        Ok(Self {
            instructions,
            adversaries: file.adversaries.unwrap_or(DEFAULT_ADVERSARIES),
            world,
            tick_interval,
            step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_chase_core::OccupyEffect;

    #[test]
    fn empty_file_resolves_to_defaults() {
        let settings = Settings::resolve(FileConfig::parse("").expect("empty toml")).expect("valid");
        assert_eq!(settings.adversaries, 10);
        assert_eq!(settings.instructions.rows(), 10);
        assert_eq!(settings.instructions.columns(), 10);
        assert!((0..10).all(|row| (0..10).all(|column| {
            settings.instructions.symbol(row, column) == Some(' ')
        })));
        assert_eq!(settings.world.retry_limit, RetryLimit::DEFAULT);
        assert_eq!(settings.step, DEFAULT_STEP);
        assert!(!settings.world.start_paused);
    }

    #[test]
    fn file_keys_override_defaults() {
        let file = FileConfig::parse(
            r#"
            map = ["  o", "o  "]
            adversaries = 2
            seed = 99
            retry_limit = 25
            encounter = "aggressor_prevails"
            contact = "touching"
            start_paused = true
            tick_ms = 250
            step_ms = 125

            [terrain]
            o = "forest"
            "#,
        )
        .expect("valid toml");
        let settings = Settings::resolve(file).expect("valid settings");

        assert_eq!(settings.instructions.columns(), 3);
        assert_eq!(settings.adversaries, 2);
        assert_eq!(settings.world.rng_seed, 99);
        assert_eq!(settings.world.retry_limit.get(), 25);
        assert_eq!(settings.world.encounter, EncounterRule::AggressorPrevails);
        assert_eq!(settings.world.contact, ContactModel::Touching);
        assert!(settings.world.start_paused);
        assert_eq!(settings.tick_interval, Duration::from_millis(250));
        assert_eq!(settings.step, Duration::from_millis(125));
        assert_eq!(
            settings.world.catalog.get('o').and_then(|kind| kind.on_occupy()),
            Some(OccupyEffect::Forest)
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(FileConfig::parse("colour = \"red\"").is_err());
        assert!(FileConfig::parse("encounter = \"sideways\"").is_err());

        let zero = FileConfig::parse("retry_limit = 0").expect("valid toml");
        assert!(Settings::resolve(zero).is_err());

        let long_key = FileConfig::parse("[terrain]\nab = \"lava\"").expect("valid toml");
        assert!(Settings::resolve(long_key).is_err());
    }
}
