use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use cardchess::{GameConfig, HAND_CEILING};

/// Reads a [`GameConfig`] from a JSON file. Without a path, the defaults are used.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    if !path.is_file() {
        anyhow::bail!("Config file '{}' does not exist", path.display());
    }
    let reader = BufReader::new(File::open(path)?);
    let config: GameConfig = serde_json::from_reader(reader)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &GameConfig) -> anyhow::Result<()> {
    if config.initial_hand_size > HAND_CEILING {
        anyhow::bail!(
            "An initial hand of {} cards does not fit into a hand of at most {}",
            config.initial_hand_size,
            HAND_CEILING
        );
    }
    if config.copies_per_archetype == 0 {
        anyhow::bail!("Decks need at least one copy of each card");
    }
    Ok(())
}
