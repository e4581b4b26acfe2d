//! The boundary to whatever draws the game.
//!
//! The game state issues commands through [`Renderer`] and never waits for or
//! reads back a result, except when loading assets at startup.

use std::path::PathBuf;

use serde::Serialize;
use tracing::trace;

use crate::{CardDefinition, Coordinate, Entity};

/// A required model or texture could not be found. Fatal at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingAsset {
    pub texture: String,
    pub path: PathBuf,
}

impl std::error::Error for MissingAsset {}

impl std::fmt::Display for MissingAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Texture '{}' was not found at {}",
            self.texture,
            self.path.display()
        )
    }
}

pub trait Renderer {
    /// Called once before the game starts, with every card that can appear.
    fn load_assets(&mut self, _cards: &[CardDefinition]) -> Result<(), MissingAsset> {
        Ok(())
    }
    /// Show `entity` at its position. `card` is set when it was placed from a card.
    fn place_visual(&mut self, entity: &Entity, card: Option<&CardDefinition>);
    fn remove_visual(&mut self, coord: Coordinate);
    fn animate_destruction(&mut self, entity: &Entity);
    /// Mark cells, e.g. where a selected piece could go. An empty slice clears the marks.
    fn highlight(&mut self, cells: &[Coordinate]);
}

/// Draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn place_visual(&mut self, _entity: &Entity, _card: Option<&CardDefinition>) {}

    fn remove_visual(&mut self, _coord: Coordinate) {}

    fn animate_destruction(&mut self, _entity: &Entity) {}

    fn highlight(&mut self, _cells: &[Coordinate]) {}
}

/// A command issued to a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RenderCommand {
    Place {
        entity: Entity,
        #[serde(skip_serializing_if = "Option::is_none")]
        texture: Option<String>,
    },
    Remove {
        coord: Coordinate,
    },
    Destroy {
        entity: Entity,
    },
    Highlight {
        cells: Vec<Coordinate>,
    },
}

/// Remembers every command instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct CommandLog {
    commands: Vec<RenderCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for CommandLog {
    fn place_visual(&mut self, entity: &Entity, card: Option<&CardDefinition>) {
        self.commands.push(RenderCommand::Place {
            entity: *entity,
            texture: card.map(|c| c.texture.clone()),
        });
    }

    fn remove_visual(&mut self, coord: Coordinate) {
        self.commands.push(RenderCommand::Remove { coord });
    }

    fn animate_destruction(&mut self, entity: &Entity) {
        self.commands.push(RenderCommand::Destroy { entity: *entity });
    }

    fn highlight(&mut self, cells: &[Coordinate]) {
        self.commands.push(RenderCommand::Highlight {
            cells: cells.to_vec(),
        });
    }
}

/// Checks that the art for every card exists as `<dir>/<texture>.png`, then
/// hands all commands to the wrapped renderer.
#[derive(Clone, Debug)]
pub struct AssetCatalog<R> {
    dir: PathBuf,
    inner: R,
}

impl<R: Renderer> AssetCatalog<R> {
    pub fn new(dir: impl Into<PathBuf>, inner: R) -> Self {
        Self {
            dir: dir.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn texture_path(&self, texture: &str) -> PathBuf {
        self.dir.join(format!("{}.png", texture))
    }
}

impl<R: Renderer> Renderer for AssetCatalog<R> {
    fn load_assets(&mut self, cards: &[CardDefinition]) -> Result<(), MissingAsset> {
        for card in cards {
            let path = self.texture_path(&card.texture);
            if !path.is_file() {
                return Err(MissingAsset {
                    texture: card.texture.clone(),
                    path,
                });
            }
            trace!(texture = %card.texture, "Found texture");
        }
        self.inner.load_assets(cards)
    }

    fn place_visual(&mut self, entity: &Entity, card: Option<&CardDefinition>) {
        self.inner.place_visual(entity, card)
    }

    fn remove_visual(&mut self, coord: Coordinate) {
        self.inner.remove_visual(coord)
    }

    fn animate_destruction(&mut self, entity: &Entity) {
        self.inner.animate_destruction(entity)
    }

    fn highlight(&mut self, cells: &[Coordinate]) {
        self.inner.highlight(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Side, ARCHETYPES};

    #[test]
    fn catalog_reports_first_missing_texture() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("assets");
        let mut catalog = AssetCatalog::new(&dir, CommandLog::new());
        let cards = vec![ARCHETYPES[0].card_for(Side::First)];
        let err = catalog.load_assets(&cards).unwrap_err();
        assert_eq!(err.texture, "Ace_kunoichi");
        assert_eq!(err.path, dir.join("Ace_kunoichi.png"));
    }

    #[test]
    fn catalog_accepts_empty_card_list() {
        let mut catalog = AssetCatalog::new("/nonexistent", NullRenderer);
        assert!(catalog.load_assets(&[]).is_ok());
    }
}
