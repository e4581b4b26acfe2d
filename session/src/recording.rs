use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use cardchess::{GameState, Renderer, Side, TurnRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Writes finished games as numbered JSON files into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Writes `game_NNNNNN.json` and returns its path.
    pub fn write_game_recording(&mut self, recording: &GameRecording) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, recording)?;
        info!(path = %filepath.display(), "Wrote game recording");
        self.num += 1;
        Ok(filepath)
    }
}

/// Everything needed to follow a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecording {
    pub seed: u64,
    /// The turn counter when the game stopped.
    pub turns: u32,
    /// Indexed like the sides, first side first.
    pub scores: [u32; 2],
    pub moves: Vec<TurnRecord>,
}

impl GameRecording {
    pub fn from_state<R: Renderer>(seed: u64, state: &GameState<R>) -> Self {
        Self {
            seed,
            turns: state.turn(),
            scores: [Side::First, Side::Second].map(|side| state.player(side).score()),
            moves: state.history().chronological().into_iter().cloned().collect(),
        }
    }
}
