use std::io::BufRead;
use std::time::Duration;

use cardchess::{
    DecisionMaker, GameState, InputController, InputEvent, InputOutcome, PlayerId, Renderer,
    TurnChange,
};
use tracing::{debug, trace, warn};

enum Controller {
    /// JSON-lines [`InputEvent`]s, one per line.
    Human {
        input: InputController,
        events: Box<dyn BufRead>,
        // A re-usable buffer for reading events.
        // Should always be empty before and after take_turn().
        buf: String,
    },
    Bot(Box<dyn DecisionMaker>),
}

/// Whoever controls one side of the game.
pub struct Participant {
    pub name: String,
    id: PlayerId,
    controller: Controller,
}

impl Participant {
    pub fn human(name: &str, id: PlayerId, events: Box<dyn BufRead>) -> Self {
        Self {
            name: String::from(name),
            id,
            controller: Controller::Human {
                input: InputController::new(id),
                events,
                buf: String::new(),
            },
        }
    }

    pub fn bot(name: &str, id: PlayerId, decision_maker: Box<dyn DecisionMaker>) -> Self {
        Self {
            name: String::from(name),
            id,
            controller: Controller::Bot(decision_maker),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human { .. })
    }

    /// Acts until this participant's turn is over.
    ///
    /// A bot waits `think_delay` before it decides. A human's events are read
    /// until one of them ends the turn; rejected events are logged and skipped.
    /// Returns `None` when the human's event stream ends.
    pub fn take_turn<R: Renderer>(
        &mut self,
        state: &mut GameState<R>,
        think_delay: Duration,
    ) -> anyhow::Result<Option<TurnChange>> {
        match &mut self.controller {
            Controller::Bot(decision_maker) => {
                if !think_delay.is_zero() {
                    std::thread::sleep(think_delay);
                }
                let bot_move = decision_maker.decide(state.board(), state.active_player());
                trace!(player = &self.name, ?bot_move, "Bot decided");
                Ok(Some(state.apply_bot_move(self.id, bot_move)?))
            }
            Controller::Human { input, events, buf } => loop {
                buf.clear();
                if events.read_line(buf)? == 0 {
                    debug!(player = &self.name, "Input closed");
                    return Ok(None);
                }
                let line = buf.trim();
                if line.is_empty() {
                    continue;
                }
                let event: InputEvent = match serde_json::from_str(line) {
                    Ok(event) => event,
                    Err(err) => {
                        warn!(player = &self.name, %err, line, "Could not parse input");
                        continue;
                    }
                };
                match input.handle(state, event) {
                    Ok(InputOutcome::Committed(change)) => {
                        buf.clear();
                        return Ok(Some(change));
                    }
                    Ok(outcome) => trace!(player = &self.name, ?outcome),
                    Err(err) => warn!(player = &self.name, %err, "Rejected input"),
                }
            },
        }
    }
}
