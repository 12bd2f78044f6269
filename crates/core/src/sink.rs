//! Sink traits the core calls into, and two stock presenters.
//!
//! The core never inspects what a sink does with an instruction. A front end
//! implements all four traits on one type and hands it to the session as its
//! [`Presenter`].

use serde::{Deserialize, Serialize};

/// Visual card-state instructions
pub trait RenderSink {
    fn reveal(&mut self, index: usize);
    fn hide(&mut self, index: usize);
    fn mark_matched(&mut self, indices: &[usize]);
    fn mark_mismatched(&mut self, indices: &[usize]);
    /// Clear match/mismatch cues from `indices`.
    fn unmark(&mut self, indices: &[usize]);
}

pub trait ClockSink {
    fn on_tick(&mut self, elapsed_seconds: u32);
}

pub trait ScoreSink {
    fn on_move_recorded(&mut self, move_count: u32, star_rating: u8);
}

pub trait CompletionSink {
    fn on_game_won(&mut self, summary: GameSummary);
}

/// Everything a front end has to handle.
pub trait Presenter: RenderSink + ClockSink + ScoreSink + CompletionSink {}

impl<T: RenderSink + ClockSink + ScoreSink + CompletionSink> Presenter for T {}

/// Final numbers of a won game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSummary {
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub star_rating: u8,
}

/// Discards every instruction. Useful for headless play and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl RenderSink for NullPresenter {
    fn reveal(&mut self, _index: usize) {}
    fn hide(&mut self, _index: usize) {}
    fn mark_matched(&mut self, _indices: &[usize]) {}
    fn mark_mismatched(&mut self, _indices: &[usize]) {}
    fn unmark(&mut self, _indices: &[usize]) {}
}

impl ClockSink for NullPresenter {
    fn on_tick(&mut self, _elapsed_seconds: u32) {}
}

impl ScoreSink for NullPresenter {
    fn on_move_recorded(&mut self, _move_count: u32, _star_rating: u8) {}
}

impl CompletionSink for NullPresenter {
    fn on_game_won(&mut self, _summary: GameSummary) {}
}

/// One recorded sink call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PresenterEvent {
    Reveal { index: usize },
    Hide { index: usize },
    MarkMatched { indices: Vec<usize> },
    MarkMismatched { indices: Vec<usize> },
    Unmark { indices: Vec<usize> },
    Tick { elapsed_seconds: u32 },
    MoveRecorded { move_count: u32, star_rating: u8 },
    GameWon { summary: GameSummary },
}

/// Records every sink call in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PresenterEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Take and clear the recorded events.
    pub fn drain(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn last(&self) -> Option<&PresenterEvent> {
        self.events.last()
    }

    pub fn won(&self) -> Option<GameSummary> {
        self.events.iter().find_map(|e| match e {
            PresenterEvent::GameWon { summary } => Some(*summary),
            _ => None,
        })
    }
}

impl RenderSink for EventLog {
    fn reveal(&mut self, index: usize) {
        self.events.push(PresenterEvent::Reveal { index });
    }

    fn hide(&mut self, index: usize) {
        self.events.push(PresenterEvent::Hide { index });
    }

    fn mark_matched(&mut self, indices: &[usize]) {
        self.events.push(PresenterEvent::MarkMatched {
            indices: indices.to_vec(),
        });
    }

    fn mark_mismatched(&mut self, indices: &[usize]) {
        self.events.push(PresenterEvent::MarkMismatched {
            indices: indices.to_vec(),
        });
    }

    fn unmark(&mut self, indices: &[usize]) {
        self.events.push(PresenterEvent::Unmark {
            indices: indices.to_vec(),
        });
    }
}

impl ClockSink for EventLog {
    fn on_tick(&mut self, elapsed_seconds: u32) {
        self.events.push(PresenterEvent::Tick { elapsed_seconds });
    }
}

impl ScoreSink for EventLog {
    fn on_move_recorded(&mut self, move_count: u32, star_rating: u8) {
        self.events.push(PresenterEvent::MoveRecorded {
            move_count,
            star_rating,
        });
    }
}

impl CompletionSink for EventLog {
    fn on_game_won(&mut self, summary: GameSummary) {
        self.events.push(PresenterEvent::GameWon { summary });
    }
}
