//! TermPresenter: the terminal front end's side of the core sink traits.
//!
//! Card faces are read from the snapshot at render time. The presenter only
//! keeps what the snapshot does not carry: the transient match/mismatch cues
//! and the values last pushed through the clock, score and completion sinks.

use crate::core::{ClockSink, CompletionSink, GameSummary, RenderSink, ScoreSink};
use crate::types::MAX_STARS;

/// Transient highlight on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cue {
    #[default]
    None,
    Matched,
    Mismatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPresenter {
    cues: Vec<Cue>,
    elapsed_seconds: u32,
    move_count: u32,
    star_rating: u8,
    summary: Option<GameSummary>,
    dirty: bool,
}

impl TermPresenter {
    pub fn new(card_count: usize) -> Self {
        Self {
            cues: vec![Cue::None; card_count],
            elapsed_seconds: 0,
            move_count: 0,
            star_rating: MAX_STARS,
            summary: None,
            dirty: true,
        }
    }

    /// Forget cues and the win summary, e.g. after a restart.
    pub fn reset(&mut self) {
        self.cues.fill(Cue::None);
        self.summary = None;
        self.dirty = true;
    }

    pub fn cue(&self, index: usize) -> Cue {
        self.cues.get(index).copied().unwrap_or_default()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn star_rating(&self) -> u8 {
        self.star_rating
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.summary
    }

    /// True once since the last call if any sink fired.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn set_cues(&mut self, indices: &[usize], cue: Cue) {
        for &i in indices {
            if let Some(c) = self.cues.get_mut(i) {
                *c = cue;
            }
        }
        self.dirty = true;
    }
}

impl RenderSink for TermPresenter {
    fn reveal(&mut self, _index: usize) {
        self.dirty = true;
    }

    fn hide(&mut self, index: usize) {
        self.set_cues(&[index], Cue::None);
    }

    fn mark_matched(&mut self, indices: &[usize]) {
        self.set_cues(indices, Cue::Matched);
    }

    fn mark_mismatched(&mut self, indices: &[usize]) {
        self.set_cues(indices, Cue::Mismatched);
    }

    fn unmark(&mut self, indices: &[usize]) {
        self.set_cues(indices, Cue::None);
    }
}

impl ClockSink for TermPresenter {
    fn on_tick(&mut self, elapsed_seconds: u32) {
        self.elapsed_seconds = elapsed_seconds;
        self.dirty = true;
    }
}

impl ScoreSink for TermPresenter {
    fn on_move_recorded(&mut self, move_count: u32, star_rating: u8) {
        self.move_count = move_count;
        self.star_rating = star_rating;
        self.dirty = true;
    }
}

impl CompletionSink for TermPresenter {
    fn on_game_won(&mut self, summary: GameSummary) {
        self.summary = Some(summary);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_follow_marks() {
        let mut p = TermPresenter::new(4);
        p.mark_mismatched(&[0, 1]);
        assert_eq!(p.cue(0), Cue::Mismatched);
        assert_eq!(p.cue(1), Cue::Mismatched);

        p.unmark(&[0, 1]);
        assert_eq!(p.cue(0), Cue::None);

        p.mark_matched(&[2, 3]);
        assert_eq!(p.cue(3), Cue::Matched);
        assert_eq!(p.cue(99), Cue::None);
    }

    #[test]
    fn test_sink_values_and_dirty_flag() {
        let mut p = TermPresenter::new(4);
        assert!(p.take_dirty());
        assert!(!p.take_dirty());

        p.on_tick(7);
        p.on_move_recorded(5, 2);
        assert!(p.take_dirty());
        assert_eq!(p.elapsed_seconds(), 7);
        assert_eq!((p.move_count(), p.star_rating()), (5, 2));
    }

    #[test]
    fn test_reset_clears_summary() {
        let mut p = TermPresenter::new(4);
        p.mark_matched(&[0, 1]);
        p.on_game_won(GameSummary {
            move_count: 2,
            elapsed_seconds: 3,
            star_rating: 3,
        });
        assert!(p.summary().is_some());

        p.reset();
        assert!(p.summary().is_none());
        assert_eq!(p.cue(0), Cue::None);
    }
}
