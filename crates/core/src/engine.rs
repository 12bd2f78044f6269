//! Turn engine - the selection state machine
//!
//! A turn is two accepted reveals. The second reveal is evaluated at once:
//!
//! - **Match**: both cards become `Matched`. Unless that finished the deck, a
//!   short settle window opens so the match cue can play out.
//! - **Mismatch**: a resolution window opens; when it closes both cards turn
//!   face-down again.
//!
//! While either window is open every selection is rejected. Windows close
//! when [`TurnEngine::advance`] has consumed their delay or when
//! [`TurnEngine::resolve`] is called with their token. Tokens carry the
//! session generation, so a callback scheduled before a restart can never
//! touch the new deal.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::GameError;
use crate::scoring::ScoreTracker;
use crate::sink::Presenter;
use crate::timer::Timer;
use crate::types::{CardFace, MoveCounting, RejectReason};

/// Identifies one open window within one session generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionToken {
    pub generation: u32,
    pub turn: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowKind {
    /// Mismatched pair waiting to flip back.
    FlipBack,
    /// Matched pair finishing its cue.
    Settle,
}

/// A deferred resolution that blocks input until it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionWindow {
    pub token: ResolutionToken,
    pub kind: WindowKind,
    pub pair: [usize; 2],
    pub remaining_ms: u32,
}

/// Result of an accepted selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TurnOutcome {
    /// First card of the turn is face-up.
    Revealed { index: usize },
    /// Second card matched the first. `settle` is `None` when the match won
    /// the game.
    Matched {
        pair: [usize; 2],
        won: bool,
        settle: Option<ResolutionToken>,
    },
    /// Second card did not match; both flip back once `token` resolves.
    Mismatched {
        pair: [usize; 2],
        token: ResolutionToken,
    },
}

/// Per-session rules the engine needs from [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRules {
    pub move_counting: MoveCounting,
    pub resolution_delay_ms: u32,
    pub settle_delay_ms: u32,
}

impl From<&GameConfig> for TurnRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            move_counting: config.move_counting,
            resolution_delay_ms: config.resolution_delay_ms,
            settle_delay_ms: config.settle_delay_ms,
        }
    }
}

/// Mutable session parts a selection touches.
pub struct TurnContext<'a, P: Presenter + ?Sized> {
    pub deck: &'a mut Deck,
    pub score: &'a mut ScoreTracker,
    pub timer: &'a mut Timer,
    pub presenter: &'a mut P,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    rules: TurnRules,
    generation: u32,
    /// Evaluated pairs over the whole session; never reset.
    turn: u32,
    pending: ArrayVec<usize, 2>,
    window: Option<ResolutionWindow>,
}

impl TurnEngine {
    pub fn new(rules: TurnRules, generation: u32) -> Self {
        Self {
            rules,
            generation,
            turn: 0,
            pending: ArrayVec::new(),
            window: None,
        }
    }

    /// Drop the pending selection and any open window for a new deal.
    ///
    /// The turn counter keeps counting, so a token issued for the previous
    /// deal can never match a window of the next one.
    pub fn reset(&mut self, rules: TurnRules, generation: u32) {
        self.rules = rules;
        self.generation = generation;
        self.pending.clear();
        self.window = None;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Indices revealed and not yet resolved this turn
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn window(&self) -> Option<&ResolutionWindow> {
        self.window.as_ref()
    }

    pub fn is_resolving(&self) -> bool {
        self.window.is_some()
    }

    /// Apply a selection. Rejected selections change nothing.
    pub fn select_card<P: Presenter + ?Sized>(
        &mut self,
        index: usize,
        ctx: TurnContext<'_, P>,
    ) -> Result<TurnOutcome, GameError> {
        let TurnContext {
            deck,
            score,
            timer,
            presenter,
        } = ctx;

        match deck.card_at(index)?.face() {
            CardFace::Matched => return Err(reject(index, RejectReason::AlreadyMatched)),
            CardFace::Revealed => return Err(reject(index, RejectReason::AlreadyRevealed)),
            CardFace::Hidden => {}
        }
        if self.window.is_some() {
            return Err(reject(index, RejectReason::Resolving));
        }

        deck.card_mut(index)?.reveal();
        self.pending.push(index);
        if !timer.is_running() {
            timer.start();
        }
        presenter.reveal(index);

        if self.rules.move_counting == MoveCounting::PerReveal {
            record_move(score, presenter);
        }

        let &[first, second] = self.pending.as_slice() else {
            return Ok(TurnOutcome::Revealed { index });
        };
        let pair = [first, second];

        if self.rules.move_counting == MoveCounting::PerTurn {
            record_move(score, presenter);
        }
        self.turn = self.turn.wrapping_add(1);
        let token = ResolutionToken {
            generation: self.generation,
            turn: self.turn,
        };

        if deck.card_at(first)?.pairs_with(deck.card_at(second)?) {
            for i in pair {
                deck.card_mut(i)?.mark_matched();
            }
            self.pending.clear();
            presenter.mark_matched(&pair);

            let won = deck.is_complete();
            debug!(?pair, won, "pair matched");
            if won {
                return Ok(TurnOutcome::Matched {
                    pair,
                    won,
                    settle: None,
                });
            }

            self.open_window(token, WindowKind::Settle, pair, self.rules.settle_delay_ms);
            Ok(TurnOutcome::Matched {
                pair,
                won,
                settle: Some(token),
            })
        } else {
            presenter.mark_mismatched(&pair);
            debug!(?pair, "pair mismatched");
            self.open_window(
                token,
                WindowKind::FlipBack,
                pair,
                self.rules.resolution_delay_ms,
            );
            Ok(TurnOutcome::Mismatched { pair, token })
        }
    }

    /// Count down the open window; closes it once its delay is consumed.
    ///
    /// Returns the kind of window that closed, if any.
    pub fn advance<P: Presenter + ?Sized>(
        &mut self,
        elapsed_ms: u32,
        deck: &mut Deck,
        presenter: &mut P,
    ) -> Option<WindowKind> {
        let window = self.window.as_mut()?;
        window.remaining_ms = window.remaining_ms.saturating_sub(elapsed_ms);
        if window.remaining_ms > 0 {
            return None;
        }
        self.close_window(deck, presenter)
    }

    /// Close the open window now if `token` names it.
    ///
    /// Tokens from an earlier generation or an already closed window are
    /// ignored and return `false`.
    pub fn resolve<P: Presenter + ?Sized>(
        &mut self,
        token: ResolutionToken,
        deck: &mut Deck,
        presenter: &mut P,
    ) -> bool {
        match self.window {
            Some(w) if w.token == token => self.close_window(deck, presenter).is_some(),
            _ => {
                warn!(?token, generation = self.generation, "stale resolution token ignored");
                false
            }
        }
    }

    fn open_window(
        &mut self,
        token: ResolutionToken,
        kind: WindowKind,
        pair: [usize; 2],
        delay_ms: u32,
    ) {
        self.window = Some(ResolutionWindow {
            token,
            kind,
            pair,
            remaining_ms: delay_ms,
        });
    }

    fn close_window<P: Presenter + ?Sized>(
        &mut self,
        deck: &mut Deck,
        presenter: &mut P,
    ) -> Option<WindowKind> {
        let window = self.window.take()?;
        presenter.unmark(&window.pair);

        if window.kind == WindowKind::FlipBack {
            for i in window.pair {
                if let Ok(card) = deck.card_mut(i) {
                    card.hide();
                }
                presenter.hide(i);
            }
            self.pending.clear();
        }

        debug!(kind = ?window.kind, pair = ?window.pair, "window closed");
        Some(window.kind)
    }
}

fn reject(index: usize, reason: RejectReason) -> GameError {
    GameError::InvalidSelection { index, reason }
}

fn record_move<P: Presenter + ?Sized>(score: &mut ScoreTracker, presenter: &mut P) {
    let state = score.record_move();
    presenter.on_move_recorded(state.move_count, state.star_rating);
}
