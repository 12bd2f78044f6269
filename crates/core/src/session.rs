//! Game session - one owned game from deal to win
//!
//! The session composes the deck, score, clock and turn engine and is the
//! only thing a front end talks to. All mutation goes through
//! [`GameSession::select_card`], [`GameSession::tick`],
//! [`GameSession::resolve`] and [`GameSession::restart`].

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::deck::Deck;
use crate::engine::{ResolutionToken, TurnContext, TurnEngine, TurnOutcome, TurnRules};
use crate::error::{ConfigError, GameError};
use crate::rng::SimpleRng;
use crate::scoring::{ScoreState, ScoreTracker};
use crate::sink::{GameSummary, NullPresenter, Presenter};
use crate::snapshot::{CardSnapshot, GameSnapshot};
use crate::timer::Timer;
use crate::types::{grid_columns, GameStatus, RejectReason, MAX_STARS};

pub struct GameSession<P: Presenter = NullPresenter> {
    config: GameConfig,
    rng: SimpleRng,
    deck: Deck,
    score: ScoreTracker,
    timer: Timer,
    engine: TurnEngine,
    status: GameStatus,
    /// Bumped on every restart; stamps resolution tokens.
    generation: u32,
    presenter: P,
}

impl GameSession<NullPresenter> {
    /// Session without a front end
    pub fn headless(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, NullPresenter)
    }
}

impl<P: Presenter> GameSession<P> {
    /// Validate `config` and deal the first game.
    pub fn new(config: GameConfig, presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let deck = deal(&config, &mut rng)?;

        Ok(Self {
            score: ScoreTracker::new(config.thresholds),
            timer: Timer::new(),
            engine: TurnEngine::new(TurnRules::from(&config), 0),
            status: GameStatus::InProgress,
            generation: 0,
            config,
            rng,
            deck,
            presenter,
        })
    }

    /// Reset to a fresh deal within the current generation.
    pub fn start(&mut self) {
        self.reset();
        info!(
            generation = self.generation,
            cards = self.deck.len(),
            "session started"
        );
    }

    /// Discard the current game and deal a new one.
    ///
    /// Resolution tokens issued before the restart become stale.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.reset();
        info!(
            generation = self.generation,
            cards = self.deck.len(),
            "session restarted"
        );
    }

    fn reset(&mut self) {
        if self.config.shuffle {
            self.deck.shuffle(&mut self.rng);
        } else {
            self.deck.reset_faces();
        }
        self.score.reset();
        self.timer.reset();
        self.engine
            .reset(TurnRules::from(&self.config), self.generation);
        self.status = GameStatus::InProgress;

        let score = self.score.snapshot();
        self.presenter
            .on_move_recorded(score.move_count, score.star_rating);
        self.presenter.on_tick(0);
    }

    /// Handle a card selection from the front end.
    ///
    /// Errors leave the session untouched. [`GameError::is_ignorable`] tells
    /// the caller which ones are ordinary gameplay.
    pub fn select_card(&mut self, index: usize) -> Result<TurnOutcome, GameError> {
        let result = self.try_select(index);
        match &result {
            Ok(outcome) => debug!(index, ?outcome, "selection accepted"),
            Err(err @ GameError::OutOfRange { .. }) => warn!(%err, "selection out of range"),
            Err(err) => debug!(%err, "selection rejected"),
        }
        result
    }

    /// Alias of [`select_card`](Self::select_card)
    pub fn on_card_selected(&mut self, index: usize) -> Result<TurnOutcome, GameError> {
        self.select_card(index)
    }

    fn try_select(&mut self, index: usize) -> Result<TurnOutcome, GameError> {
        self.deck.card_at(index)?;
        if self.status == GameStatus::Won {
            return Err(GameError::InvalidSelection {
                index,
                reason: RejectReason::GameWon,
            });
        }

        let outcome = self.engine.select_card(
            index,
            TurnContext {
                deck: &mut self.deck,
                score: &mut self.score,
                timer: &mut self.timer,
                presenter: &mut self.presenter,
            },
        )?;

        if let TurnOutcome::Matched { won: true, .. } = outcome {
            self.finish();
        }
        Ok(outcome)
    }

    fn finish(&mut self) {
        self.status = GameStatus::Won;
        self.timer.stop();
        let summary = self.summary();
        info!(
            moves = summary.move_count,
            seconds = summary.elapsed_seconds,
            stars = summary.star_rating,
            "game won"
        );
        self.presenter.on_game_won(summary);
    }

    /// Advance the clock and any open resolution window.
    ///
    /// Returns true when something visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let seconds = self.timer.tick(elapsed_ms, &mut self.presenter);
        let closed = self
            .engine
            .advance(elapsed_ms, &mut self.deck, &mut self.presenter);
        seconds > 0 || closed.is_some()
    }

    /// Close the open window early. Stale tokens return false.
    pub fn resolve(&mut self, token: ResolutionToken) -> bool {
        self.engine
            .resolve(token, &mut self.deck, &mut self.presenter)
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> ScoreState {
        self.score.snapshot()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pending(&self) -> &[usize] {
        self.engine.pending()
    }

    pub fn is_resolving(&self) -> bool {
        self.engine.is_resolving()
    }

    /// Token of the open window, if any
    pub fn open_token(&self) -> Option<ResolutionToken> {
        self.engine.window().map(|w| w.token)
    }

    pub fn summary(&self) -> GameSummary {
        let score = self.score.snapshot();
        GameSummary {
            move_count: score.move_count,
            elapsed_seconds: self.timer.elapsed_seconds(),
            star_rating: score.star_rating,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cards.clear();
        out.cards.extend(self.deck.iter().map(CardSnapshot::from));
        out.columns = grid_columns(self.deck.len());

        let score = self.score.snapshot();
        out.move_count = score.move_count;
        out.star_rating = score.star_rating;
        out.max_stars = MAX_STARS;
        out.elapsed_seconds = self.timer.elapsed_seconds();
        out.timer_running = self.timer.is_running();
        out.status = self.status;
        out.generation = self.generation;
        out.resolving = self.engine.is_resolving();

        out.pending.clear();
        out.pending.extend_from_slice(self.engine.pending());

        let window = self.engine.window();
        out.window = window.map(|w| w.kind);
        out.marked.clear();
        if let Some(w) = window {
            out.marked.extend_from_slice(&w.pair);
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn deal(config: &GameConfig, rng: &mut SimpleRng) -> Result<Deck, ConfigError> {
    if config.layout.is_none() && config.shuffle {
        return Deck::from_pairs(&config.symbols, rng);
    }
    let mut deck = Deck::new(&config.deal())?;
    if config.shuffle {
        deck.shuffle(rng);
    }
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WindowKind;
    use crate::sink::{EventLog, PresenterEvent};
    use crate::types::CardFace;

    fn fixed(layout: &[&str]) -> GameSession<EventLog> {
        let config = GameConfig::default().with_fixed_layout(layout);
        GameSession::new(config, EventLog::new()).unwrap()
    }

    #[test]
    fn test_new_session_is_fresh() {
        let session = GameSession::headless(GameConfig::default().with_seed(42)).unwrap();
        assert_eq!(session.deck().len(), 16);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.score(), ScoreState::default());
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.generation(), 0);
        assert!(session.pending().is_empty());
        assert!(!session.timer().is_running());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GameConfig::default().with_fixed_layout(&["a", "b", "c", "c"]);
        assert!(matches!(
            GameSession::headless(config),
            Err(ConfigError::UnpairedSymbol { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = GameSession::headless(GameConfig::default().with_seed(7)).unwrap();
        let b = GameSession::headless(GameConfig::default().with_seed(7)).unwrap();
        assert_eq!(a.deck().symbols(), b.deck().symbols());
    }

    #[test]
    fn test_selection_on_won_game_is_rejected() {
        let mut s = fixed(&["a", "a", "b", "b"]);
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();
        s.tick(450);
        s.select_card(2).unwrap();
        s.select_card(3).unwrap();

        assert!(s.is_won());
        assert_eq!(
            s.select_card(0),
            Err(GameError::InvalidSelection {
                index: 0,
                reason: RejectReason::GameWon
            })
        );
        assert_eq!(s.select_card(7), Err(GameError::OutOfRange { index: 7, len: 4 }));
    }

    #[test]
    fn test_win_stops_timer_and_reports_summary() {
        let mut s = fixed(&["a", "a", "b", "b"]);
        s.select_card(0).unwrap();
        s.tick(1000);
        s.select_card(1).unwrap();
        s.tick(1000);
        s.select_card(2).unwrap();
        s.select_card(3).unwrap();

        let summary = GameSummary {
            move_count: 2,
            elapsed_seconds: 2,
            star_rating: 3,
        };
        assert_eq!(s.presenter().won(), Some(summary));
        assert!(!s.timer().is_running());

        s.tick(5000);
        assert_eq!(s.elapsed_seconds(), 2);
    }

    #[test]
    fn test_restart_resets_everything_but_config() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();
        s.tick(3000);
        s.presenter_mut().clear();

        s.restart();

        assert_eq!(s.generation(), 1);
        assert_eq!(s.score(), ScoreState::default());
        assert_eq!(s.elapsed_seconds(), 0);
        assert!(!s.is_resolving());
        assert!(s.pending().is_empty());
        assert_eq!(s.deck().count_faces(CardFace::Hidden), 4);
        assert_eq!(
            s.presenter().events(),
            &[
                PresenterEvent::MoveRecorded {
                    move_count: 0,
                    star_rating: 3
                },
                PresenterEvent::Tick { elapsed_seconds: 0 },
            ]
        );
    }

    #[test]
    fn test_stale_token_after_restart() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        s.select_card(0).unwrap();
        let TurnOutcome::Mismatched { token, .. } = s.select_card(1).unwrap() else {
            panic!("expected mismatch");
        };

        s.restart();
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();
        let before = s.snapshot();

        assert!(!s.resolve(token));
        assert_eq!(s.snapshot(), before);

        let live = s.open_token().unwrap();
        assert!(s.resolve(live));
        assert!(!s.is_resolving());
    }

    #[test]
    fn test_stale_token_after_start() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        s.select_card(0).unwrap();
        let TurnOutcome::Mismatched { token, .. } = s.select_card(1).unwrap() else {
            panic!("expected mismatch");
        };

        s.start();
        assert_eq!(s.generation(), token.generation);
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();
        let live = s.open_token().unwrap();
        assert_ne!(live, token);

        assert!(!s.resolve(token));
        assert!(s.is_resolving());
        assert_eq!(s.deck().count_faces(CardFace::Revealed), 2);

        assert!(s.resolve(live));
        assert_eq!(s.deck().count_faces(CardFace::Hidden), 4);
    }

    #[test]
    fn test_start_keeps_generation() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        s.start();
        assert_eq!(s.generation(), 0);
        s.restart();
        s.start();
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn test_snapshot_reflects_window() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();

        let snap = s.snapshot();
        assert_eq!(snap.columns, 2);
        assert!(snap.resolving);
        assert!(!snap.playable());
        assert_eq!(snap.window, Some(WindowKind::FlipBack));
        assert_eq!(snap.pending, vec![0, 1]);
        assert!(snap.is_marked(1));
        assert_eq!(snap.cards[1].face, CardFace::Revealed);
        assert_eq!(snap.move_count, 1);
        assert!(snap.timer_running);
    }

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        let mut snap = s.snapshot();
        let cap = snap.cards.capacity();

        s.select_card(0).unwrap();
        s.snapshot_into(&mut snap);

        assert_eq!(snap.cards.capacity(), cap);
        assert_eq!(snap.cards[0].face, CardFace::Revealed);
        assert_eq!(snap.pending, vec![0]);
    }

    #[test]
    fn test_tick_reports_changes() {
        let mut s = fixed(&["a", "b", "a", "b"]);
        assert!(!s.tick(16));
        s.select_card(0).unwrap();
        s.select_card(1).unwrap();
        assert!(!s.tick(500));
        assert!(s.tick(400));
        assert!(!s.is_resolving());
    }
}
