//! Property tests over random play.

use proptest::prelude::*;

use tui_memory::core::{
    validate_pairing, Deck, EventLog, GameConfig, GameSession, ScoreTracker, SimpleRng,
    StarThresholds,
};
use tui_memory::types::{CardFace, SymbolId};

fn thresholds() -> impl Strategy<Value = StarThresholds> {
    (0u32..30, 0u32..30, 0u32..30).prop_map(|(a, b, c)| {
        let mut t = [a, b, c];
        t.sort_unstable();
        StarThresholds::new(t[0], t[1], t[2]).unwrap()
    })
}

/// One step of random play: select a card, or let time pass.
#[derive(Debug, Clone)]
enum Step {
    Select(usize),
    Wait(u32),
    Restart,
}

fn steps(cards: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        prop_oneof![
            6 => (0..cards + 2).prop_map(Step::Select),
            3 => (0u32..1200).prop_map(Step::Wait),
            1 => Just(Step::Restart),
        ],
        0..200,
    )
}

fn assert_pairing(session: &GameSession<EventLog>) {
    let deck = session.deck();
    assert!(deck.symbol_counts().values().all(|&n| n == 2));
    assert!(deck.count_faces(CardFace::Revealed) <= 2);
    assert_eq!(session.is_won(), deck.is_complete());
    for &i in session.pending() {
        assert_ne!(deck.card_at(i).unwrap().face(), CardFace::Matched);
    }
}

proptest! {
    #[test]
    fn star_rating_never_increases(t in thresholds(), moves in 0usize..60) {
        let mut tracker = ScoreTracker::new(t);
        let mut last = tracker.star_rating();
        for _ in 0..moves {
            let state = tracker.record_move();
            prop_assert!(state.star_rating <= last);
            prop_assert_eq!(state.star_rating, t.stars_for(state.move_count).min(last));
            last = state.star_rating;
        }
        tracker.recompute();
        prop_assert_eq!(tracker.star_rating(), last);
    }

    #[test]
    fn shuffle_preserves_multiset(seed in any::<u64>(), pairs in 2usize..12) {
        let symbols: Vec<SymbolId> = (0..pairs)
            .flat_map(|i| [SymbolId::new(format!("s{i}")), SymbolId::new(format!("s{i}"))])
            .collect();
        let mut deck = Deck::new(&symbols).unwrap();
        let mut rng = SimpleRng::new(seed);
        deck.shuffle(&mut rng);

        prop_assert!(validate_pairing(&deck.symbols()).is_ok());
        let mut before = symbols.clone();
        let mut after = deck.symbols();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn random_play_keeps_invariants(seed in any::<u64>(), plan in steps(8)) {
        let config = GameConfig {
            symbols: ["a", "b", "c", "d"].iter().map(|s| SymbolId::new(*s)).collect(),
            ..GameConfig::default()
        }
        .with_seed(seed);
        let mut s = GameSession::new(config, EventLog::new()).unwrap();
        let mut last_moves = 0;

        for step in plan {
            match step {
                Step::Select(i) => {
                    let before = s.snapshot();
                    if s.select_card(i).is_err() {
                        prop_assert_eq!(s.snapshot(), before);
                    }
                }
                Step::Wait(ms) => {
                    let won = s.is_won();
                    let elapsed = s.elapsed_seconds();
                    s.tick(ms);
                    if won {
                        prop_assert_eq!(s.elapsed_seconds(), elapsed);
                    }
                }
                Step::Restart => {
                    s.restart();
                    last_moves = 0;
                }
            }
            assert_pairing(&s);
            prop_assert!(s.score().move_count >= last_moves);
            last_moves = s.score().move_count;
        }
    }
}
