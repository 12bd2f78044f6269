//! Statistical checks on the dealer.

use std::collections::HashMap;

use tui_memory::core::{Deck, SimpleRng};
use tui_memory::types::SymbolId;

/// Pearson chi-square statistic against a uniform expectation.
fn chi_square(counts: &HashMap<Vec<usize>, u32>, categories: usize, trials: u32) -> f64 {
    let expected = trials as f64 / categories as f64;
    let observed: f64 = counts
        .values()
        .map(|&n| (n as f64 - expected).powi(2) / expected)
        .sum();
    // Categories never observed contribute `expected` each.
    observed + (categories - counts.len()) as f64 * expected
}

#[test]
fn test_every_permutation_of_four_is_equally_likely() {
    const TRIALS: u32 = 24_000;
    let mut rng = SimpleRng::new(0xC0FFEE);
    let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();

    for _ in 0..TRIALS {
        let mut slots = vec![0, 1, 2, 3];
        rng.shuffle(&mut slots);
        *counts.entry(slots).or_insert(0) += 1;
    }

    assert_eq!(counts.len(), 24, "all 4! orderings must occur");
    // 23 degrees of freedom, p = 0.001
    let stat = chi_square(&counts, 24, TRIALS);
    assert!(stat < 49.73, "chi-square {stat} too large");
}

#[test]
fn test_deck_layouts_are_uniform() {
    const TRIALS: u32 = 12_000;
    let symbols: Vec<SymbolId> = ["a", "a", "b", "b"].iter().map(|s| SymbolId::new(*s)).collect();
    let mut deck = Deck::new(&symbols).unwrap();
    let mut rng = SimpleRng::new(7);
    let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();

    for _ in 0..TRIALS {
        deck.shuffle(&mut rng);
        // Positions holding "a" identify the layout.
        let layout: Vec<usize> = deck
            .iter()
            .filter(|c| c.symbol().as_str() == "a")
            .map(|c| c.index())
            .collect();
        *counts.entry(layout).or_insert(0) += 1;
    }

    assert_eq!(counts.len(), 6);
    // 5 degrees of freedom, p = 0.001
    let stat = chi_square(&counts, 6, TRIALS);
    assert!(stat < 20.52, "chi-square {stat} too large");
}

#[test]
fn test_each_slot_sees_each_symbol() {
    let symbols: Vec<SymbolId> = ["a", "b", "c", "d"]
        .iter()
        .flat_map(|s| [SymbolId::new(*s), SymbolId::new(*s)])
        .collect();
    let mut deck = Deck::new(&symbols).unwrap();
    let mut rng = SimpleRng::new(1);
    let mut first_slot: HashMap<String, u32> = HashMap::new();

    for _ in 0..4_000 {
        deck.shuffle(&mut rng);
        *first_slot
            .entry(deck.symbol_at(0).unwrap().to_string())
            .or_insert(0) += 1;
    }

    // Expected 1000 each.
    for n in first_slot.values() {
        assert!((850..1150).contains(n), "slot 0 frequency {n}");
    }
    assert_eq!(first_slot.len(), 4);
}
