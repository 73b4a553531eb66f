//! Board generator distribution and layout properties.

use std::collections::HashMap;

use proptest::prelude::*;

use tui_pairs::core::generator::shuffle;
use tui_pairs::core::{BoardGenerator, BoardRng};
use tui_pairs::types::CardId;

fn id_counts(ids: impl IntoIterator<Item = CardId>) -> HashMap<CardId, usize> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

fn chi_square(observed: &HashMap<Vec<u8>, u32>, categories: usize, samples: u32) -> f64 {
    let expected = samples as f64 / categories as f64;
    assert_eq!(observed.len(), categories, "some arrangement never appeared");
    observed
        .values()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum()
}

proptest! {
    #[test]
    fn prop_every_identity_appears_twice_except_one_on_odd_boards(
        seed in any::<u64>(),
        rows in 1u16..=10,
        cols in 1u16..=10,
    ) {
        let total = rows as usize * cols as usize;
        let records = BoardGenerator::new(16).generate(rows, cols, &mut BoardRng::new(seed));
        prop_assert_eq!(records.len(), total);

        let counts = id_counts(records.iter().map(|r| r.card_id));
        prop_assert_eq!(counts.len(), total.div_ceil(2));
        let singles = counts.values().filter(|&&n| n == 1).count();
        prop_assert!(counts.values().all(|&n| n == 1 || n == 2));
        prop_assert_eq!(singles, total % 2);
        prop_assert!(counts.keys().all(|&id| (id as usize) < total.div_ceil(2)));
    }

    #[test]
    fn prop_faces_follow_identities(seed in any::<u64>(), faces in 0usize..6) {
        let generator = BoardGenerator::new(faces);
        for r in generator.generate(4, 5, &mut BoardRng::new(seed)) {
            if faces == 0 {
                prop_assert!(r.face.is_none());
            } else {
                prop_assert_eq!(r.face.map(|f| f.index()), Some(r.card_id as usize % faces));
            }
        }
    }
}

#[test]
fn test_two_by_two_layouts_are_uniform() {
    const SAMPLES: u32 = 6_000;
    let generator = BoardGenerator::new(2);
    let mut rng = BoardRng::new(2024);

    let mut observed: HashMap<Vec<u8>, u32> = HashMap::new();
    for _ in 0..SAMPLES {
        let layout = generator
            .generate(2, 2, &mut rng)
            .iter()
            .map(|r| r.card_id as u8)
            .collect();
        *observed.entry(layout).or_insert(0) += 1;
    }

    // 4!/(2!2!) = 6 layouts, 5 degrees of freedom; 25.74 is the p = 0.0001 cut-off.
    let stat = chi_square(&observed, 6, SAMPLES);
    assert!(stat < 25.74, "chi-square {stat:.2} suggests a biased shuffle");
}

#[test]
fn test_shuffle_permutations_are_uniform() {
    const SAMPLES: u32 = 24_000;
    let mut rng = BoardRng::new(99);

    let mut observed: HashMap<Vec<u8>, u32> = HashMap::new();
    for _ in 0..SAMPLES {
        let mut items = [0u8, 1, 2, 3];
        shuffle(&mut items, &mut rng);
        *observed.entry(items.to_vec()).or_insert(0) += 1;
    }

    // 24 permutations, 23 degrees of freedom; 57.3 is roughly the p = 0.0001 cut-off.
    let stat = chi_square(&observed, 24, SAMPLES);
    assert!(stat < 57.3, "chi-square {stat:.2} suggests a biased shuffle");
}

#[test]
fn test_each_position_sees_every_identity() {
    let generator = BoardGenerator::new(8);
    let mut rng = BoardRng::new(5);
    let mut seen = [[false; 8]; 16];
    for _ in 0..500 {
        for (pos, r) in generator.generate(4, 4, &mut rng).iter().enumerate() {
            seen[pos][r.card_id as usize] = true;
        }
    }
    assert!(seen.iter().all(|row| row.iter().all(|&s| s)));
}
