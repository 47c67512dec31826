//! Weight model scoring one candidate pairing
//!
//! A weight is the sum of two terms:
//! - a repeat-avoidance bonus, awarded when the second participant is one the
//!   first has faced fewer times than their most-faced opponent
//! - the pairing quality, from the higher score (importance) and how close the
//!   two scores are (closeness)
//!
//! The bonus is always larger than any quality term, so staving off the most
//! repeated rematch dominates standings closeness.

use std::collections::HashMap;

use crate::pairing::quality::quality;
use crate::types::{Participant, Points, Weight};

/// Score a candidate pairing of `p1` against `p2`
///
/// `highest_points` must be the maximum points value in the round. Only `p1`'s
/// opponent history is inspected.
pub fn weight(highest_points: Points, p1: &Participant, p2: &Participant) -> Weight {
    let best = p1.points.max(p2.points);
    let worst = p1.points.min(p2.points);
    let spread = best - worst;
    let closeness = highest_points.saturating_sub(spread);
    let importance = best;

    rematch_bonus(highest_points, p1, p2).saturating_add(quality(importance, closeness))
}

/// Bonus for pairing `p1` with an opponent they have not faced as often as their
/// most-faced opponent
///
/// An opponent absent from the history counts as faced without bound and earns
/// nothing, as does an empty history.
pub fn rematch_bonus(highest_points: Points, p1: &Participant, p2: &Participant) -> Weight {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for opponent in &p1.opponents {
        *counts.entry(opponent.as_str()).or_insert(0) += 1;
    }

    let Some(most_faced) = counts.values().copied().max() else {
        return 0;
    };

    match counts.get(p2.id.as_str()) {
        Some(&faced) if faced < most_faced => max_bonus(highest_points),
        _ => 0,
    }
}

/// One more than the largest quality term any pairing can score
pub fn max_bonus(highest_points: Points) -> Weight {
    quality(highest_points, highest_points).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::test_support::standings;

    #[test]
    fn test_fixture_weights() {
        let players = standings();

        assert_eq!(weight(3, &players[0], &players[1]), 4);
        assert_eq!(weight(3, &players[1], &players[2]), 6);
        assert_eq!(weight(3, &players[0], &players[7]), 4);
    }

    #[test]
    fn test_equal_top_scores_weigh_most() {
        let players = standings();

        // Abimbola v Furaha: both on 3 points, never met
        assert_eq!(weight(3, &players[0], &players[5]), 16);
        // Chiamaka v Delo: both on 1 point, but they have met
        assert_eq!(weight(3, &players[2], &players[3]), 8);
    }

    #[test]
    fn test_rematch_bonus_for_less_repeated_opponent() {
        let p1 = Participant::new("Abimbola", 2, ["Boipelo", "Boipelo", "Chiamaka"]);
        let boipelo = Participant::new("Boipelo", 2, Vec::<String>::new());
        let chiamaka = Participant::new("Chiamaka", 2, Vec::<String>::new());
        let delo = Participant::new("Delo", 2, Vec::<String>::new());

        assert_eq!(rematch_bonus(2, &p1, &boipelo), 0);
        assert_eq!(rematch_bonus(2, &p1, &chiamaka), max_bonus(2));
        assert_eq!(rematch_bonus(2, &p1, &delo), 0);

        assert_eq!(weight(2, &p1, &chiamaka), max_bonus(2) + quality(2, 2));
    }

    #[test]
    fn test_no_bonus_without_history() {
        let p1 = Participant::new("Abimbola", 1, Vec::<String>::new());
        let p2 = Participant::new("Boipelo", 1, ["Abimbola", "Abimbola", "Delo"]);

        assert_eq!(rematch_bonus(1, &p1, &p2), 0);
        assert_eq!(weight(1, &p1, &p2), quality(1, 1));
    }

    #[test]
    fn test_rematch_check_is_one_directional() {
        let p1 = Participant::new("Abimbola", 0, ["Boipelo"]);
        let p2 = Participant::new("Boipelo", 0, ["Abimbola", "Chiamaka", "Chiamaka"]);

        assert_eq!(rematch_bonus(0, &p1, &p2), 0);
        assert_eq!(rematch_bonus(0, &p2, &p1), max_bonus(0));
        assert_ne!(weight(0, &p1, &p2), weight(0, &p2, &p1));
    }

    #[test]
    fn test_bonus_dominates_any_quality_term() {
        let highest = 7;
        for importance in 0..=highest {
            for closeness in 0..=highest {
                assert!(max_bonus(highest) > quality(importance, closeness));
            }
        }
    }

    #[test]
    fn test_extreme_points_saturate_instead_of_overflowing() {
        let history = ["Boipelo", "Boipelo", "Chiamaka"];
        let p1 = Participant::new("Abimbola", Points::MAX, history);
        let p2 = Participant::new("Chiamaka", Points::MAX, Vec::<String>::new());

        assert_eq!(max_bonus(Points::MAX), Weight::MAX);
        assert_eq!(weight(Points::MAX, &p1, &p2), Weight::MAX);
    }

    #[test]
    fn test_points_above_highest_saturate_closeness() {
        let p1 = Participant::new("Abimbola", 9, Vec::<String>::new());
        let p2 = Participant::new("Boipelo", 0, Vec::<String>::new());

        assert_eq!(weight(3, &p1, &p2), quality(9, 0));
    }
}
