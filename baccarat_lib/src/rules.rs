//! The fixed third card drawing rules of punto banco.

/// Returns true if the player draws a third card on a two card total of `player_score`.
pub fn player_draws(player_score: u8) -> bool {
    player_score <= 5
}

/// Returns true if the banker draws a third card.
///
/// `banker_score` is the banker's two card total and `player_third` is the pip value of the player's
/// third card, `None` if the player stood. When the player stood the banker only draws on 0-2.
pub fn banker_draws(banker_score: u8, player_third: Option<u8>) -> bool {
    match (banker_score, player_third) {
        (0..=2, _) => true,
        (3, Some(drawn)) => drawn != 8,
        (4, Some(drawn)) => (2..=7).contains(&drawn),
        (5, Some(drawn)) => (4..=7).contains(&drawn),
        (6, Some(drawn)) => (6..=7).contains(&drawn),
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_player_rule() {
        for s in 0..=5 {
            assert!(player_draws(s));
        }
        for s in 6..=9 {
            assert!(!player_draws(s));
        }
    }

    #[test]
    fn test_banker_always_draws_low() {
        for s in 0..=2 {
            assert!(banker_draws(s, None));
            for v in 1..=10 {
                assert!(banker_draws(s, Some(v)));
            }
        }
    }

    #[test]
    fn test_banker_never_draws_high() {
        for s in 7..=9 {
            assert!(!banker_draws(s, None));
            for v in 1..=10 {
                assert!(!banker_draws(s, Some(v)));
            }
        }
    }

    #[test]
    fn test_banker_stands_on_three_to_six_when_player_stood() {
        for s in 3..=6 {
            assert!(!banker_draws(s, None));
        }
    }

    #[test]
    fn test_banker_table() {
        // (banker score, player third card values that make the banker draw)
        let table: [(u8, &[u8]); 4] = [
            (3, &[1, 2, 3, 4, 5, 6, 7, 9, 10]),
            (4, &[2, 3, 4, 5, 6, 7]),
            (5, &[4, 5, 6, 7]),
            (6, &[6, 7]),
        ];
        for (score, draws_on) in table {
            for v in 1..=10 {
                assert_eq!(
                    banker_draws(score, Some(v)),
                    draws_on.contains(&v),
                    "banker {} against player third card {}",
                    score,
                    v
                );
            }
        }
    }

    #[test]
    fn test_documented_examples() {
        assert!(banker_draws(5, Some(6)));
        assert!(!banker_draws(6, Some(5)));
        assert!(!banker_draws(3, Some(8)));
    }
}
