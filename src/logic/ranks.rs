//! Best and worst possible placement from pairwise score-bound comparison.

/// What rank bounds need to know about each player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contender {
    pub min_score: f64,
    pub max_score: f64,
    pub unplayed: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RankBounds {
    pub best: u32,
    pub worst: u32,
}

/// Rank bounds for every contender, in input order.
///
/// `best` counts the players certain to finish strictly ahead (their minimum
/// above our maximum). `worst` counts a full place for everyone whose maximum
/// reaches our minimum, a half place for anyone who reaches it only with extra
/// credit for their unplayed games, and is then rounded up.
pub fn rank_bounds(field: &[Contender]) -> Vec<RankBounds> {
    field
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let mut best = 1u32;
            let mut worst = 1.0f64;
            for (j, other) in field.iter().enumerate() {
                if i == j {
                    continue;
                }
                if other.min_score > player.max_score {
                    best += 1;
                }
                if other.max_score >= player.min_score {
                    worst += 1.0;
                } else if other.max_score + other.unplayed as f64 >= player.min_score {
                    worst += 0.5;
                }
            }
            RankBounds {
                best,
                worst: (worst + 0.9) as u32,
            }
        })
        .collect()
}
