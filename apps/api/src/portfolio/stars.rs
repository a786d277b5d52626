use serde::Serialize;

pub const STAR_COUNT: i64 = 5;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StarState {
    Filled,
    Empty,
}

/// Five-star rating for a skill level. Position `i` (1-based) is filled iff
/// `i <= level`, so negative levels render all empty and levels above five
/// render all filled.
pub fn star_states(level: i64) -> [StarState; STAR_COUNT as usize] {
    let mut stars = [StarState::Empty; STAR_COUNT as usize];
    for (slot, position) in stars.iter_mut().zip(1..=STAR_COUNT) {
        if position <= level {
            *slot = StarState::Filled;
        }
    }
    stars
}
