//! Rank Transition Classification
//!
//! Labels one item's rank change between two consecutive chart periods.

use serde::{Deserialize, Serialize};

/// Transition category for one item between consecutive periods.
///
/// Ranks are positions on the list, so a numerically larger next rank is a
/// worse position (`Decrease`) and a numerically smaller one is a better
/// position (`Increase`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Increase,
    Same,
    Decrease,
    Exit,
}

impl Transition {
    /// All categories, in the fixed order used for movement-matrix rows.
    pub const ALL: [Transition; 4] = [
        Transition::Increase,
        Transition::Same,
        Transition::Decrease,
        Transition::Exit,
    ];

    pub const COUNT: usize = 4;

    /// Classify a rank change.
    ///
    /// `next` is the item's rank in the immediately following chronological
    /// period, or `None` when the item has no later observation.
    ///
    /// Known modeling approximation: an item that dropped off the list and
    /// an item whose observation window simply ended are indistinguishable
    /// in the input data. Both classify as `Exit`.
    pub fn classify(current: u32, next: Option<u32>) -> Self {
        match next {
            None => Transition::Exit,
            Some(n) if n > current => Transition::Decrease,
            Some(n) if n == current => Transition::Same,
            Some(_) => Transition::Increase,
        }
    }

    /// Column index of this category in a movement-matrix row.
    pub fn index(self) -> usize {
        match self {
            Transition::Increase => 0,
            Transition::Same => 1,
            Transition::Decrease => 2,
            Transition::Exit => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Increase => "increase",
            Transition::Same => "same",
            Transition::Decrease => "decrease",
            Transition::Exit => "exit",
        }
    }
}
