use serde::{Deserialize, Serialize};

use crate::core::{Cents, SplitMode};

/// An amount split into worker, entrepreneur, and impact thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thirds {
    pub worker: Cents,
    pub entrepreneur: Cents,
    pub impact: Cents,
}

impl Thirds {
    pub fn sum(&self) -> Cents {
        self.worker + self.entrepreneur + self.impact
    }
}

/// Split `total` into three near-equal parts.
///
/// Each part starts at `floor(total / 3)`; the 0–2 remainder cents go out one
/// at a time in the priority order of `mode`. The parts always sum to `total`.
///
/// ```
/// use wertfluss::{split_thirds, SplitMode};
///
/// let t = split_thirds(100, SplitMode::Labor);
/// assert_eq!((t.worker, t.entrepreneur, t.impact), (33, 33, 34));
/// ```
pub fn split_thirds(total: Cents, mode: SplitMode) -> Thirds {
    let base = total.div_euclid(3);
    let remainder = total.rem_euclid(3);

    let mut thirds = Thirds {
        worker: base,
        entrepreneur: base,
        impact: base,
    };

    let priority: [&mut Cents; 2] = match mode {
        SplitMode::Labor => [&mut thirds.impact, &mut thirds.entrepreneur],
        SplitMode::Markup => [&mut thirds.worker, &mut thirds.impact],
    };
    for bucket in priority.into_iter().take(remainder as usize) {
        *bucket += 1;
    }

    thirds
}
