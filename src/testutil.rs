//! Shared helpers for unit tests.

use crate::xmit::PulseTrain;
use std::vec::Vec;

/// Expands a pulse train into the edge timestamps a receiver would
/// capture, starting at `t = 0`.
pub(crate) fn times_from_train(train: &PulseTrain) -> Vec<i32> {
    times_from_train_at(train, 0)
}

/// Expands a pulse train into edge timestamps starting at `start`,
/// wrapping like a narrow platform clock would.
pub(crate) fn times_from_train_at(train: &PulseTrain, start: i32) -> Vec<i32> {
    let durs = train.as_slice();
    let mut t = start;
    let mut times = Vec::with_capacity(durs.len() + 1);
    times.push(t);
    for (i, &d) in durs.iter().enumerate() {
        t = t.wrapping_add(i32::from(d));
        // A trailing space ends with the line already idle, so its
        // closing boundary produces no edge.
        let trailing_space = i == durs.len() - 1 && durs.len() % 2 == 0;
        if !trailing_space {
            times.push(t);
        }
    }
    times
}
