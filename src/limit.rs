//! Snapshot truncation rule applied at `Commit`.

use std::collections::VecDeque;

/// How a produced snapshot is truncated before being sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotLimit {
    /// Keep the first `size` elements.
    Head(usize),
    /// Keep the last `size` elements.
    Tail(usize),
    /// Keep everything.
    Unlimited,
}

impl SnapshotLimit {
    /// Returns a fresh accumulator matching this limit's truncation policy.
    pub fn accumulator<T>(self) -> LimitAccumulator<T> {
        match self {
            SnapshotLimit::Head(size) => LimitAccumulator::Head(Vec::new(), size),
            SnapshotLimit::Tail(size) => LimitAccumulator::Tail(VecDeque::with_capacity(size.min(1024)), size),
            SnapshotLimit::Unlimited => LimitAccumulator::Unlimited(Vec::new()),
        }
    }
}

/// Accumulates evaluated outputs under a [`SnapshotLimit`] during a single
/// `Commit` scan, then yields the final ordered vector.
pub enum LimitAccumulator<T> {
    Head(Vec<T>, usize),
    /// Bounded ring: pushing past `size` evicts the oldest element.
    Tail(VecDeque<T>, usize),
    Unlimited(Vec<T>),
}

impl<T> LimitAccumulator<T> {
    /// Offers one output to the accumulator. For `Head`, returns `false`
    /// once `size` has been reached so the caller can stop scanning early.
    pub fn push(&mut self, value: T) -> bool {
        match self {
            LimitAccumulator::Head(values, size) => {
                if values.len() >= *size {
                    return false;
                }
                values.push(value);
                values.len() < *size
            }
            LimitAccumulator::Tail(ring, size) => {
                if *size == 0 {
                    return true;
                }
                if ring.len() >= *size {
                    ring.pop_front();
                }
                ring.push_back(value);
                true
            }
            LimitAccumulator::Unlimited(values) => {
                values.push(value);
                true
            }
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            LimitAccumulator::Head(values, _) | LimitAccumulator::Unlimited(values) => values,
            LimitAccumulator::Tail(ring, _) => ring.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_stops_after_size() {
        let mut acc = SnapshotLimit::Head(2).accumulator();
        assert!(acc.push(1));
        assert!(!acc.push(2));
        acc.push(3);
        assert_eq!(acc.into_vec(), vec![1, 2]);
    }

    #[test]
    fn tail_keeps_last_n() {
        let mut acc = SnapshotLimit::Tail(2).accumulator();
        for v in 1..=5 {
            acc.push(v);
        }
        assert_eq!(acc.into_vec(), vec![4, 5]);
    }

    #[test]
    fn unlimited_keeps_everything() {
        let mut acc = SnapshotLimit::Unlimited.accumulator();
        for v in 1..=5 {
            acc.push(v);
        }
        assert_eq!(acc.into_vec(), vec![1, 2, 3, 4, 5]);
    }
}
