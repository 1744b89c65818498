//! Fixed-length rolling buffers backing each plotted line.

use std::collections::VecDeque;

/// Number of samples kept per line (one per tick).
pub const WINDOW: usize = 70;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// FIFO of samples whose length never changes: it starts as `cap` zeros and
/// every push evicts the oldest value.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingSeries {
    samples: VecDeque<f64>,
    cap: usize,
}

impl RollingSeries {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            samples: std::iter::repeat(0.0).take(cap).collect(),
            cap,
        }
    }

    pub fn push(&mut self, v: f64) {
        push_capped(&mut self.samples, v, self.cap);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn latest(&self) -> f64 {
        self.samples.back().copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    // NaN samples are skipped so one bad reading can't poison the axis bounds
    pub fn max(&self) -> f64 {
        self.iter()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.iter().filter(|v| !v.is_nan()).fold(f64::INFINITY, f64::min)
    }

    /// Chart coordinates: x is the slot index (oldest at 0), y the sample.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.iter()
            .enumerate()
            .map(|(i, v)| (i as f64, v))
            .collect()
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_full_of_zeros() {
        let s = RollingSeries::new(5);
        assert_eq!(s.len(), 5);
        assert_eq!(s.to_vec(), vec![0.0; 5]);
        assert_eq!(RollingSeries::default().len(), WINDOW);
    }

    #[test]
    fn partial_fill_keeps_leading_zeros_in_order() {
        let mut s = RollingSeries::new(6);
        for v in [1.5, 2.5, 3.5] {
            s.push(v);
        }
        assert_eq!(s.to_vec(), vec![0.0, 0.0, 0.0, 1.5, 2.5, 3.5]);
        assert_eq!(s.latest(), 3.5);
    }

    #[test]
    fn one_past_capacity_evicts_first_value() {
        let mut s = RollingSeries::new(4);
        for v in 1..=5 {
            s.push(v as f64);
        }
        assert_eq!(s.to_vec(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut s = RollingSeries::new(0);
        assert_eq!(s.capacity(), 1);
        s.push(7.0);
        s.push(8.0);
        assert_eq!(s.to_vec(), vec![8.0]);
    }

    #[test]
    fn non_finite_values_are_stored_as_is() {
        let mut s = RollingSeries::new(3);
        s.push(f64::NAN);
        s.push(f64::INFINITY);
        assert_eq!(s.len(), 3);
        assert!(s.to_vec()[1].is_nan());
        assert_eq!(s.latest(), f64::INFINITY);
        assert_eq!(s.min(), 0.0);
        assert_eq!(s.max(), f64::INFINITY);
    }

    #[test]
    fn points_are_indexed_oldest_first() {
        let mut s = RollingSeries::new(3);
        s.push(9.0);
        assert_eq!(s.points(), vec![(0.0, 0.0), (1.0, 0.0), (2.0, 9.0)]);
    }

    proptest! {
        #[test]
        fn length_never_changes(cap in 1usize..200, values in proptest::collection::vec(-1e6f64..1e6, 0..400)) {
            let mut s = RollingSeries::new(cap);
            for v in values {
                s.push(v);
                prop_assert_eq!(s.len(), cap);
            }
        }

        #[test]
        fn keeps_the_most_recent_window(cap in 1usize..50, values in proptest::collection::vec(0f64..100.0, 0..120)) {
            let mut s = RollingSeries::new(cap);
            for &v in &values {
                s.push(v);
            }
            let mut expected = vec![0.0; cap.saturating_sub(values.len())];
            expected.extend(values.iter().skip(values.len().saturating_sub(cap)));
            prop_assert_eq!(s.to_vec(), expected);
        }
    }
}
