//! List cardinality for list-typed fields.

use rand::Rng;
use std::sync::Arc;

use super::Producer;
use crate::domain::{ResolveInfo, Resolved, SampleConfig};

/// Effective list size policy after defaults and the inversion fix-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub min: u32,
    pub max: u32,
    pub size: Option<u32>,
}

impl SampleRange {
    /// Applies the `{min: 1, max: 1}` defaults, then corrects an inverted range
    /// by moving `max` to `min + 1`.
    pub fn from_config(config: Option<&SampleConfig>) -> Self {
        let config = config.copied().unwrap_or_default();
        let min = config.min.unwrap_or(1);
        let mut max = config.max.unwrap_or(1);
        if min > max {
            max = min.saturating_add(1);
        }
        Self {
            min,
            max,
            size: config.size,
        }
    }

    pub fn pick_len(&self) -> usize {
        match self.size {
            Some(size) => size as usize,
            None => rand::thread_rng().gen_range(self.min..=self.max) as usize,
        }
    }
}

/// Wraps an item producer into a list producer. Every item is produced
/// independently with the same invocation.
pub fn list_producer(item: Producer, range: SampleRange) -> Producer {
    Arc::new(move |info: &ResolveInfo<'_>| {
        let len = range.pick_len();
        Resolved::List((0..len).map(|_| item(info)).collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: Option<u32>, max: Option<u32>, size: Option<u32>) -> SampleRange {
        SampleRange::from_config(Some(&SampleConfig { min, max, size }))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            SampleRange::from_config(None),
            SampleRange {
                min: 1,
                max: 1,
                size: None
            }
        );
    }

    #[test]
    fn test_inverted_range_moves_max() {
        let corrected = range(Some(5), Some(2), None);
        assert_eq!(corrected.min, 5);
        assert_eq!(corrected.max, 6);
        for _ in 0..200 {
            let len = corrected.pick_len();
            assert!((5..=6).contains(&len));
        }
    }

    #[test]
    fn test_min_only_is_inverted_against_default_max() {
        let corrected = range(Some(3), None, None);
        assert_eq!((corrected.min, corrected.max), (3, 4));
    }

    #[test]
    fn test_fixed_range() {
        let fixed = range(Some(2), Some(2), None);
        for _ in 0..100 {
            assert_eq!(fixed.pick_len(), 2);
        }
    }

    #[test]
    fn test_size_wins_even_when_zero() {
        assert_eq!(range(Some(3), Some(9), Some(4)).pick_len(), 4);
        assert_eq!(range(None, None, Some(0)).pick_len(), 0);
    }

    #[test]
    fn test_zero_length_range() {
        let empty = range(Some(0), Some(0), None);
        assert_eq!(empty.pick_len(), 0);
    }
}
