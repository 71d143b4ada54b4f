//! # Time Buckets - Sliding Block-Time Index
//!
//! Ring of hash lists keyed by wall-clock bucket. Bucket `i` covers
//! `[time_base + i * d, time_base + (i + 1) * d)` where `d` is the bucket
//! duration.
//!
//! ## Invariants
//!
//! - `time_base` is always a multiple of the bucket duration.
//! - Insertions before `time_base` are rejected; the base only moves forward.
//! - Buckets are dropped only from the front, by `expire()`.
//! - Buckets are append logs: duplicates are tolerated.
//! - The index never holds more than `max_buckets` buckets; later times are
//!   rejected instead of grown into.

use crate::error::{TxGuardError, TxGuardResult};
use shared_types::Hash;

/// Sliding window of hash lists keyed by time bucket.
#[derive(Debug)]
pub struct TimeBuckets {
    /// Bucket-aligned lower edge of the window.
    time_base: u64,
    /// Width of one bucket in seconds (non-zero).
    bucket_duration: u64,
    /// `buckets[0]` starts at `time_base`.
    buckets: Vec<Vec<Hash>>,
    /// Upper bound on `buckets.len()`.
    max_buckets: usize,
}

impl TimeBuckets {
    /// Creates an index whose base is `time_base` aligned down to the
    /// bucket duration, with `capacity` buckets preallocated and at most
    /// `max_buckets` buckets ever held.
    pub fn new(time_base: u64, bucket_duration: u64, capacity: usize, max_buckets: usize) -> Self {
        debug_assert!(bucket_duration > 0);
        Self {
            time_base: time_base - time_base % bucket_duration,
            bucket_duration,
            buckets: Vec::with_capacity(capacity.min(max_buckets)),
            max_buckets,
        }
    }

    pub fn time_base(&self) -> u64 {
        self.time_base
    }

    /// Number of live buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Allocated bucket capacity.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// First time that no longer fits in the index.
    pub fn horizon(&self) -> u64 {
        (self.max_buckets as u64)
            .saturating_mul(self.bucket_duration)
            .saturating_add(self.time_base)
    }

    fn bucket_index(&self, time: u64) -> u64 {
        time / self.bucket_duration
    }

    /// Appends `hash` to the bucket covering `time`.
    ///
    /// # Errors
    /// - `TimeBucketTime`: `time` precedes the window base
    /// - `TimeBucketHorizon`: `time` is `max_buckets` or more buckets past the base
    pub fn add(&mut self, time: u64, hash: Hash) -> TxGuardResult<()> {
        let base_index = self.bucket_index(self.time_base);
        let bucket_index = self.bucket_index(time);
        if bucket_index < base_index {
            return Err(TxGuardError::TimeBucketTime {
                time,
                time_base: self.time_base,
            });
        }
        let offset = bucket_index - base_index;
        if offset >= self.max_buckets as u64 {
            return Err(TxGuardError::TimeBucketHorizon {
                time,
                horizon: self.horizon(),
            });
        }
        let index = offset as usize;

        if index >= self.buckets.len() {
            if index >= self.buckets.capacity() {
                let new_capacity = index.saturating_mul(2).clamp(index + 1, self.max_buckets);
                self.buckets
                    .reserve_exact(new_capacity - self.buckets.len());
            }
            self.buckets.resize_with(index + 1, Vec::new);
        }
        self.buckets[index].push(hash);
        Ok(())
    }

    /// Moves the window base to `new_time_base` and returns every hash in
    /// the buckets that fell out of the window.
    ///
    /// A base that does not move forward by at least one bucket is a no-op:
    /// nothing is returned and `time_base` is left untouched.
    pub fn expire(&mut self, new_time_base: u64) -> Vec<Hash> {
        let base_index = self.bucket_index(self.time_base);
        let new_base_index = self.bucket_index(new_time_base);
        if new_base_index <= base_index {
            return Vec::new();
        }

        let consumed = ((new_base_index - base_index) as usize).min(self.buckets.len());
        let expired: Vec<Hash> = self.buckets.drain(..consumed).flatten().collect();
        self.time_base = new_time_base - new_time_base % self.bucket_duration;
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: u64 = 60;
    const MAX: usize = 64;

    fn make_hash(n: u8) -> Hash {
        let mut h = [0u8; 32];
        h[0] = n;
        h
    }

    #[test]
    fn test_new_aligns_base() {
        let tb = TimeBuckets::new(150, D, 4, MAX);
        assert_eq!(tb.time_base(), 120);
        assert!(tb.is_empty());
        assert!(tb.capacity() >= 4);
    }

    #[test]
    fn test_add_and_expire_scenario() {
        let mut tb = TimeBuckets::new(120, D, 4, MAX);

        tb.add(120, make_hash(b'a')).unwrap();
        assert_eq!(tb.len(), 1);

        let err = tb.add(119, make_hash(b'b')).unwrap_err();
        assert_eq!(
            err,
            TxGuardError::TimeBucketTime {
                time: 119,
                time_base: 120
            }
        );

        assert_eq!(tb.expire(180), vec![make_hash(b'a')]);
        assert_eq!(tb.time_base(), 180);
        assert!(tb.is_empty());
    }

    #[test]
    fn test_same_bucket_keeps_duplicates_in_order() {
        let mut tb = TimeBuckets::new(0, D, 2, MAX);
        tb.add(10, make_hash(1)).unwrap();
        tb.add(59, make_hash(2)).unwrap();
        tb.add(30, make_hash(1)).unwrap();
        assert_eq!(tb.len(), 1);
        assert_eq!(tb.expire(60), vec![make_hash(1), make_hash(2), make_hash(1)]);
    }

    #[test]
    fn test_expire_before_or_within_base_is_noop() {
        let mut tb = TimeBuckets::new(600, D, 4, MAX);
        tb.add(600, make_hash(1)).unwrap();

        assert!(tb.expire(0).is_empty());
        assert!(tb.expire(599).is_empty());
        assert!(tb.expire(659).is_empty());
        assert!(tb.expire(659).is_empty());
        assert_eq!(tb.time_base(), 600);
        assert_eq!(tb.len(), 1);
    }

    #[test]
    fn test_expire_partial_window() {
        let mut tb = TimeBuckets::new(0, D, 4, MAX);
        tb.add(0, make_hash(0)).unwrap();
        tb.add(60, make_hash(1)).unwrap();
        tb.add(130, make_hash(2)).unwrap();

        assert_eq!(tb.expire(125), vec![make_hash(0), make_hash(1)]);
        assert_eq!(tb.time_base(), 120);
        assert_eq!(tb.len(), 1);

        // bucket indices are now relative to the new base
        tb.add(125, make_hash(3)).unwrap();
        assert_eq!(tb.expire(180), vec![make_hash(2), make_hash(3)]);
    }

    #[test]
    fn test_expire_beyond_window_clamps() {
        let mut tb = TimeBuckets::new(0, D, 4, MAX);
        tb.add(0, make_hash(0)).unwrap();
        tb.add(60, make_hash(1)).unwrap();

        let expired = tb.expire(60 * 100);
        assert_eq!(expired, vec![make_hash(0), make_hash(1)]);
        assert_eq!(tb.time_base(), 6_000);
        assert!(tb.is_empty());

        assert!(tb.add(5_999, make_hash(2)).is_err());
        tb.add(6_000, make_hash(2)).unwrap();
        assert_eq!(tb.len(), 1);
    }

    #[test]
    fn test_grows_past_preallocated_capacity() {
        let mut tb = TimeBuckets::new(0, D, 2, MAX);
        tb.add(60 * 9, make_hash(9)).unwrap();
        assert_eq!(tb.len(), 10);
        assert!(tb.capacity() >= 18);

        // slot 0 from an earlier time still accepted
        tb.add(0, make_hash(0)).unwrap();
        assert_eq!(tb.len(), 10);
        assert_eq!(tb.expire(60 * 10), vec![make_hash(0), make_hash(9)]);
    }

    #[test]
    fn test_zero_capacity_grows() {
        let mut tb = TimeBuckets::new(0, D, 0, MAX);
        tb.add(0, make_hash(1)).unwrap();
        assert_eq!(tb.len(), 1);
    }

    #[test]
    fn test_far_future_time_rejected() {
        let mut tb = TimeBuckets::new(120, D, 4, MAX);
        assert_eq!(tb.horizon(), 120 + 60 * 64);

        let err = tb.add(u64::MAX, make_hash(1)).unwrap_err();
        assert_eq!(
            err,
            TxGuardError::TimeBucketHorizon {
                time: u64::MAX,
                horizon: 3_960
            }
        );
        assert!(tb.add(3_960, make_hash(2)).is_err());
        assert!(tb.is_empty());

        // last bucket before the horizon is still usable
        tb.add(3_959, make_hash(3)).unwrap();
        assert_eq!(tb.len(), MAX);
    }

    #[test]
    fn test_horizon_moves_with_base() {
        let mut tb = TimeBuckets::new(0, D, 4, 2);
        assert!(tb.add(120, make_hash(1)).is_err());
        tb.expire(60);
        tb.add(120, make_hash(1)).unwrap();
        assert_eq!(tb.len(), 2);
    }

    #[test]
    fn test_horizon_saturates() {
        let tb = TimeBuckets::new(u64::MAX, D, 0, usize::MAX);
        assert_eq!(tb.horizon(), u64::MAX);
    }
}
