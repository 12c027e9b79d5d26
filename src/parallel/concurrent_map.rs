use std::collections::BTreeMap;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use crate::core::types::DocId;

/// Keys that can be routed to a bucket by `key mod bucket_count`.
pub trait BucketKey: Copy + Ord {
    fn bucket(&self, bucket_count: usize) -> usize;
}

macro_rules! impl_unsigned_bucket_key {
    ($($t:ty),*) => {
        $(impl BucketKey for $t {
            fn bucket(&self, bucket_count: usize) -> usize {
                (*self as u64 % bucket_count as u64) as usize
            }
        })*
    };
}

macro_rules! impl_signed_bucket_key {
    ($($t:ty),*) => {
        $(impl BucketKey for $t {
            fn bucket(&self, bucket_count: usize) -> usize {
                (*self as i64).rem_euclid(bucket_count as i64) as usize
            }
        })*
    };
}

impl_unsigned_bucket_key!(u8, u16, u32, u64, usize);
impl_signed_bucket_key!(i8, i16, i32, i64, isize);

impl BucketKey for DocId {
    fn bucket(&self, bucket_count: usize) -> usize {
        self.0.bucket(bucket_count)
    }
}

/// Lock-striped map: a fixed number of buckets, each behind its own mutex.
///
/// Every operation locks exactly one bucket at a time, so no lock ordering
/// between buckets exists.
pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

/// Scoped access to one value; the bucket stays locked until it is dropped.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

impl<K: BucketKey, V> ConcurrentMap<K, V> {
    /// A zero bucket count is raised to one.
    pub fn new(bucket_count: usize) -> Self {
        let buckets = (0..bucket_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        ConcurrentMap { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.buckets[key.bucket(self.buckets.len())]
    }

    /// Lock the bucket of `key` and hand out its value, inserting the default
    /// first when the key is absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        let bucket = self.bucket(&key).lock();
        MutexGuard::map(bucket, |entries| entries.entry(key).or_default())
    }

    /// Copy of all entries, taken one bucket at a time.
    ///
    /// Each bucket is consistent with itself; entries of different buckets may
    /// come from different moments if writers are active.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut ordinary = BTreeMap::new();
        for bucket in &self.buckets {
            let entries = bucket.lock();
            ordinary.extend(entries.iter().map(|(k, v)| (*k, v.clone())));
        }
        ordinary
    }

    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut ordinary = BTreeMap::new();
        for bucket in self.buckets {
            ordinary.append(&mut bucket.into_inner());
        }
        ordinary
    }
}
