use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub i32);

impl DocId {
    pub fn new(id: i32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for DocId {
    fn from(id: i32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Per-document data kept next to the index. Content itself is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub rating: i32,
    pub status: DocumentStatus,
}

impl DocumentRecord {
    pub fn new(ratings: &[i32], status: DocumentStatus) -> Self {
        DocumentRecord {
            rating: average_rating(ratings),
            status,
        }
    }
}

/// Mean of the ratings truncated toward zero, 0 when there are none.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}

/// How a read operation spreads its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}
