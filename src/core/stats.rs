use std::collections::VecDeque;
use serde::{Serialize, Deserialize};

/// Sliding window over the outcomes of the most recent requests.
///
/// Only the number of documents found is remembered per request. The count of
/// empty outcomes inside the window is maintained incrementally so reading it
/// never walks the window.
#[derive(Debug, Clone)]
pub struct RequestStats {
    requests: VecDeque<RequestOutcome>,
    capacity: usize,
    no_result_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    pub found_documents: usize,
}

impl RequestOutcome {
    pub fn is_empty(&self) -> bool {
        self.found_documents == 0
    }
}

/// Point-in-time view of the window, for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStatsSummary {
    pub window_len: usize,
    pub capacity: usize,
    pub no_result_requests: usize,
}

impl RequestStats {
    pub fn new(capacity: usize) -> Self {
        RequestStats {
            requests: VecDeque::with_capacity(capacity),
            capacity,
            no_result_count: 0,
        }
    }

    pub fn record(&mut self, found_documents: usize) {
        if self.capacity == 0 {
            return;
        }
        if self.requests.len() >= self.capacity {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.is_empty() {
                    self.no_result_count -= 1;
                }
            }
        }
        let outcome = RequestOutcome { found_documents };
        if outcome.is_empty() {
            self.no_result_count += 1;
        }
        self.requests.push_back(outcome);
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn summary(&self) -> RequestStatsSummary {
        RequestStatsSummary {
            window_len: self.requests.len(),
            capacity: self.capacity,
            no_result_requests: self.no_result_count,
        }
    }
}
