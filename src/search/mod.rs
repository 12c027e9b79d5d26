pub mod results;
pub mod request_queue;
pub mod duplicates;