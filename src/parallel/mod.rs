pub mod concurrent_map;
pub mod process_queries;