//! Daily knowledge feed

pub mod cache;
pub mod ports;

pub use cache::KnowledgeCardCache;
pub use ports::KeyValueStore;
