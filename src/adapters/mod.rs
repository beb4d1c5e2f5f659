// Adapters layer: concrete implementations for external systems (search provider, cache, storage).

pub mod cache;
pub mod serper;
pub mod storage;
