// Adapters layer: concrete implementations of the domain ports (cache stores, carrier http).

pub mod file_cache;
pub mod memory_cache;
pub mod ups_client;

pub use file_cache::FileCacheStore;
pub use memory_cache::MemoryCacheStore;
pub use ups_client::UpsRateClient;
