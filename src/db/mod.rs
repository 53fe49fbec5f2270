pub mod memory;
pub mod redis;
pub mod store;

pub use memory::InMemoryWatchlistStore;
pub use redis::create_redis_client;
pub use redis::RedisWatchlistStore;
pub use store::WatchlistStore;
