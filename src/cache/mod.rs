pub mod hash_cache;
pub mod policy;

pub use hash_cache::HashCache;
pub use policy::EvictionPolicy;
