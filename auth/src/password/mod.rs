pub mod errors;
pub mod hasher;
pub mod pool;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use pool::HashingPool;
pub use pool::DEFAULT_MAX_CONCURRENT_HASHES;
