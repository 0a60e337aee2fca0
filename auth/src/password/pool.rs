use std::sync::Arc;

use tokio::sync::Semaphore;

use super::errors::PasswordError;
use super::hasher::PasswordHasher;

/// Default number of password operations allowed to run at once.
pub const DEFAULT_MAX_CONCURRENT_HASHES: usize = 4;

/// Runs password hashing off the async runtime.
///
/// Argon2 is deliberately slow and memory hungry, so every hash and verify is
/// moved onto Tokio's blocking pool. A semaphore caps how many run at once;
/// callers beyond the cap wait asynchronously for a permit instead of piling
/// more threads onto the blocking pool.
#[derive(Debug, Clone)]
pub struct HashingPool {
    hasher: PasswordHasher,
    permits: Arc<Semaphore>,
}

impl HashingPool {
    /// Create a pool allowing `max_concurrent` simultaneous operations.
    ///
    /// A value of zero is treated as one.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            hasher: PasswordHasher::new(),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Hash `password` on a blocking worker.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 failed
    /// * `WorkerFailed` - The worker panicked or the pool was shut down
    pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.hasher;
        self.run(move || hasher.hash(&password)).await?
    }

    /// Verify `password` against `digest` on a blocking worker.
    ///
    /// # Errors
    /// * `WorkerFailed` - The worker panicked or the pool was shut down
    pub async fn verify(&self, password: String, digest: String) -> Result<bool, PasswordError> {
        let hasher = self.hasher;
        self.run(move || hasher.verify(&password, &digest)).await
    }

    // The permit moves into the job, so a cancelled caller keeps its slot
    // taken until the blocking work actually finishes.
    async fn run<T, F>(&self, job: F) -> Result<T, PasswordError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| PasswordError::WorkerFailed(e.to_string()))
    }
}

impl Default for HashingPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_HASHES)
    }
}
