//! In-memory implementation of the `ReadStateRepository` port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::read_state::{
    domain::{ReadState, ReadStateKey},
    ports::{ReadStateError, ReadStateRepository, ReadStateResult},
};

/// Thread-safe in-memory read-state store.
///
/// The supplied clock plays the role of the server clock: `mark_read`
/// stamps whatever it reports.
#[derive(Debug, Clone)]
pub struct InMemoryReadStateRepository<C>
where
    C: Clock + Send + Sync,
{
    records: Arc<RwLock<HashMap<ReadStateKey, ReadState>>>,
    clock: Arc<C>,
}

impl<C> InMemoryReadStateRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping times from `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Seeds or replaces a record directly, bypassing merge semantics.
    ///
    /// # Errors
    ///
    /// Returns [`ReadStateError::Connection`] if the internal lock is poisoned.
    pub fn insert(&self, key: ReadStateKey, state: ReadState) -> ReadStateResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|e| ReadStateError::connection(format!("lock poisoned: {e}")))?;
        guard.insert(key, state);
        Ok(())
    }
}

#[async_trait]
impl<C> ReadStateRepository for InMemoryReadStateRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn find(&self, key: &ReadStateKey) -> ReadStateResult<Option<ReadState>> {
        let guard = self
            .records
            .read()
            .map_err(|e| ReadStateError::connection(format!("lock poisoned: {e}")))?;
        Ok(guard.get(key).cloned())
    }

    async fn mark_read(&self, key: &ReadStateKey) -> ReadStateResult<DateTime<Utc>> {
        let now = self.clock.utc();
        let mut guard = self
            .records
            .write()
            .map_err(|e| ReadStateError::connection(format!("lock poisoned: {e}")))?;
        guard.entry(key.clone()).or_default().mark_read_at(now);
        Ok(now)
    }
}
