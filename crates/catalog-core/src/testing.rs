//! In-memory repository double for controller tests.
//!
//! Enabled with the `mock` feature. [`MockRepository`] behaves like a tiny
//! store (so lookups by id work without per-test setup) and records every
//! call together with its argument, so tests can assert how often a
//! mutating operation ran and with which entity.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::{Entity, EntityId, Repository};

/// Repository operation, used to count calls and script failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOp {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
}

/// A single recorded call and the argument it received.
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryCall<E> {
    GetAll,
    GetById(EntityId),
    Create(E),
    Update(E),
    Delete(E),
}

impl<E> RepositoryCall<E> {
    /// The operation this call invoked.
    pub fn op(&self) -> RepositoryOp {
        match self {
            Self::GetAll => RepositoryOp::GetAll,
            Self::GetById(_) => RepositoryOp::GetById,
            Self::Create(_) => RepositoryOp::Create,
            Self::Update(_) => RepositoryOp::Update,
            Self::Delete(_) => RepositoryOp::Delete,
        }
    }
}

/// Mock repository that keeps records in memory and records every call.
#[derive(Debug)]
pub struct MockRepository<E> {
    /// Stored records keyed by identity.
    records: Mutex<BTreeMap<EntityId, E>>,
    /// Every call in invocation order.
    calls: Mutex<Vec<RepositoryCall<E>>>,
    /// Errors to return instead of touching the store.
    failures: Mutex<HashMap<RepositoryOp, AppError>>,
}

impl<E: Entity> MockRepository<E> {
    /// Create an empty mock repository.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Create a mock repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let mock = Self::new();
        {
            let mut store = mock.records.lock().unwrap_or_else(|e| e.into_inner());
            for record in records {
                store.insert(record.id(), record);
            }
        }
        mock
    }

    /// Make every subsequent call to `op` fail with `error`.
    pub fn fail_on(&self, op: RepositoryOp, error: AppError) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.insert(op, error);
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RepositoryCall<E>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of times `op` was invoked.
    pub fn call_count(&self, op: RepositoryOp) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    /// Entities passed to `create`, as received.
    pub fn created(&self) -> Vec<E> {
        self.arguments(|call| match call {
            RepositoryCall::Create(e) => Some(e.clone()),
            _ => None,
        })
    }

    /// Entities passed to `update`.
    pub fn updated(&self) -> Vec<E> {
        self.arguments(|call| match call {
            RepositoryCall::Update(e) => Some(e.clone()),
            _ => None,
        })
    }

    /// Entities passed to `delete`.
    pub fn deleted(&self) -> Vec<E> {
        self.arguments(|call| match call {
            RepositoryCall::Delete(e) => Some(e.clone()),
            _ => None,
        })
    }

    /// Snapshot of the stored records, ordered by id.
    pub fn records(&self) -> Vec<E> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    fn arguments(&self, pick: impl Fn(&RepositoryCall<E>) -> Option<E>) -> Vec<E> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter_map(pick)
            .collect()
    }

    fn record(&self, call: RepositoryCall<E>) -> AppResult<()> {
        let op = call.op();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);

        let failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        match failures.get(&op) {
            Some(err) => {
                tracing::debug!("[MockRepo] Scripted failure for {:?}: {}", op, err);
                Err(err.clone())
            }
            None => Ok(()),
        }
    }
}

impl<E: Entity> Default for MockRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MockRepository<E> {
    async fn get_all(&self) -> AppResult<Vec<E>> {
        self.record(RepositoryCall::GetAll)?;
        Ok(self.records())
    }

    async fn get_by_id(&self, id: EntityId) -> AppResult<Option<E>> {
        self.record(RepositoryCall::GetById(id))?;
        let store = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(store.get(&id).cloned())
    }

    async fn create(&self, entity: &mut E) -> AppResult<()> {
        self.record(RepositoryCall::Create(entity.clone()))?;
        let mut store = self.records.lock().unwrap_or_else(|e| e.into_inner());
        // The store owns identity: any submitted id is replaced.
        let next = store.keys().next_back().copied().unwrap_or(0) + 1;
        entity.set_id(next);
        store.insert(next, entity.clone());
        tracing::debug!("[MockRepo] Created {} {}", E::NAME, entity.id());
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        self.record(RepositoryCall::Update(entity.clone()))?;
        let mut store = self.records.lock().unwrap_or_else(|e| e.into_inner());
        match store.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "{} {} not found",
                E::NAME,
                entity.id()
            ))),
        }
    }

    async fn delete(&self, entity: &E) -> AppResult<()> {
        self.record(RepositoryCall::Delete(entity.clone()))?;
        let mut store = self.records.lock().unwrap_or_else(|e| e.into_inner());
        match store.remove(&entity.id()) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "{} {} not found",
                E::NAME,
                entity.id()
            ))),
        }
    }
}
