//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::traits::entity::{Entity, EntityId};

/// Generic CRUD repository trait.
///
/// One conforming implementation exists per backing store. Controllers
/// hold an `Arc<dyn Repository<E>>`, so tests substitute a double directly.
///
/// Every call is an independent unit of work; implementations must not
/// keep pending changes between calls.
#[async_trait]
pub trait Repository<E>: Send + Sync + 'static
where
    E: Entity,
{
    /// Return every stored record. An empty store yields an empty vector.
    async fn get_all(&self) -> AppResult<Vec<E>>;

    /// Find a record by its identity. A missing record is `Ok(None)`.
    async fn get_by_id(&self, id: EntityId) -> AppResult<Option<E>>;

    /// Store a new record and write the assigned identity back into `entity`.
    async fn create(&self, entity: &mut E) -> AppResult<()>;

    /// Replace the stored record with the same identity.
    ///
    /// Fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound)
    /// when no such record exists.
    async fn update(&self, entity: &E) -> AppResult<()>;

    /// Remove the stored record with the same identity.
    ///
    /// Fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound)
    /// when no such record exists.
    async fn delete(&self, entity: &E) -> AppResult<()>;
}
