//! Generic PostgreSQL repository.

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::{debug, info};

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::{EntityId, Repository};
use catalog_entity::TableMapping;

use crate::context::DbContext;

/// [`Repository`] over any mapped entity.
///
/// Each operation opens its own [`EntitySet`](crate::context::EntitySet),
/// applies a single change and saves it, so nothing stays pending between
/// calls.
#[derive(Debug)]
pub struct PgRepository<E> {
    context: DbContext,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: TableMapping> PgRepository<E> {
    /// Create a repository over `context`.
    pub fn new(context: DbContext) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: TableMapping> Repository<E> for PgRepository<E> {
    async fn get_all(&self) -> AppResult<Vec<E>> {
        let mut set = self.context.set::<E>();
        set.to_list().await
    }

    async fn get_by_id(&self, id: EntityId) -> AppResult<Option<E>> {
        let mut set = self.context.set::<E>();
        let found = set.find(id).await?;
        if found.is_none() {
            debug!(entity = E::NAME, id, "Record not found");
        }
        Ok(found)
    }

    async fn create(&self, entity: &mut E) -> AppResult<()> {
        let mut set = self.context.set::<E>();
        let key = set.add(entity.clone());
        set.save_changes().await?;

        let stored = set.entity(key).ok_or_else(|| {
            AppError::internal(format!("{} entry lost after save", E::NAME))
        })?;
        entity.set_id(stored.id());

        info!(entity = E::NAME, id = entity.id(), "Record created");
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        let mut set = self.context.set::<E>();
        set.mark_modified(entity.clone());
        set.save_changes().await?;

        info!(entity = E::NAME, id = entity.id(), "Record updated");
        Ok(())
    }

    async fn delete(&self, entity: &E) -> AppResult<()> {
        let mut set = self.context.set::<E>();
        set.remove(entity.clone());
        set.save_changes().await?;

        info!(entity = E::NAME, id = entity.id(), "Record deleted");
        Ok(())
    }
}
