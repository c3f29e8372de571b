//! Change-tracking persistence context.
//!
//! [`DbContext`] hands out one [`EntitySet`] per unit of work. The set
//! remembers every entity it has loaded or been given together with an
//! [`EntityState`], and [`EntitySet::save_changes`] flushes the pending
//! entries in a single transaction.
//!
//! Sets are cheap and never shared: repositories create a fresh one per
//! call, so concurrent requests never observe each other's pending work.

use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::debug;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::EntityId;
use catalog_entity::TableMapping;

use crate::error::storage_error;

/// Entry point to the persistence layer.
#[derive(Debug, Clone)]
pub struct DbContext {
    pool: PgPool,
}

impl DbContext {
    /// Create a context over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A fresh, empty change tracker for entity type `E`.
    pub fn set<E: TableMapping>(&self) -> EntitySet<E> {
        EntitySet::new(self.pool.clone())
    }
}

/// Tracking state of an entry in an [`EntitySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Will be inserted on save.
    Added,
    /// Will be updated on save.
    Modified,
    /// Will be deleted on save.
    Deleted,
    /// Matches the stored row.
    Unchanged,
    /// No longer tracked; ignored on save.
    Detached,
}

impl EntityState {
    fn is_pending(self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Deleted)
    }
}

/// Handle to a tracked entry, returned by the mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey(usize);

#[derive(Debug)]
struct Entry<E> {
    entity: E,
    state: EntityState,
}

/// Per-unit-of-work change tracker for one entity type.
#[derive(Debug)]
pub struct EntitySet<E> {
    pool: PgPool,
    entries: Vec<Entry<E>>,
}

impl<E: TableMapping> EntitySet<E> {
    fn new(pool: PgPool) -> Self {
        Self {
            pool,
            entries: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Load every row, ordered by key. Rows already tracked resolve to the
    /// tracked instance.
    pub async fn to_list(&mut self) -> AppResult<Vec<E>> {
        let sql = format!("{} ORDER BY {}", E::select_sql(), E::KEY);
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to list {}", E::NAME), e))?;

        debug!(entity = E::NAME, count = rows.len(), "Loaded rows");

        Ok(rows
            .into_iter()
            .filter_map(|row| self.attach_loaded(row))
            .collect())
    }

    /// Find by key, consulting tracked entries before the database.
    ///
    /// An entry pending deletion is reported as absent.
    pub async fn find(&mut self, id: EntityId) -> AppResult<Option<E>> {
        if let Some(index) = self.position(id) {
            let entry = &self.entries[index];
            return Ok(match entry.state {
                EntityState::Deleted => None,
                _ => Some(entry.entity.clone()),
            });
        }

        let sql = format!("{} WHERE {} = $1", E::select_sql(), E::KEY);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error(format!("Failed to find {} {id}", E::NAME), e))?;

        Ok(row.and_then(|row| self.attach_loaded(row)))
    }

    // ── Tracking ─────────────────────────────────────────────────

    /// Track `entity` for insertion.
    pub fn add(&mut self, entity: E) -> EntryKey {
        self.push(entity, EntityState::Added)
    }

    /// Track `entity` as a full replacement of the stored row with its key.
    pub fn mark_modified(&mut self, entity: E) -> EntryKey {
        match self.position(entity.id()) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.entity = entity;
                if entry.state != EntityState::Added {
                    entry.state = EntityState::Modified;
                }
                EntryKey(index)
            }
            None => self.push(entity, EntityState::Modified),
        }
    }

    /// Track the row with `entity`'s key for deletion.
    ///
    /// Removing an entity that was only added in this set detaches it.
    pub fn remove(&mut self, entity: E) -> EntryKey {
        match self.position(entity.id()) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.state = match entry.state {
                    EntityState::Added => EntityState::Detached,
                    _ => EntityState::Deleted,
                };
                EntryKey(index)
            }
            None => self.push(entity, EntityState::Deleted),
        }
    }

    /// The tracked entity behind `key`.
    pub fn entity(&self, key: EntryKey) -> Option<&E> {
        self.entries.get(key.0).map(|entry| &entry.entity)
    }

    /// The tracking state behind `key`.
    pub fn state(&self, key: EntryKey) -> Option<EntityState> {
        self.entries.get(key.0).map(|entry| entry.state)
    }

    /// Whether any entry is waiting to be saved.
    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(|entry| entry.state.is_pending())
    }

    // ── Saving ───────────────────────────────────────────────────

    /// Flush every pending entry in one transaction.
    ///
    /// Generated keys are written back into added entries and every flushed
    /// entry becomes [`EntityState::Unchanged`] (deleted ones
    /// [`EntityState::Detached`]). An update or delete that matches no row
    /// aborts the whole transaction with `NotFound`; tracking state is only
    /// touched after a successful commit. Returns the number of affected rows.
    pub async fn save_changes(&mut self) -> AppResult<usize> {
        if !self.has_changes() {
            return Ok(0);
        }

        let insert_sql = E::insert_sql();
        let update_sql = E::update_sql();
        let delete_sql = E::delete_sql();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        let mut generated: Vec<(usize, EntityId)> = Vec::new();
        let mut affected = 0usize;

        for (index, entry) in self.entries.iter().enumerate() {
            match entry.state {
                EntityState::Added => {
                    let row = entry
                        .entity
                        .bind_columns(sqlx::query(&insert_sql))
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(|e| storage_error(format!("Failed to insert {}", E::NAME), e))?;
                    let id: EntityId = row
                        .try_get(E::KEY)
                        .map_err(|e| storage_error(format!("Failed to read {} key", E::NAME), e))?;
                    generated.push((index, id));
                    affected += 1;
                }
                EntityState::Modified => {
                    let id = entry.entity.id();
                    let result = entry
                        .entity
                        .bind_columns(sqlx::query(&update_sql))
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| storage_error(format!("Failed to update {} {id}", E::NAME), e))?;
                    if result.rows_affected() == 0 {
                        return Err(missing::<E>(id));
                    }
                    affected += result.rows_affected() as usize;
                }
                EntityState::Deleted => {
                    let id = entry.entity.id();
                    let result = sqlx::query(&delete_sql)
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| storage_error(format!("Failed to delete {} {id}", E::NAME), e))?;
                    if result.rows_affected() == 0 {
                        return Err(missing::<E>(id));
                    }
                    affected += result.rows_affected() as usize;
                }
                EntityState::Unchanged | EntityState::Detached => {}
            }
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit transaction", e))?;

        for (index, id) in generated {
            self.entries[index].entity.set_id(id);
        }
        self.accept_changes();

        debug!(entity = E::NAME, affected, "Saved changes");
        Ok(affected)
    }

    // ── Internals ────────────────────────────────────────────────

    fn push(&mut self, entity: E, state: EntityState) -> EntryKey {
        self.entries.push(Entry { entity, state });
        EntryKey(self.entries.len() - 1)
    }

    /// Index of the live entry holding a persisted entity with `id`.
    fn position(&self, id: EntityId) -> Option<usize> {
        if id == 0 {
            return None;
        }
        self.entries.iter().position(|entry| {
            entry.state != EntityState::Detached && entry.entity.id() == id
        })
    }

    /// Start tracking a freshly loaded row unless an entry already owns its
    /// key. Rows whose tracked entry is pending deletion are dropped.
    fn attach_loaded(&mut self, row: E) -> Option<E> {
        match self.position(row.id()) {
            Some(index) => {
                let entry = &self.entries[index];
                match entry.state {
                    EntityState::Deleted => None,
                    _ => Some(entry.entity.clone()),
                }
            }
            None => {
                self.push(row.clone(), EntityState::Unchanged);
                Some(row)
            }
        }
    }

    fn accept_changes(&mut self) {
        for entry in &mut self.entries {
            entry.state = match entry.state {
                EntityState::Added | EntityState::Modified => EntityState::Unchanged,
                EntityState::Deleted => EntityState::Detached,
                other => other,
            };
        }
    }
}

fn missing<E: TableMapping>(id: EntityId) -> AppError {
    AppError::not_found(format!("{} {id} not found", E::NAME))
}
