//! Persisted record identity.

/// Primary key type shared by every catalog table (`SERIAL`).
pub type EntityId = i32;

/// A single persisted record with a store-assigned identity.
///
/// An id of `0` marks a transient record that has not been stored yet;
/// the store assigns the real identity on create.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in log lines and error messages.
    const NAME: &'static str;

    /// The record's identity.
    fn id(&self) -> EntityId;

    /// Overwrite the record's identity. Only the persistence layer calls this.
    fn set_id(&mut self, id: EntityId);

    /// Whether the record has been assigned a persistent identity.
    fn is_transient(&self) -> bool {
        self.id() == 0
    }
}
