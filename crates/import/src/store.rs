//! The persistence boundary.
//!
//! The pipeline treats the record store as a black box keyed by ticket
//! identifier: create, fetch, patch. Latency and failures from a real
//! backend propagate unchanged; no retry, timeout, or suppression policy
//! lives at this layer.
//!
//! [`InMemoryStore`] is the reference backend used by tests, the demo
//! binary, and embedding callers that do not need durability.

use std::collections::HashMap;

use chrono::Utc;
use model::{TicketDraft, TicketPatch, TicketRecord};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a ticket store backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No record exists under the given identifier.
    #[error("ticket {0} does not exist")]
    NotFound(String),

    /// Backend-specific failure (connection loss, constraint violation,
    /// ...), wrapped with the backend's own message.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Record store consumed by the import pipeline and classify triggers.
pub trait TicketStore {
    /// Persists a validated draft, assigning the identifier and
    /// timestamps. Returns the stored record.
    fn create(&mut self, draft: TicketDraft) -> Result<TicketRecord, StoreError>;

    /// Fetches a record by identifier. Absence is `Ok(None)`, not an
    /// error; only backend failure is `Err`.
    fn find_by_id(&self, id: &str) -> Result<Option<TicketRecord>, StoreError>;

    /// Applies a patch to an existing record and returns the updated
    /// record. A missing identifier is [`StoreError::NotFound`].
    fn update(&mut self, id: &str, patch: TicketPatch) -> Result<TicketRecord, StoreError>;
}

/// HashMap-backed reference store. Assigns UUIDv4 identifiers and stamps
/// timestamps from the system clock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tickets: HashMap<String, TicketRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Borrows a stored record without going through the trait's cloning
    /// fetch.
    pub fn get(&self, id: &str) -> Option<&TicketRecord> {
        self.tickets.get(id)
    }

    /// Iterates over stored records in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &TicketRecord> {
        self.tickets.values()
    }
}

impl TicketStore for InMemoryStore {
    fn create(&mut self, draft: TicketDraft) -> Result<TicketRecord, StoreError> {
        let id = Uuid::new_v4().to_string();
        let record = TicketRecord::from_draft(id.clone(), draft, Utc::now());
        self.tickets.insert(id, record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<TicketRecord>, StoreError> {
        Ok(self.tickets.get(id).cloned())
    }

    fn update(&mut self, id: &str, patch: TicketPatch) -> Result<TicketRecord, StoreError> {
        let record = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.apply(patch, Utc::now());
        Ok(record.clone())
    }
}
