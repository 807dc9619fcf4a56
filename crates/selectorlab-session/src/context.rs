//! Session context: identity, generation and the transfer slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use selectorlab_protocols::error::TransferError;
use selectorlab_protocols::types::LocatorSet;

use crate::transfer::{export_payload, import_payload};

#[derive(Debug, Clone)]
struct TransferSlot {
    token: String,
    payload: String,
    stored_at: DateTime<Utc>,
}

/// Identity carried by an in-flight verify or assistant call.
///
/// Results whose ticket is no longer accepted are dropped by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub session_id: Uuid,
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

/// State owned by one inspection session.
///
/// There is no ambient storage: the context is passed explicitly, and
/// [`SessionContext::new_session`] consumes the old one.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    generation: u64,
    created_at: DateTime<Utc>,
    slot: Option<TransferSlot>,
}

impl SessionContext {
    pub fn new() -> Self {
        let ctx = Self {
            id: Uuid::new_v4(),
            generation: 0,
            created_at: Utc::now(),
            slot: None,
        };
        debug!(session_id = %ctx.id, "Session started");
        ctx
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Tear this session down and start a fresh one.
    pub fn new_session(self) -> Self {
        info!(session_id = %self.id, "Discarding session state");
        Self::new()
    }

    /// Drop the transfer payload and invalidate outstanding tickets.
    pub fn clear(&mut self) {
        self.slot = None;
        self.generation += 1;
        debug!(session_id = %self.id, generation = self.generation, "Session cleared");
    }

    pub fn has_payload(&self) -> bool {
        self.slot.is_some()
    }

    /// When the current payload was stored.
    pub fn payload_stored_at(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|s| s.stored_at)
    }

    /// Store `set` as the transfer payload and return its token.
    ///
    /// A new export replaces the previous payload, so older tokens stop
    /// matching.
    pub fn export(&mut self, set: &LocatorSet) -> Result<String, TransferError> {
        let payload = export_payload(set)?;
        let token = Uuid::new_v4().to_string();
        debug!(
            session_id = %self.id,
            fields = set.fields().len(),
            "Stored transfer payload"
        );
        self.slot = Some(TransferSlot {
            token: token.clone(),
            payload,
            stored_at: Utc::now(),
        });
        Ok(token)
    }

    /// Read back the payload stored under `token`.
    pub fn import(&self, token: &str) -> Result<LocatorSet, TransferError> {
        let slot = self.slot.as_ref().ok_or(TransferError::NoPayload)?;
        if slot.token != token {
            return Err(TransferError::TokenMismatch);
        }
        import_payload(&slot.payload)
    }

    /// Issue a ticket for a call about to start.
    pub fn issue_ticket(&self, field_name: Option<&str>) -> RequestTicket {
        RequestTicket {
            session_id: self.id,
            generation: self.generation,
            field_name: field_name.map(str::to_string),
        }
    }

    /// Whether a result carrying `ticket` may still be applied.
    pub fn accepts(&self, ticket: &RequestTicket) -> bool {
        ticket.session_id == self.id && ticket.generation == self.generation
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
