// src/state/requests.rs
use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Ideas,
    Trending,
    Threads,
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub kind: RequestKind,
    /// The query the request was made for.
    pub query: String,
}

/// One live request per kind. A newer ticket supersedes the older one, and a
/// reply is only applied while its ticket is still the live one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    active: HashMap<RequestKind, Ticket>,
    outbox: Vec<(Ticket, ApiRequest)>,
}

impl RequestTracker {
    pub fn begin(&mut self, kind: RequestKind, query: &str) -> Ticket {
        let ticket = Ticket { id: Uuid::new_v4(), kind, query: query.to_string() };
        if let Some(previous) = self.active.insert(kind, ticket.clone()) {
            debug!("{:?} request for {:?} superseded", kind, previous.query);
        }
        ticket
    }

    /// Starts a request and queues it for the worker.
    pub fn submit(&mut self, kind: RequestKind, query: &str, request: ApiRequest) -> Ticket {
        let ticket = self.begin(kind, query);
        self.outbox.push((ticket.clone(), request));
        ticket
    }

    pub fn accept(&mut self, ticket: &Ticket) -> bool {
        match self.active.get(&ticket.kind) {
            Some(current) if current.id == ticket.id => {
                self.active.remove(&ticket.kind);
                true
            }
            _ => {
                warn!("ignoring stale {:?} reply for {:?}", ticket.kind, ticket.query);
                false
            }
        }
    }

    pub fn abandon(&mut self, kind: RequestKind) {
        if let Some(ticket) = self.active.remove(&kind) {
            debug!("abandoned {:?} request for {:?}", kind, ticket.query);
        }
        self.outbox.retain(|(t, _)| t.kind != kind);
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn pending_query(&self, kind: RequestKind) -> Option<&str> {
        self.active.get(&kind).map(|t| t.query.as_str())
    }

    pub fn drain_outbox(&mut self) -> Vec<(Ticket, ApiRequest)> {
        std::mem::take(&mut self.outbox)
    }

    pub fn outbox(&self) -> &[(Ticket, ApiRequest)] {
        &self.outbox
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.outbox.clear();
    }
}
