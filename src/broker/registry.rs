// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Session registry.
//!
//! Process-wide table mapping live sessions to their outstanding requests.
//! One instance is constructed at startup and shared by `Arc`; it lives as
//! long as the host's session-management subsystem. All mutations go
//! through a single mutex, so a reply or cancellation can never race a new
//! registration for the same identity.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::constants::limits;
use crate::errors::FormError;
use crate::schema::element::AnswerMode;
use crate::schema::request::{FormRequest, RequestId, Response, SessionId};
use crate::utils::time;

/// One in-flight request. Removed from the table exactly once: on resolve,
/// reject, or forced cancellation at session end; the oneshot sender fires
/// with the outcome at the same moment.
pub(crate) struct PendingRequest {
    pub(crate) schema: FormRequest,
    pub(crate) modes: Vec<Option<AnswerMode>>,
    pub(crate) opened_at: f64,
    pub(crate) tx: oneshot::Sender<Result<Response, FormError>>,
}

#[derive(Default)]
struct SessionEntry {
    /// Monotonic allocator; ids are unique for the lifetime of the entry.
    next_request: u64,
    pending: HashMap<RequestId, PendingRequest>,
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        // The table holds no invariants a panicked holder could break
        // half-way: recover the guard instead of poisoning every caller.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a session live. A repeated start for the same identity first
    /// cancels whatever the previous lifetime left pending.
    pub fn session_started(&self, session: SessionId) {
        let mut table = self.table();
        let prior = table.insert(session, SessionEntry::default());
        match prior {
            None => debug!(%session, "session registered"),
            Some(entry) if entry.pending.is_empty() => {
                debug!(%session, "session re-registered")
            }
            Some(entry) => {
                warn!(%session, stale = entry.pending.len(), "session restarted; cancelling stale requests");
                cancel_all(session, entry.pending);
            }
        }
    }

    /// Tear a session down, synchronously cancelling every pending request
    /// before returning. After this, sends for the identity fail with
    /// `SessionEnded` until a new `session_started`.
    pub fn session_ended(&self, session: SessionId) {
        let mut table = self.table();
        match table.remove(&session) {
            None => debug!(%session, "end of unknown session ignored"),
            Some(entry) => {
                if entry.pending.is_empty() {
                    debug!(%session, "session ended");
                } else {
                    info!(%session, cancelled = entry.pending.len(), "session ended with requests pending");
                }
                cancel_all(session, entry.pending);
            }
        }
    }

    /// Register a new pending request under a live session and hand back
    /// the receiver its outcome will arrive on. Fails without side effects
    /// if the session is not in the table.
    pub(crate) fn register(
        &self,
        session: SessionId,
        schema: FormRequest,
        modes: Vec<Option<AnswerMode>>,
    ) -> Result<(RequestId, oneshot::Receiver<Result<Response, FormError>>), FormError> {
        let mut table = self.table();
        let entry = table.get_mut(&session).ok_or(FormError::SessionEnded)?;
        let request = RequestId::new(entry.next_request);
        entry.next_request += 1;

        let (tx, rx) = oneshot::channel();
        entry.pending.insert(
            request,
            PendingRequest {
                schema,
                modes,
                opened_at: time::now(),
                tx,
            },
        );
        if entry.pending.len() > limits::PENDING_WARN_THRESHOLD {
            warn!(%session, pending = entry.pending.len(), "pending request table unusually large");
        }
        debug!(%session, %request, "request registered");
        Ok((request, rx))
    }

    /// Remove and return a pending request. `None` means the request was
    /// never registered or already settled; callers treat that as a silent
    /// no-op because the transport boundary cannot guarantee single
    /// delivery.
    pub(crate) fn take(&self, session: SessionId, request: RequestId) -> Option<PendingRequest> {
        let mut table = self.table();
        let entry = table.get_mut(&session)?;
        entry.pending.remove(&request)
    }

    /// Whether the identity currently maps to a live session.
    pub fn is_active(&self, session: SessionId) -> bool {
        self.table().contains_key(&session)
    }

    /// Number of requests currently outstanding for a session (zero for
    /// unknown sessions).
    pub fn pending_count(&self, session: SessionId) -> usize {
        self.table()
            .get(&session)
            .map(|entry| entry.pending.len())
            .unwrap_or(0)
    }
}

/// Fire `SessionEnded` on every drained continuation. Runs while the
/// caller still holds the table lock, so no new registration for the same
/// identity can interleave with the cancellations.
fn cancel_all(session: SessionId, pending: HashMap<RequestId, PendingRequest>) {
    for (request, entry) in pending {
        debug!(
            %session,
            %request,
            age_secs = time::elapsed_secs(entry.opened_at),
            "request cancelled"
        );
        let _ = entry.tx.send(Err(FormError::SessionEnded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog_schema() -> FormRequest {
        FormRequest::Dialog {
            title: "T".to_string(),
            content: "C".to_string(),
            button1: "Y".to_string(),
            button2: "N".to_string(),
        }
    }

    #[test]
    fn test_register_requires_live_session() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        let err = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap_err();
        assert_eq!(err, FormError::SessionEnded);
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);

        let (first, _rx1) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();
        let (second, _rx2) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();
        assert!(second.value() > first.value());
        assert_eq!(registry.pending_count(session), 2);
    }

    #[tokio::test]
    async fn test_session_end_cancels_all_pending() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);

        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (_, rx) = registry
                .register(session, dialog_schema(), Vec::new())
                .unwrap();
            receivers.push(rx);
        }

        registry.session_ended(session);
        assert_eq!(registry.pending_count(session), 0);
        assert!(!registry.is_active(session));

        for rx in receivers {
            assert_eq!(rx.await.unwrap(), Err(FormError::SessionEnded));
        }
    }

    #[tokio::test]
    async fn test_restart_cancels_stale_requests() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);
        let (_, rx) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();

        registry.session_started(session);
        assert_eq!(rx.await.unwrap(), Err(FormError::SessionEnded));
        assert!(registry.is_active(session));
        assert_eq!(registry.pending_count(session), 0);
    }

    #[test]
    fn test_take_is_exactly_once() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);
        let (request, _rx) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();

        assert!(registry.take(session, request).is_some());
        assert!(registry.take(session, request).is_none());
    }

    #[tokio::test]
    async fn test_taken_request_resolves_its_own_receiver() {
        let registry = SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);
        let (request, rx) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();

        let pending = registry.take(session, request).unwrap();
        let _ = pending.tx.send(Ok(Response::Dialog(true)));
        assert_eq!(rx.await.unwrap(), Ok(Response::Dialog(true)));

        // The schema snapshot rides along with the entry.
        assert_eq!(pending.schema.kind(), "dialog");
    }
}
