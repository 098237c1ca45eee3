//! Request brokering.
//!
//! This module bridges the caller's suspended send to the transport's
//! out-of-band reply: registry bookkeeping, delivery, and resolution.

pub mod registry;
pub mod transport;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::validator::ReplyValidator;
use crate::errors::FormError;
use crate::schema::element::AnswerMode;
use crate::schema::request::{FormRequest, RawReply, RequestId, Response, SessionId};

use self::registry::SessionRegistry;
use self::transport::FormTransport;

/// Orchestrates single requests end to end: registers a pending entry,
/// hands the schema to the transport, suspends the caller, and settles the
/// entry when the transport reports a reply (or the session dies first).
pub struct RequestBroker {
    registry: Arc<SessionRegistry>,
    transport: Arc<dyn FormTransport>,
}

impl RequestBroker {
    pub fn new(registry: Arc<SessionRegistry>, transport: Arc<dyn FormTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Send one request and suspend until its outcome arrives.
    ///
    /// Fails immediately with `SessionEnded` (and never touches the
    /// transport) when the session is not live. Exactly one of resolve,
    /// reject, or cancel settles the returned future.
    pub async fn send(
        &self,
        session: SessionId,
        schema: FormRequest,
        modes: Vec<Option<AnswerMode>>,
    ) -> Result<Response, FormError> {
        let (request, rx) = self.registry.register(session, schema.clone(), modes)?;

        if let Err(error) = self.transport.deliver(session, request, &schema).await {
            // Delivery failures ride the normal reply path as a decline.
            warn!(%session, %request, %error, "delivery failed");
            self.on_reply(session, request, RawReply::decline());
        }

        // The sender only disappears without firing if the whole registry
        // is torn down mid-request; report that as the session dying.
        rx.await.unwrap_or(Err(FormError::SessionEnded))
    }

    /// Deliver a raw reply from the transport. Safe to call at any time
    /// and with any ids: a reply for an unknown or already settled request
    /// is ignored.
    pub fn on_reply(&self, session: SessionId, request: RequestId, reply: RawReply) {
        let Some(pending) = self.registry.take(session, request) else {
            debug!(%session, %request, "reply for unknown or settled request ignored");
            return;
        };

        let outcome = if reply.is_decline() {
            debug!(%session, %request, "request declined");
            Err(FormError::Declined)
        } else {
            match ReplyValidator::validate(&pending.schema, &pending.modes, &reply) {
                Ok(response) => {
                    debug!(%session, %request, "request resolved");
                    Ok(response)
                }
                Err(error) => {
                    debug!(%session, %request, %error, "reply failed validation");
                    Err(FormError::ValidationFailed(error))
                }
            }
        };

        // A dropped receiver means the caller gave up; nothing left to do.
        let _ = pending.tx.send(outcome);
    }

    /// Host lifecycle notification: the session can now receive requests.
    pub fn session_started(&self, session: SessionId) {
        self.registry.session_started(session);
    }

    /// Host lifecycle notification: drains and cancels every pending
    /// request of the session before returning.
    pub fn session_ended(&self, session: SessionId) {
        self.registry.session_ended(session);
    }
}
