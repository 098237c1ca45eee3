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

//! Transport Trait.
//!
//! Defines the interface the broker needs from whatever actually carries
//! requests to remote clients. The core prescribes no wire format; the
//! transport owns serialization and delivery entirely.

use anyhow::Result;
use async_trait::async_trait;

use crate::schema::request::{FormRequest, RequestId, SessionId};

/// Collaborator that serializes and shows one request to the remote party.
///
/// Replies come back out-of-band through [`RequestBroker::on_reply`]
/// (addressed by session and request id), not as a return value here. A
/// delivery error is folded into the reply path as a decline by the
/// broker, never surfaced as a separate failure channel.
///
/// [`RequestBroker::on_reply`]: crate::broker::RequestBroker::on_reply
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn deliver(
        &self,
        session: SessionId,
        request: RequestId,
        schema: &FormRequest,
    ) -> Result<()>;
}
