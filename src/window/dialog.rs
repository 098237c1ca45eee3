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

//! Two-button dialog facade.

use crate::broker::RequestBroker;
use crate::errors::FormError;
use crate::schema::request::{FormRequest, Response, SessionId};

/// A reusable yes/no question. All fields are plain mutable state; edit
/// them freely between requests — `request` snapshots them at call time,
/// so later edits never affect a request already in flight.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub title: String,
    pub content: String,
    pub button1: String,
    pub button2: String,
}

impl Dialog {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        button1: impl Into<String>,
        button2: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            button1: button1.into(),
            button2: button2.into(),
        }
    }

    fn schema(&self) -> FormRequest {
        FormRequest::Dialog {
            title: self.title.clone(),
            content: self.content.clone(),
            button1: self.button1.clone(),
            button2: self.button2.clone(),
        }
    }

    /// Show the dialog and suspend until answered. True means the first
    /// button was pressed.
    pub async fn request(
        &self,
        broker: &RequestBroker,
        session: SessionId,
    ) -> Result<bool, FormError> {
        match broker.send(session, self.schema(), Vec::new()).await? {
            Response::Dialog(choice) => Ok(choice),
            other => unreachable!("dialog request resolved to {:?}", other),
        }
    }

    /// Like `request`, but a decline or a dead session yields `fallback`
    /// instead of an error. Validation failures still propagate.
    pub async fn request_or(
        &self,
        broker: &RequestBroker,
        session: SessionId,
        fallback: bool,
    ) -> Result<bool, FormError> {
        match self.request(broker, session).await {
            Err(FormError::Declined) | Err(FormError::SessionEnded) => Ok(fallback),
            other => other,
        }
    }
}
