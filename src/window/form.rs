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

//! Mixed-field form facade.
//!
//! Fields are declared under caller-chosen keys (ordinals, names, enums —
//! anything hashable); the resolved request zips the validated values back
//! onto those keys, so the result has the same shape the caller declared.

use std::collections::HashMap;
use std::hash::Hash;

use crate::broker::RequestBroker;
use crate::errors::FormError;
use crate::schema::element::{AnswerMode, Field};
use crate::schema::request::{FieldValue, FormRequest, Response, SessionId};

#[derive(Debug, Clone)]
pub struct Form<K> {
    pub title: String,
    fields: Vec<(K, Field)>,
}

impl<K: Eq + Hash + Clone> Form<K> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field under a caller-chosen key. Declaration order is the
    /// order the remote client sees.
    pub fn field(&mut self, key: K, field: Field) -> &mut Self {
        self.fields.push((key, field));
        self
    }

    pub fn fields(&self) -> &[(K, Field)] {
        &self.fields
    }

    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }

    fn schema(&self) -> (FormRequest, Vec<Option<AnswerMode>>) {
        let mut elements = Vec::with_capacity(self.fields.len());
        let mut modes = Vec::with_capacity(self.fields.len());
        for (_, field) in &self.fields {
            elements.push(field.element().clone());
            modes.push(field.mode().cloned());
        }
        (
            FormRequest::Custom {
                title: self.title.clone(),
                elements,
            },
            modes,
        )
    }

    /// Show the form and suspend until answered. Label fields come back as
    /// [`FieldValue::None`] under their key.
    pub async fn request(
        &self,
        broker: &RequestBroker,
        session: SessionId,
    ) -> Result<HashMap<K, FieldValue>, FormError> {
        let (schema, modes) = self.schema();
        match broker.send(session, schema, modes).await? {
            Response::Custom(values) => Ok(self
                .fields
                .iter()
                .map(|(key, _)| key.clone())
                .zip(values)
                .collect()),
            other => unreachable!("form request resolved to {:?}", other),
        }
    }

    /// Like `request`, but a decline or a dead session yields `fallback`
    /// instead of an error. Validation failures still propagate.
    pub async fn request_or(
        &self,
        broker: &RequestBroker,
        session: SessionId,
        fallback: HashMap<K, FieldValue>,
    ) -> Result<HashMap<K, FieldValue>, FormError> {
        match self.request(broker, session).await {
            Err(FormError::Declined) | Err(FormError::SessionEnded) => Ok(fallback),
            other => other,
        }
    }
}
