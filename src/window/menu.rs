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

//! Button-menu facade.
//!
//! Buttons carry a caller payload; a resolved request yields the payload
//! of the pressed button, so callers never handle raw indices.

use crate::broker::RequestBroker;
use crate::errors::FormError;
use crate::schema::request::{FormRequest, MenuButton, Response, SessionId};

#[derive(Debug, Clone)]
pub struct Menu<T> {
    pub title: String,
    pub content: String,
    buttons: Vec<(MenuButton, T)>,
}

impl<T: Clone> Menu<T> {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            buttons: Vec::new(),
        }
    }

    /// Append a button with its associated payload.
    pub fn add(&mut self, button: MenuButton, value: T) -> &mut Self {
        self.buttons.push((button, value));
        self
    }

    /// Append a plain labelled button.
    pub fn button(&mut self, label: impl Into<String>, value: T) -> &mut Self {
        self.add(MenuButton::new(label), value)
    }

    /// Append a labelled button with an image reference.
    pub fn image_button(
        &mut self,
        label: impl Into<String>,
        image: impl Into<String>,
        value: T,
    ) -> &mut Self {
        self.add(MenuButton::with_image(label, image), value)
    }

    pub fn buttons(&self) -> &[(MenuButton, T)] {
        &self.buttons
    }

    pub fn clear_buttons(&mut self) {
        self.buttons.clear();
    }

    fn schema(&self) -> FormRequest {
        FormRequest::Menu {
            title: self.title.clone(),
            content: self.content.clone(),
            buttons: self.buttons.iter().map(|(b, _)| b.clone()).collect(),
        }
    }

    /// Show the menu and suspend until a button is pressed; returns the
    /// pressed button's payload.
    pub async fn request(
        &self,
        broker: &RequestBroker,
        session: SessionId,
    ) -> Result<T, FormError> {
        match broker.send(session, self.schema(), Vec::new()).await? {
            // The validator bounds the index against the schema built from
            // this same button list.
            Response::Menu(index) => Ok(self.buttons[index].1.clone()),
            other => unreachable!("menu request resolved to {:?}", other),
        }
    }

    /// Like `request`, but a decline or a dead session yields `fallback`
    /// instead of an error. Validation failures still propagate.
    pub async fn request_or(
        &self,
        broker: &RequestBroker,
        session: SessionId,
        fallback: T,
    ) -> Result<T, FormError> {
        match self.request(broker, session).await {
            Err(FormError::Declined) | Err(FormError::SessionEnded) => Ok(fallback),
            other => other,
        }
    }
}
