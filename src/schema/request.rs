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

//! Domain models for lilith-forms.
//!
//! This module contains pure data structures representing request schemas,
//! replies, and typed results. It is designed to be free of I/O side
//! effects; everything here is immutable once built and safe to share
//! across concurrent requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::element::Element;

/// Newtype wrapper around Uuid for type-safe session identification.
/// Sessions are owned by the host environment; the registry only ever
/// holds a non-owning association from this identity to pending requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new SessionId from a Uuid
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying Uuid
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generate a new random SessionId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0.to_string()
    }
}

impl TryFrom<String> for SessionId {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Uuid::parse_str(&s).map(SessionId)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one outstanding request within its owning session.
/// Allocated from a per-session monotonic counter, so the value is stable
/// and meaningful in logs (unlike an address or object identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One button of a menu request: a label plus an optional image reference
/// the client may render next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuButton {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: None,
        }
    }

    pub fn with_image(label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: Some(image.into()),
        }
    }
}

/// An immutable description of one outbound request, ready for a transport
/// to serialize. The `type` discriminator on the wire is one of `dialog`,
/// `menu`, or `form`.
///
/// Answer modes for `form` fields deliberately live outside this type (see
/// [`crate::schema::element::AnswerMode`]): the same schema shape supports
/// several result representations without branching the schema itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormRequest {
    /// Two-button yes/no question. The reply is a boolean, true for
    /// `button1`.
    Dialog {
        title: String,
        content: String,
        button1: String,
        button2: String,
    },
    /// Button list; the reply is the pressed button's index.
    Menu {
        title: String,
        content: String,
        buttons: Vec<MenuButton>,
    },
    /// Mixed-field form; the reply is one raw value per field in
    /// declaration order.
    #[serde(rename = "form")]
    Custom {
        title: String,
        elements: Vec<Element>,
    },
}

impl FormRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dialog { .. } => "dialog",
            Self::Menu { .. } => "menu",
            Self::Custom { .. } => "form",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Dialog { title, .. } | Self::Menu { title, .. } | Self::Custom { title, .. } => {
                title
            }
        }
    }
}

/// The untyped reply payload exactly as the transport delivered it.
///
/// Nothing inside is trusted until the validator has converted it; JSON
/// null marks an explicit decline/close by the remote client.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply(Value);

impl RawReply {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The reply a declined or failed delivery collapses to.
    pub fn decline() -> Self {
        Self(Value::Null)
    }

    pub fn is_decline(&self) -> bool {
        self.0.is_null()
    }

    pub(crate) fn payload(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for RawReply {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The fully validated, converted result of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// true when the first button was pressed.
    Dialog(bool),
    /// Index of the pressed button.
    Menu(usize),
    /// One converted value per field, in declaration order.
    Custom(Vec<FieldValue>),
}

/// One converted form-field answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw choice index, kept as-is.
    Index(usize),
    /// Option/step text, or a free-text input answer.
    Text(String),
    /// Slider position.
    Float(f64),
    /// Toggle state.
    Bool(bool),
    /// Caller-supplied mapped value.
    Custom(Value),
    /// Labels produce no caller-visible value.
    None,
}

impl FieldValue {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::element::Field;

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::generate();
        let s: String = id.into();
        assert_eq!(s.parse::<SessionId>().unwrap(), id);
    }

    #[test]
    fn test_request_wire_discriminators() {
        let dialog = FormRequest::Dialog {
            title: "T".to_string(),
            content: "C".to_string(),
            button1: "Yes".to_string(),
            button2: "No".to_string(),
        };
        let json = serde_json::to_value(&dialog).unwrap();
        assert_eq!(json["type"], "dialog");

        let form = FormRequest::Custom {
            title: "T".to_string(),
            elements: vec![Field::toggle("Ack", false).into_parts().0],
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["type"], "form");
        assert_eq!(json["elements"][0]["type"], "toggle");
    }

    #[test]
    fn test_menu_button_image_omitted_when_absent() {
        let plain = serde_json::to_value(MenuButton::new("A")).unwrap();
        assert!(plain.get("image").is_none());

        let imaged = serde_json::to_value(MenuButton::with_image("A", "icons/a.png")).unwrap();
        assert_eq!(imaged["image"], "icons/a.png");
    }

    #[test]
    fn test_decline_marker() {
        assert!(RawReply::decline().is_decline());
        assert!(!RawReply::new(serde_json::json!(false)).is_decline());
    }
}
