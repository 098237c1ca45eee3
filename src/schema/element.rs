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

//! Form field descriptors and their builders.
//!
//! Builders validate their arguments eagerly: a bad default or an empty
//! option list fails here, at construction time, never at send time. The
//! produced descriptors are immutable and safe to reuse across requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SchemaError;

/// One field of a `form` request. The `type` discriminator on the wire is
/// `dropdown`, `input`, `label`, `slider`, `step_slider`, or `toggle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Dropdown {
        label: String,
        options: Vec<String>,
        default: usize,
    },
    Input {
        label: String,
        placeholder: String,
        default: String,
    },
    Label {
        text: String,
    },
    Slider {
        label: String,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    StepSlider {
        label: String,
        steps: Vec<String>,
        default: usize,
    },
    Toggle {
        label: String,
        default: bool,
    },
}

impl Element {
    /// The label shown to the remote user; used verbatim in validation
    /// error messages.
    pub fn label(&self) -> &str {
        match self {
            Self::Dropdown { label, .. }
            | Self::Input { label, .. }
            | Self::Slider { label, .. }
            | Self::StepSlider { label, .. }
            | Self::Toggle { label, .. } => label,
            Self::Label { text } => text,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dropdown { .. } => "dropdown",
            Self::Input { .. } => "input",
            Self::Label { .. } => "label",
            Self::Slider { .. } => "slider",
            Self::StepSlider { .. } => "step_slider",
            Self::Toggle { .. } => "toggle",
        }
    }
}

/// How a raw choice index is converted back to the caller. Carried
/// alongside the schema, never inside it, so one schema shape supports all
/// three result representations.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerMode {
    /// Hand the raw index back unchanged.
    Index,
    /// Substitute the option text at the answered index.
    Text,
    /// Substitute the caller-supplied value at the answered index. The
    /// list is parallel to the option list; builders enforce equal length.
    Mapped(Vec<Value>),
}

/// Builder product: one element descriptor paired with the answer mode the
/// caller chose for it. Fields that need no conversion carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    element: Element,
    mode: Option<AnswerMode>,
}

impl Field {
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn mode(&self) -> Option<&AnswerMode> {
        self.mode.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Element, Option<AnswerMode>) {
        (self.element, self.mode)
    }

    /// Dropdown whose answer resolves to the chosen option's text. The
    /// default is given as a value and resolved first-match against the
    /// options.
    pub fn dropdown(
        label: impl Into<String>,
        options: Vec<String>,
        default: &str,
    ) -> Result<Self, SchemaError> {
        let label = label.into();
        let default = resolve_default(&label, &options, default)?;
        Ok(Self {
            element: Element::Dropdown {
                label,
                options,
                default,
            },
            mode: Some(AnswerMode::Text),
        })
    }

    /// Dropdown whose answer stays a raw index; the default is an index
    /// too.
    pub fn dropdown_index(
        label: impl Into<String>,
        options: Vec<String>,
        default: usize,
    ) -> Result<Self, SchemaError> {
        let label = label.into();
        check_default_index(&label, options.len(), default)?;
        Ok(Self {
            element: Element::Dropdown {
                label,
                options,
                default,
            },
            mode: Some(AnswerMode::Index),
        })
    }

    /// Dropdown whose answer resolves through a parallel list of
    /// caller-chosen values. The default is resolved against that list,
    /// not the option labels.
    pub fn dropdown_mapped(
        label: impl Into<String>,
        options: Vec<String>,
        values: Vec<Value>,
        default: &Value,
    ) -> Result<Self, SchemaError> {
        let label = label.into();
        if options.is_empty() {
            return Err(SchemaError::EmptyOptions { label });
        }
        if values.len() != options.len() {
            return Err(SchemaError::MappingMismatch {
                label,
                values: values.len(),
                options: options.len(),
            });
        }
        let default = values.iter().position(|v| v == default).ok_or_else(|| {
            SchemaError::UnknownDefault {
                label: label.clone(),
                value: default.to_string(),
            }
        })?;
        Ok(Self {
            element: Element::Dropdown {
                label,
                options,
                default,
            },
            mode: Some(AnswerMode::Mapped(values)),
        })
    }

    /// Free-text input. Accepts anything the client sends back.
    pub fn input(
        label: impl Into<String>,
        placeholder: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            element: Element::Input {
                label: label.into(),
                placeholder: placeholder.into(),
                default: default.into(),
            },
            mode: None,
        }
    }

    /// Static display text; produces no caller-visible value.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            element: Element::Label { text: text.into() },
            mode: None,
        }
    }

    /// Numeric slider. The step parameter is forwarded to the client but
    /// replies are only range-checked, not alignment-checked.
    pub fn slider(label: impl Into<String>, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            element: Element::Slider {
                label: label.into(),
                min,
                max,
                step,
                default,
            },
            mode: None,
        }
    }

    /// Discrete slider over named steps; the answer resolves to the chosen
    /// step's text. The default is given as a value, first-match.
    pub fn step_slider(
        label: impl Into<String>,
        steps: Vec<String>,
        default: &str,
    ) -> Result<Self, SchemaError> {
        let label = label.into();
        let default = resolve_default(&label, &steps, default)?;
        Ok(Self {
            element: Element::StepSlider {
                label,
                steps,
                default,
            },
            mode: None,
        })
    }

    /// Discrete slider with an index-based default.
    pub fn step_slider_index(
        label: impl Into<String>,
        steps: Vec<String>,
        default: usize,
    ) -> Result<Self, SchemaError> {
        let label = label.into();
        check_default_index(&label, steps.len(), default)?;
        Ok(Self {
            element: Element::StepSlider {
                label,
                steps,
                default,
            },
            mode: None,
        })
    }

    pub fn toggle(label: impl Into<String>, default: bool) -> Self {
        Self {
            element: Element::Toggle {
                label: label.into(),
                default,
            },
            mode: None,
        }
    }
}

fn resolve_default(label: &str, choices: &[String], default: &str) -> Result<usize, SchemaError> {
    if choices.is_empty() {
        return Err(SchemaError::EmptyOptions {
            label: label.to_string(),
        });
    }
    choices
        .iter()
        .position(|c| c == default)
        .ok_or_else(|| SchemaError::UnknownDefault {
            label: label.to_string(),
            value: default.to_string(),
        })
}

fn check_default_index(label: &str, len: usize, default: usize) -> Result<(), SchemaError> {
    if len == 0 {
        return Err(SchemaError::EmptyOptions {
            label: label.to_string(),
        });
    }
    if default >= len {
        return Err(SchemaError::DefaultOutOfRange {
            label: label.to_string(),
            index: default,
            len,
        });
    }
    Ok(())
}
