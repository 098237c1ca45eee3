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

//! Reply validation engine.
//!
//! Pure function of (schema, answer modes, raw reply) to either the fully
//! typed response or a precise rejection. Form fields are checked in
//! declaration order and the first failure wins; the engine never returns
//! a partially converted result.

use serde_json::Value;

use crate::errors::ReplyError;
use crate::schema::element::{AnswerMode, Element};
use crate::schema::request::{FieldValue, FormRequest, RawReply, Response};

pub struct ReplyValidator;

impl ReplyValidator {
    /// Validate a delivered reply against the schema it answers.
    ///
    /// `modes` must be parallel to the schema's element list for `form`
    /// requests (the broker stores the two together); a mismatch is a bug
    /// in the caller, not in the reply, and aborts.
    pub fn validate(
        schema: &FormRequest,
        modes: &[Option<AnswerMode>],
        reply: &RawReply,
    ) -> Result<Response, ReplyError> {
        match schema {
            FormRequest::Dialog { title, .. } => match reply.payload() {
                Value::Bool(choice) => Ok(Response::Dialog(*choice)),
                other => Err(type_error(title, "dialog", "boolean", other)),
            },
            FormRequest::Menu { title, buttons, .. } => {
                let index = reply
                    .payload()
                    .as_u64()
                    .ok_or_else(|| type_error(title, "menu", "button index", reply.payload()))?;
                if (index as usize) < buttons.len() {
                    Ok(Response::Menu(index as usize))
                } else {
                    Err(ReplyError::Choice {
                        field: title.clone(),
                        kind: "menu",
                        index,
                        len: buttons.len(),
                    })
                }
            }
            FormRequest::Custom { title, elements } => {
                assert_eq!(
                    modes.len(),
                    elements.len(),
                    "answer mode list out of step with schema"
                );
                let values = reply
                    .payload()
                    .as_array()
                    .ok_or_else(|| type_error(title, "form", "array", reply.payload()))?;
                if values.len() != elements.len() {
                    return Err(ReplyError::FieldCount {
                        want: elements.len(),
                        got: values.len(),
                    });
                }
                let mut converted = Vec::with_capacity(elements.len());
                for ((element, mode), value) in elements.iter().zip(modes).zip(values) {
                    converted.push(Self::convert_field(element, mode.as_ref(), value)?);
                }
                Ok(Response::Custom(converted))
            }
        }
    }

    fn convert_field(
        element: &Element,
        mode: Option<&AnswerMode>,
        value: &Value,
    ) -> Result<FieldValue, ReplyError> {
        match element {
            Element::Dropdown { label, options, .. } => {
                let index = value
                    .as_u64()
                    .ok_or_else(|| type_error(label, "dropdown", "choice index", value))?;
                if index as usize >= options.len() {
                    return Err(ReplyError::Choice {
                        field: label.clone(),
                        kind: "dropdown",
                        index,
                        len: options.len(),
                    });
                }
                let index = index as usize;
                let mode = mode.expect("dropdown field carries no answer mode");
                Ok(match mode {
                    AnswerMode::Index => FieldValue::Index(index),
                    AnswerMode::Text => FieldValue::Text(options[index].clone()),
                    AnswerMode::Mapped(values) => {
                        // Builders enforce the parallel-length invariant.
                        let value = values
                            .get(index)
                            .expect("mapped value list shorter than option list");
                        FieldValue::Custom(value.clone())
                    }
                })
            }
            Element::Input { label, .. } => value
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(|| type_error(label, "input", "string", value)),
            Element::Label { text } => {
                if value.is_null() {
                    Ok(FieldValue::None)
                } else {
                    Err(type_error(text, "label", "null", value))
                }
            }
            Element::Slider {
                label, min, max, ..
            } => {
                let answer = value
                    .as_f64()
                    .ok_or_else(|| type_error(label, "slider", "number", value))?;
                if answer < *min || answer > *max {
                    return Err(ReplyError::Range {
                        field: label.clone(),
                        value: answer,
                        min: *min,
                        max: *max,
                    });
                }
                Ok(FieldValue::Float(answer))
            }
            Element::StepSlider { label, steps, .. } => {
                let index = value
                    .as_u64()
                    .ok_or_else(|| type_error(label, "step_slider", "step index", value))?;
                steps
                    .get(index as usize)
                    .map(|step| FieldValue::Text(step.clone()))
                    .ok_or(ReplyError::Choice {
                        field: label.clone(),
                        kind: "step_slider",
                        index,
                        len: steps.len(),
                    })
            }
            Element::Toggle { label, .. } => value
                .as_bool()
                .map(FieldValue::Bool)
                .ok_or_else(|| type_error(label, "toggle", "boolean", value)),
        }
    }
}

fn type_error(field: &str, kind: &'static str, want: &'static str, got: &Value) -> ReplyError {
    ReplyError::Type {
        field: field.to_string(),
        kind,
        want,
        got: json_kind(got),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::element::Field;
    use serde_json::json;

    fn opts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn form_of(fields: Vec<Field>) -> (FormRequest, Vec<Option<AnswerMode>>) {
        let mut elements = Vec::new();
        let mut modes = Vec::new();
        for field in fields {
            let (element, mode) = field.into_parts();
            elements.push(element);
            modes.push(mode);
        }
        (
            FormRequest::Custom {
                title: "T".to_string(),
                elements,
            },
            modes,
        )
    }

    fn validate_form(fields: Vec<Field>, raw: Value) -> Result<Response, ReplyError> {
        let (schema, modes) = form_of(fields);
        ReplyValidator::validate(&schema, &modes, &RawReply::new(raw))
    }

    #[test]
    fn test_dialog_requires_boolean() {
        let schema = FormRequest::Dialog {
            title: "Quit?".to_string(),
            content: "Sure?".to_string(),
            button1: "Yes".to_string(),
            button2: "No".to_string(),
        };
        let ok = ReplyValidator::validate(&schema, &[], &RawReply::new(json!(true)));
        assert_eq!(ok, Ok(Response::Dialog(true)));

        let err = ReplyValidator::validate(&schema, &[], &RawReply::new(json!(1))).unwrap_err();
        assert_eq!(
            err,
            ReplyError::Type {
                field: "Quit?".to_string(),
                kind: "dialog",
                want: "boolean",
                got: "integer",
            }
        );
    }

    #[test]
    fn test_menu_index_bounds() {
        let schema = FormRequest::Menu {
            title: "Pick".to_string(),
            content: "".to_string(),
            buttons: vec![
                crate::schema::request::MenuButton::new("A"),
                crate::schema::request::MenuButton::new("B"),
            ],
        };
        assert_eq!(
            ReplyValidator::validate(&schema, &[], &RawReply::new(json!(1))),
            Ok(Response::Menu(1))
        );
        assert!(matches!(
            ReplyValidator::validate(&schema, &[], &RawReply::new(json!(2))),
            Err(ReplyError::Choice { len: 2, .. })
        ));
        // Negative indices are a type error, not a wrapped-around choice.
        assert!(matches!(
            ReplyValidator::validate(&schema, &[], &RawReply::new(json!(-1))),
            Err(ReplyError::Type { .. })
        ));
    }

    #[test]
    fn test_dropdown_conversion_per_mode() {
        let options = opts(&["A", "B", "C"]);

        let text = Field::dropdown("Pick", options.clone(), "A").unwrap();
        let out = validate_form(vec![text], json!([2])).unwrap();
        assert_eq!(out, Response::Custom(vec![FieldValue::Text("C".into())]));

        let index = Field::dropdown_index("Pick", options.clone(), 0).unwrap();
        let out = validate_form(vec![index], json!([2])).unwrap();
        assert_eq!(out, Response::Custom(vec![FieldValue::Index(2)]));

        let mapped = Field::dropdown_mapped(
            "Pick",
            options,
            vec![json!("x"), json!("y"), json!("z")],
            &json!("x"),
        )
        .unwrap();
        let out = validate_form(vec![mapped], json!([2])).unwrap();
        assert_eq!(out, Response::Custom(vec![FieldValue::Custom(json!("z"))]));
    }

    #[test]
    fn test_dropdown_rejects_out_of_range_index() {
        let field = Field::dropdown("Pick", opts(&["A", "B"]), "A").unwrap();
        let err = validate_form(vec![field], json!([2])).unwrap_err();
        assert_eq!(
            err,
            ReplyError::Choice {
                field: "Pick".to_string(),
                kind: "dropdown",
                index: 2,
                len: 2,
            }
        );
    }

    #[test]
    fn test_form_length_must_match_exactly() {
        let fields = || vec![Field::toggle("Ack", false), Field::input("Name", "", "")];
        assert!(validate_form(fields(), json!([true])).is_err());
        assert!(validate_form(fields(), json!([true, "Bob", 1])).is_err());
        let err = validate_form(fields(), json!([true])).unwrap_err();
        assert_eq!(err, ReplyError::FieldCount { want: 2, got: 1 });
    }

    #[test]
    fn test_first_failing_field_wins() {
        let fields = vec![
            Field::toggle("First", false),
            Field::toggle("Second", false),
        ];
        // Both fields are wrong; the error must name the first.
        let err = validate_form(fields, json!(["no", "also no"])).unwrap_err();
        assert!(matches!(err, ReplyError::Type { ref field, .. } if field == "First"));
    }

    #[test]
    fn test_slider_boundaries_inclusive() {
        let field = |raw: Value| validate_form(vec![Field::slider("V", 0.0, 10.0, 1.0, 5.0)], json!([raw]));
        assert!(field(json!(0.0)).is_ok());
        assert!(field(json!(10.0)).is_ok());
        assert!(field(json!(10)).is_ok()); // integer replies are numeric too
        assert!(field(json!(-0.1)).is_err());
        assert!(field(json!(10.1)).is_err());
        // Step alignment is deliberately not enforced.
        assert!(field(json!(0.5)).is_ok());
    }

    #[test]
    fn test_label_must_answer_null() {
        let ok = validate_form(vec![Field::label("Info")], json!([null])).unwrap();
        assert_eq!(ok, Response::Custom(vec![FieldValue::None]));
        assert!(validate_form(vec![Field::label("Info")], json!(["x"])).is_err());
    }

    #[test]
    fn test_step_slider_converts_to_step_text() {
        let field = Field::step_slider("Size", opts(&["S", "M", "L"]), "S").unwrap();
        let out = validate_form(vec![field.clone()], json!([1])).unwrap();
        assert_eq!(out, Response::Custom(vec![FieldValue::Text("M".into())]));
        assert!(validate_form(vec![field], json!([3])).is_err());
    }

    #[test]
    fn test_error_message_names_field_and_kind() {
        let field = Field::slider("Age", 0.0, 150.0, 1.0, 18.0);
        let err = validate_form(vec![field], json!([200])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Age"), "message: {message}");
        assert!(message.contains("slider"), "message: {message}");
    }

    #[test]
    #[should_panic(expected = "answer mode list out of step")]
    fn test_mode_schema_mismatch_aborts() {
        let (schema, _) = form_of(vec![Field::toggle("Ack", false)]);
        let _ = ReplyValidator::validate(&schema, &[], &RawReply::new(json!([true])));
    }
}
