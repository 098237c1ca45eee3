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

//! Error types.
//!
//! Three separate failure classes, deliberately kept apart:
//! `SchemaError` fires at construction time and never reaches the broker,
//! `ReplyError` describes exactly why a delivered reply violated its schema,
//! and `FormError` is the single failure type request callers match on.

use thiserror::Error;

/// Construction-time failure of a schema builder. A request carrying a
/// schema can only exist if every builder call succeeded, so none of these
/// ever surface on the reply path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("'{label}': option list is empty")]
    EmptyOptions { label: String },

    /// Value-based defaults are resolved first-match against the list they
    /// index into (options, steps, or the mapped value list).
    #[error("'{label}': default '{value}' is not one of the choices")]
    UnknownDefault { label: String, value: String },

    #[error("'{label}': default index {index} out of range ({len} choices)")]
    DefaultOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("'{label}': {values} mapped values for {options} options")]
    MappingMismatch {
        label: String,
        values: usize,
        options: usize,
    },
}

/// Why a delivered reply failed validation against its request schema.
/// The Display output names the offending field's label and declared kind
/// so the failure can be diagnosed from the log line alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplyError {
    #[error("reply carries {got} values for {want} fields")]
    FieldCount { want: usize, got: usize },

    #[error("'{field}' ({kind}): expected {want}, got {got}")]
    Type {
        field: String,
        kind: &'static str,
        want: &'static str,
        got: &'static str,
    },

    #[error("'{field}' ({kind}): index {index} out of range ({len} choices)")]
    Choice {
        field: String,
        kind: &'static str,
        index: u64,
        len: usize,
    },

    #[error("'{field}' (slider): {value} outside [{min}, {max}]")]
    Range {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// The single failure type surfaced to request callers.
///
/// Callers match on the kind to decide what to do next; retries are never
/// automatic, the caller re-drives them by looping and resending.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// The reply arrived but violates the request's declared schema.
    #[error("reply validation failed: {0}")]
    ValidationFailed(#[from] ReplyError),

    /// The remote client explicitly closed or rejected the request.
    #[error("request declined by the client")]
    Declined,

    /// The owning session ended (or never existed) before the request
    /// completed.
    #[error("session is not active")]
    SessionEnded,
}
