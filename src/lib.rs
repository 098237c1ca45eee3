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

//! lilith-forms: structured UI requests for remote clients.
//!
//! This library lets a host application show a dialog, menu, or
//! mixed-field form to a remote client and await a validated, typed
//! answer with linear control flow, even though the client may answer
//! late, answer garbage, decline, or disconnect mid-request.

pub mod broker;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod schema;
pub mod utils;
mod verification;
pub mod window;
