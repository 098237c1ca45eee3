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

//! Time utilities.
//!
//! Timestamps are plain epoch seconds so they can go straight into
//! structured log fields.

use std::time::{SystemTime, UNIX_EPOCH};

pub fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Seconds elapsed since an earlier `now()` reading. Clamped at zero so a
/// clock step backwards never reports a negative age.
pub fn elapsed_secs(since: f64) -> f64 {
    (now() - since).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_never_negative() {
        assert!(elapsed_secs(now() + 1000.0) == 0.0);
        assert!(elapsed_secs(0.0) > 0.0);
    }
}
