//! Property-based tests for WorkflowService.
//!
//! These tests validate the state machine's correctness properties
//! using proptest for randomized input generation.

use proptest::prelude::*;
use uuid::Uuid;

use kasira_shared::types::ActorId;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{ValidationAction, ValidationStatus};

/// Strategy for generating random ValidationStatus values.
fn arb_status() -> impl Strategy<Value = ValidationStatus> {
    prop_oneof![
        Just(ValidationStatus::Pending),
        Just(ValidationStatus::Approved),
        Just(ValidationStatus::Rejected),
        Just(ValidationStatus::NeedsRevision),
    ]
}

/// Strategy for generating random actor IDs.
fn arb_actor() -> impl Strategy<Value = ActorId> {
    any::<u128>().prop_map(|n| ActorId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating non-empty strings (for reasons).
fn arb_non_empty_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,100}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pending + approve → Approved with correct audit fields
    #[test]
    fn prop_approve_from_pending_succeeds(actor in arb_actor()) {
        let result = WorkflowService::approve(ValidationStatus::Pending, actor, None);
        prop_assert!(result.is_ok());
        let action = result.unwrap();
        prop_assert_eq!(action.new_status(), ValidationStatus::Approved);

        if let ValidationAction::Approve { validated_by, .. } = action {
            prop_assert_eq!(validated_by, actor);
        } else {
            prop_assert!(false, "Expected Approve action");
        }
    }

    /// Pending + reject → Rejected with the rejection reason
    #[test]
    fn prop_reject_from_pending_succeeds(
        actor in arb_actor(),
        reason in arb_non_empty_string()
    ) {
        prop_assume!(!reason.trim().is_empty());

        let result = WorkflowService::reject(ValidationStatus::Pending, actor, reason.clone());
        prop_assert!(result.is_ok());
        let action = result.unwrap();
        prop_assert_eq!(action.new_status(), ValidationStatus::Rejected);

        if let ValidationAction::Reject { reason: got, validated_by, .. } = action {
            prop_assert_eq!(got, reason);
            prop_assert_eq!(validated_by, actor);
        } else {
            prop_assert!(false, "Expected Reject action");
        }
    }

    /// Pending + request_revision → NeedsRevision with the notes
    #[test]
    fn prop_request_revision_from_pending_succeeds(
        actor in arb_actor(),
        notes in arb_non_empty_string()
    ) {
        prop_assume!(!notes.trim().is_empty());

        let result =
            WorkflowService::request_revision(ValidationStatus::Pending, actor, notes.clone());
        prop_assert!(result.is_ok());
        let action = result.unwrap();
        prop_assert_eq!(action.new_status(), ValidationStatus::NeedsRevision);

        if let ValidationAction::RequestRevision { notes: got, .. } = action {
            prop_assert_eq!(got, notes);
        } else {
            prop_assert!(false, "Expected RequestRevision action");
        }
    }

    /// Approve from non-Pending status always returns InvalidTransition (P1)
    #[test]
    fn prop_approve_from_non_pending_fails(
        status in arb_status(),
        actor in arb_actor()
    ) {
        prop_assume!(status != ValidationStatus::Pending);

        let result = WorkflowService::approve(status, actor, None);
        match result {
            Err(WorkflowError::InvalidTransition { from, to }) => {
                prop_assert_eq!(from, status);
                prop_assert_eq!(to, ValidationStatus::Approved);
            }
            _ => prop_assert!(false, "Expected InvalidTransition error"),
        }
    }

    /// Reject from non-Pending status always returns InvalidTransition (P1)
    #[test]
    fn prop_reject_from_non_pending_fails(
        status in arb_status(),
        actor in arb_actor(),
        reason in arb_non_empty_string()
    ) {
        prop_assume!(status != ValidationStatus::Pending);
        prop_assume!(!reason.trim().is_empty());

        let result = WorkflowService::reject(status, actor, reason);
        match result {
            Err(WorkflowError::InvalidTransition { from, to }) => {
                prop_assert_eq!(from, status);
                prop_assert_eq!(to, ValidationStatus::Rejected);
            }
            _ => prop_assert!(false, "Expected InvalidTransition error"),
        }
    }

    /// Request revision from non-Pending status always returns InvalidTransition (P1)
    #[test]
    fn prop_request_revision_from_non_pending_fails(
        status in arb_status(),
        actor in arb_actor(),
        notes in arb_non_empty_string()
    ) {
        prop_assume!(status != ValidationStatus::Pending);
        prop_assume!(!notes.trim().is_empty());

        let result = WorkflowService::request_revision(status, actor, notes);
        match result {
            Err(WorkflowError::InvalidTransition { from, to }) => {
                prop_assert_eq!(from, status);
                prop_assert_eq!(to, ValidationStatus::NeedsRevision);
            }
            _ => prop_assert!(false, "Expected InvalidTransition error"),
        }
    }

    /// Revert succeeds from every validated state and never from Pending
    #[test]
    fn prop_revert_only_from_validated(
        status in arb_status(),
        actor in arb_actor(),
        reason in arb_non_empty_string()
    ) {
        prop_assume!(!reason.trim().is_empty());

        let result = WorkflowService::revert_to_pending(status, actor, reason);
        if status == ValidationStatus::Pending {
            let is_invalid_transition = matches!(
                result,
                Err(WorkflowError::InvalidTransition { .. })
            );
            prop_assert!(is_invalid_transition);
        } else {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), ValidationStatus::Pending);
        }
    }

    /// is_valid_transition agrees with the documented transition table
    #[test]
    fn prop_is_valid_transition_consistency(
        from in arb_status(),
        to in arb_status()
    ) {
        let is_valid = WorkflowService::is_valid_transition(from, to);

        let expected_valid = matches!(
            (from, to),
            (ValidationStatus::Pending, ValidationStatus::Approved)
                | (ValidationStatus::Pending, ValidationStatus::Rejected)
                | (ValidationStatus::Pending, ValidationStatus::NeedsRevision)
                | (ValidationStatus::Approved, ValidationStatus::Pending)
                | (ValidationStatus::Rejected, ValidationStatus::Pending)
                | (ValidationStatus::NeedsRevision, ValidationStatus::Pending)
        );

        prop_assert_eq!(is_valid, expected_valid,
            "is_valid_transition({:?}, {:?}) = {}, expected {}",
            from, to, is_valid, expected_valid);
    }
}
