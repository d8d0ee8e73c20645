//! Property-based tests for ValidationGate.
//!
//! These tests validate the role-gate and amount-tier-gate properties
//! for transaction validation authorization.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::gates::{StaffRole, ValidationGate};

/// Strategy for generating random positive Decimal amounts.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 0))
}

/// Strategy for generating random StaffRole values.
fn arb_role() -> impl Strategy<Value = StaffRole> {
    prop_oneof![
        Just(StaffRole::Staff),
        Just(StaffRole::Supervisor),
        Just(StaffRole::Treasurer),
        Just(StaffRole::Manager),
        Just(StaffRole::Admin),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Roles below supervisor always fail regardless of amount
    #[test]
    fn prop_staff_never_validates(amount in arb_amount(), threshold in arb_amount()) {
        let result = ValidationGate::check(StaffRole::Staff, amount, threshold);
        let is_no_validation_role = matches!(
            result,
            Err(WorkflowError::NoValidationRole { .. })
        );
        prop_assert!(is_no_validation_role);
    }

    /// The gate outcome matches the role hierarchy and amount tier exactly
    #[test]
    fn prop_gate_matrix(
        role in arb_role(),
        amount in arb_amount(),
        threshold in arb_amount()
    ) {
        let result = ValidationGate::check(role, amount, threshold);

        if !role.can_validate() {
            let is_no_validation_role = matches!(
                result,
                Err(WorkflowError::NoValidationRole { .. })
            );
            prop_assert!(is_no_validation_role);
        } else if amount > threshold && !role.can_validate_high_value() {
            match result {
                Err(WorkflowError::RequiresManagerApproval { amount: a, threshold: t }) => {
                    prop_assert_eq!(a, amount);
                    prop_assert_eq!(t, threshold);
                }
                other => prop_assert!(false, "Expected RequiresManagerApproval, got {:?}", other),
            }
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Manager and above pass for any amount
    #[test]
    fn prop_manager_passes_any_amount(amount in arb_amount(), threshold in arb_amount()) {
        prop_assert!(ValidationGate::check(StaffRole::Manager, amount, threshold).is_ok());
        prop_assert!(ValidationGate::check(StaffRole::Admin, amount, threshold).is_ok());
    }

    /// Amounts at or below the threshold never trigger the manager gate
    #[test]
    fn prop_at_or_below_threshold_passes_for_validators(threshold in arb_amount()) {
        let result = ValidationGate::check(StaffRole::Supervisor, threshold, threshold);
        prop_assert!(result.is_ok());
    }
}
