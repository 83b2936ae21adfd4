//! Property tests for the priority model and range validation.

use proptest::prelude::*;
use triage::domain::Ticket;
use triage::errors::Field;
use triage::hierarchy::validate_ticket;
use triage::priority::{importance_label, priority_score, urgency_label};

proptest! {
    #[test]
    fn score_stays_in_range_for_valid_inputs(i in 1..=10i32, u in 1..=10i32) {
        let score = priority_score(i, u);
        prop_assert!((1..=100).contains(&score));
    }

    #[test]
    fn score_is_monotone_in_each_factor(i in 1..=9i32, u in 1..=10i32) {
        prop_assert!(priority_score(i + 1, u) > priority_score(i, u));
        prop_assert!(priority_score(u, i + 1) > priority_score(u, i));
    }

    #[test]
    fn labels_defined_exactly_on_the_scale(v in -50..=50i32) {
        let in_range = (1..=10).contains(&v);
        prop_assert_eq!(!importance_label(v).is_empty(), in_range);
        prop_assert_eq!(!urgency_label(v).is_empty(), in_range);
    }

    #[test]
    fn validation_accepts_any_in_range_pair(i in 1..=10i32, u in 1..=10i32) {
        let mut t = Ticket::new("b".to_string(), "T".to_string(), String::new());
        t.importance = i;
        t.urgency = u;
        prop_assert!(validate_ticket(&t, |_| None).is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_importance(i in prop_oneof![-100..=0i32, 11..=100i32]) {
        let mut t = Ticket::new("b".to_string(), "T".to_string(), String::new());
        t.importance = i;
        let err = validate_ticket(&t, |_| None).unwrap_err();
        prop_assert_eq!(err.field, Field::Importance);
    }
}
