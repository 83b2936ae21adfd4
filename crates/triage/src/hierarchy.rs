//! Hierarchy validation for the epic/ticket/bug tree.
//!
//! A candidate ticket is accepted only when its importance/urgency values are
//! in range, its parent pairing is well-typed for its kind, and following the
//! parent chain upward never reaches the candidate itself.
//!
//! Validation is a pure predicate over the candidate plus the stored
//! ancestry supplied by the caller; it never mutates anything. The three
//! checks are independent; range runs first because it is cheapest.
//!
//! # Examples
//!
//! ```
//! use triage::domain::{Ticket, TicketType};
//! use triage::hierarchy::validate_ticket;
//!
//! let epic = {
//!     let mut t = Ticket::new("b".into(), "Epic".into(), String::new());
//!     t.ticket_type = TicketType::Epic;
//!     t
//! };
//! assert!(validate_ticket(&epic, |_| None).is_ok());
//!
//! let mut orphan_bug = Ticket::new("b".into(), "Bug".into(), String::new());
//! orphan_bug.ticket_type = TicketType::Bug;
//! assert!(validate_ticket(&orphan_bug, |_| None).is_err());
//! ```

use crate::domain::{Ticket, TicketType};
use crate::errors::{Field, ValidationError};
use std::collections::HashSet;

/// Validate a candidate ticket against range, type-pairing, and acyclicity
/// rules.
///
/// `resolve` looks up a stored ticket by id; it is used to read the direct
/// parent's type and to walk the ancestor chain. For a candidate whose
/// proposed parent does not resolve, the pairing check rejects on the parent
/// field (callers that want a lookup failure instead should resolve the
/// parent before validating).
///
/// # Errors
///
/// Returns `ValidationError` tagged to the violated field:
/// - importance/urgency outside 1..=10
/// - epic with a parent, ticket with a non-epic parent, bug without a
///   ticket parent
/// - a parent chain that loops back to the candidate's own id
pub fn validate_ticket<F>(candidate: &Ticket, resolve: F) -> Result<(), ValidationError>
where
    F: Fn(&str) -> Option<Ticket>,
{
    check_ranges(candidate)?;
    check_type_pairing(candidate, &resolve)?;
    check_acyclic(candidate, &resolve)
}

fn check_ranges(candidate: &Ticket) -> Result<(), ValidationError> {
    if !(1..=10).contains(&candidate.importance) {
        return Err(ValidationError::new(
            Field::Importance,
            "Importance must be between 1 and 10.",
        ));
    }
    if !(1..=10).contains(&candidate.urgency) {
        return Err(ValidationError::new(
            Field::Urgency,
            "Urgency must be between 1 and 10.",
        ));
    }
    Ok(())
}

fn check_type_pairing<F>(candidate: &Ticket, resolve: &F) -> Result<(), ValidationError>
where
    F: Fn(&str) -> Option<Ticket>,
{
    let parent_type = candidate
        .parent
        .as_deref()
        .and_then(|id| resolve(id))
        .map(|p| p.ticket_type);

    match candidate.ticket_type {
        TicketType::Epic => {
            if candidate.parent.is_some() {
                return Err(ValidationError::new(
                    Field::Parent,
                    "Epics cannot have a parent.",
                ));
            }
        }
        TicketType::Ticket => {
            // Tickets may have no parent, or an epic parent.
            if candidate.parent.is_some() && parent_type != Some(TicketType::Epic) {
                return Err(ValidationError::new(
                    Field::Parent,
                    "If set, parent must be an epic for a standard ticket.",
                ));
            }
        }
        TicketType::Bug => {
            if parent_type != Some(TicketType::Ticket) {
                return Err(ValidationError::new(
                    Field::Parent,
                    "A bug must have a ticket as parent.",
                ));
            }
        }
    }
    Ok(())
}

/// Walk the parent chain upward from the proposed parent.
///
/// Rejects when any ancestor id equals the candidate's own id. A revisited
/// ancestor id stops the walk without rejecting further: that guards the
/// walk against infinite loops on pre-existing corrupt data, it is not a
/// pass verdict on that data. Terminates because the visited set strictly
/// grows, bounded by the total ticket count.
fn check_acyclic<F>(candidate: &Ticket, resolve: &F) -> Result<(), ValidationError>
where
    F: Fn(&str) -> Option<Ticket>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut current = candidate.parent.clone();

    while let Some(id) = current {
        if id == candidate.id {
            return Err(ValidationError::new(
                Field::Parent,
                "Cyclic parent relationship detected.",
            ));
        }
        if !seen.insert(id.clone()) {
            break;
        }
        current = resolve(&id).and_then(|t| t.parent);
    }
    Ok(())
}
