//! Typed errors for the mutation pipeline.
//!
//! Validation, lookup, and permission failures are typed so that callers can
//! branch on them (surface the reason, choose an exit code); everything else
//! travels as opaque `anyhow` errors.

use std::fmt;
use thiserror::Error;

/// Field a validation rejection is tagged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Importance,
    Urgency,
    Parent,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Importance => "importance",
            Field::Urgency => "urgency",
            Field::Parent => "parent",
        };
        f.write_str(name)
    }
}

/// A rejected mutation: the proposed state violates an invariant.
///
/// Always recoverable by the caller; never a stored side effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Field the rejection is tagged to
    pub field: Field,
    /// Human-readable reason, suitable for showing to the actor
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    Ticket,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Board => "Board",
            EntityKind::Ticket => "Ticket",
        };
        f.write_str(name)
    }
}

/// A referenced board or ticket does not exist; no mutation was attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} not found: {id}")]
pub struct NotFoundError {
    pub kind: EntityKind,
    pub id: String,
}

impl NotFoundError {
    pub fn board(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Board,
            id: id.into(),
        }
    }

    pub fn ticket(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Ticket,
            id: id.into(),
        }
    }
}

/// The actor lacks rights for the attempted mutation; nothing was changed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Permission denied: {0}")]
pub struct PermissionError(pub String);

/// A caller-supplied token did not parse into an enum value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {what} '{token}'. Must be one of: {allowed}")]
pub struct ParseError {
    /// What was being parsed ("status", "priority", "ticket type")
    pub what: &'static str,
    /// The rejected input token
    pub token: String,
    /// Comma-separated list of accepted tokens
    pub allowed: &'static str,
}

impl ParseError {
    pub fn new(what: &'static str, token: impl Into<String>, allowed: &'static str) -> Self {
        Self {
            what,
            token: token.into(),
            allowed,
        }
    }
}
