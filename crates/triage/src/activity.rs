//! Activity recording: snapshot diffing and log-entry construction.
//!
//! Update-style mutations snapshot a fixed field set immediately before and
//! after the write; the diff renders `field: old → new` pairs in a stable
//! declaration order, joined by `"; "`, so identical changes always produce
//! byte-identical descriptions. An update that changes nothing still yields
//! a sentinel entry: the audit trail records that a mutation was attempted.
//!
//! Creation, deletion, and comment events carry pre-built descriptions
//! instead of a computed diff.

use crate::domain::{Actor, Priority, Status, Ticket, TicketActivity, TicketType};

/// Sentinel description for updates where no snapshot field differs
pub const NO_CHANGES: &str = "No material field changes";

/// The fixed field set captured around an update mutation.
///
/// Field order here is the rendering order of the diff. `sort_order` is
/// deliberately absent: manual reordering is reported with its own wording,
/// not a numeric diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSnapshot {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub importance: i32,
    pub urgency: i32,
    pub ticket_type: TicketType,
    pub parent: Option<String>,
    pub assignee: Option<Actor>,
}

impl TicketSnapshot {
    /// Capture the diffable fields of a ticket
    pub fn of(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
            priority: ticket.priority,
            importance: ticket.importance,
            urgency: ticket.urgency,
            ticket_type: ticket.ticket_type,
            parent: ticket.parent.clone(),
            assignee: ticket.assignee.clone(),
        }
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

/// Render the changed fields as `field: old → new` tokens in declaration
/// order. Empty when nothing differs.
pub fn diff_parts(before: &TicketSnapshot, after: &TicketSnapshot) -> Vec<String> {
    let mut parts = Vec::new();

    if before.title != after.title {
        parts.push(format!("title: {} → {}", before.title, after.title));
    }
    if before.description != after.description {
        parts.push(format!(
            "description: {} → {}",
            before.description, after.description
        ));
    }
    if before.status != after.status {
        parts.push(format!("status: {} → {}", before.status, after.status));
    }
    if before.priority != after.priority {
        parts.push(format!("priority: {} → {}", before.priority, after.priority));
    }
    if before.importance != after.importance {
        parts.push(format!(
            "importance: {} → {}",
            before.importance, after.importance
        ));
    }
    if before.urgency != after.urgency {
        parts.push(format!("urgency: {} → {}", before.urgency, after.urgency));
    }
    if before.ticket_type != after.ticket_type {
        parts.push(format!(
            "ticket_type: {} → {}",
            before.ticket_type, after.ticket_type
        ));
    }
    if before.parent != after.parent {
        parts.push(format!(
            "parent: {} → {}",
            opt(&before.parent),
            opt(&after.parent)
        ));
    }
    if before.assignee != after.assignee {
        parts.push(format!(
            "assignee: {} → {}",
            opt(&before.assignee),
            opt(&after.assignee)
        ));
    }

    parts
}

/// Deterministic update description: joined diff tokens, or the no-op
/// sentinel when nothing differs
pub fn diff_description(before: &TicketSnapshot, after: &TicketSnapshot) -> String {
    let parts = diff_parts(before, after);
    if parts.is_empty() {
        NO_CHANGES.to_string()
    } else {
        parts.join("; ")
    }
}

impl TicketActivity {
    /// Entry for a freshly created ticket
    pub fn created(ticket: &Ticket, actor: Option<Actor>) -> Self {
        TicketActivity::new(
            ticket.id.clone(),
            actor,
            "created",
            format!("Created {} {}", ticket.ticket_type, ticket.title),
        )
    }

    /// Entry for an update, given before/after snapshots
    pub fn updated(ticket: &Ticket, actor: Option<Actor>, description: String) -> Self {
        TicketActivity::new(ticket.id.clone(), actor, "updated", description)
    }

    /// Entry for an explicit single-ticket deletion.
    ///
    /// Written before the ticket row is removed; the entry itself survives
    /// the cascade.
    pub fn deleted(ticket: &Ticket, actor: Option<Actor>) -> Self {
        TicketActivity::new(
            ticket.id.clone(),
            actor,
            "deleted",
            "Ticket deleted".to_string(),
        )
    }

    /// Entry for one ticket removed as part of a bulk deletion
    pub fn deleted_bulk(ticket: &Ticket, actor: Option<Actor>) -> Self {
        TicketActivity::new(
            ticket.id.clone(),
            actor,
            "deleted",
            "Ticket deleted in bulk operation".to_string(),
        )
    }

    /// Entry for a comment added to a ticket
    pub fn commented(ticket: &Ticket, actor: Option<Actor>, body_len: usize) -> Self {
        TicketActivity::new(
            ticket.id.clone(),
            actor,
            "commented",
            format!("Comment added ({} chars)", body_len),
        )
    }
}
