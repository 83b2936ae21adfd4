//! Core domain types for the ticket board.
//!
//! This module defines the fundamental data structures used throughout the
//! system: boards, tickets, comments, and activity log entries, together
//! with their associated enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque authenticated user reference (e.g. "alice", "svc:importer").
///
/// The core performs no authentication itself; callers supply whatever
/// identity their transport layer established.
pub type Actor = String;

/// Ticket workflow status (board swimlane)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started
    Todo,
    /// Currently being worked on
    InProgress,
    /// Completed
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse priority label, set independently by users.
///
/// This is NOT the derived priority score; see [`crate::priority`] for the
/// importance x urgency model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a ticket in the three-level hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// Top-level grouping; never has a parent
    Epic,
    /// Mid-level work item; optionally under an epic
    Ticket,
    /// Leaf-level defect; always under a ticket
    Bug,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Epic => "epic",
            TicketType::Ticket => "ticket",
            TicketType::Bug => "bug",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board owning a set of tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier (UUID)
    pub id: String,
    /// Board name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Actor who created the board; used for permission checks on
    /// owner-restricted mutations
    pub owner: Option<Actor>,
    /// When the board was created
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board with a fresh id and server-assigned timestamp
    pub fn new(name: String, description: String, owner: Option<Actor>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            owner,
            created_at: Utc::now(),
        }
    }
}

/// A ticket on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier (UUID)
    pub id: String,
    /// Owning board
    pub board_id: String,
    /// Short summary
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Current swimlane
    pub status: Status,
    /// Coarse priority label (independent of the derived score)
    pub priority: Priority,
    /// Position in the epic/ticket/bug hierarchy
    pub ticket_type: TicketType,
    /// Manual ordering key within a status lane
    pub sort_order: i64,
    /// 1 (lowest) ..= 10 (highest); multiplies with urgency for the score
    pub importance: i32,
    /// 1 (lowest) ..= 10 (highest); multiplies with importance for the score
    pub urgency: i32,
    /// Parent ticket in the hierarchy (epic for tickets, ticket for bugs)
    pub parent: Option<String>,
    /// Non-hierarchical linked tickets; takes no part in parent/child
    /// validation and is visible from the far end via an inverse lookup
    pub related_tickets: Vec<String>,
    /// Assigned user
    pub assignee: Option<Actor>,
    /// Actor of the most recent mutation
    pub updated_by: Option<Actor>,
    /// When the ticket was created
    pub created_at: DateTime<Utc>,
    /// When the ticket was last mutated
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a new ticket with default values (todo, medium, type ticket,
    /// importance/urgency 1)
    pub fn new(board_id: String, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            board_id,
            title,
            description,
            status: Status::Todo,
            priority: Priority::Medium,
            ticket_type: TicketType::Ticket,
            sort_order: 0,
            importance: 1,
            urgency: 1,
            parent: None,
            related_tickets: Vec::new(),
            assignee: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derived priority score: importance x urgency, range 1..=100
    pub fn priority_score(&self) -> i32 {
        crate::priority::priority_score(self.importance, self.urgency)
    }
}

/// An immutable comment on a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketComment {
    /// Unique identifier (UUID)
    pub id: String,
    /// Owning ticket
    pub ticket_id: String,
    /// Comment author; survives user deletion as None
    pub actor: Option<Actor>,
    /// Comment text
    pub body: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl TicketComment {
    pub fn new(ticket_id: String, actor: Option<Actor>, body: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            actor,
            body,
            created_at: Utc::now(),
        }
    }
}

/// An append-only audit-log entry recording a single ticket mutation.
///
/// Entries are never mutated or deleted by normal operation; they cascade
/// with their ticket, except the explicit "deleted" entry written as the
/// ticket itself is removed, which survives the removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketActivity {
    /// Unique identifier (UUID)
    pub id: String,
    /// Ticket this entry describes; may reference an already-removed id for
    /// "deleted" entries
    pub ticket_id: String,
    /// Actor of the mutation; survives user deletion as None
    pub actor: Option<Actor>,
    /// Short tag: "created", "updated", "edited", "deleted", "commented"
    pub kind: String,
    /// Human-readable summary, typically an auto-generated field diff
    pub description: String,
    /// Server-assigned, immutable
    pub timestamp: DateTime<Utc>,
}

impl TicketActivity {
    pub fn new(
        ticket_id: String,
        actor: Option<Actor>,
        kind: impl Into<String>,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ticket_id,
            actor,
            kind: kind.into(),
            description,
            timestamp: Utc::now(),
        }
    }
}
