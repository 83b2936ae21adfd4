//! Mutation orchestration for all board and ticket operations.
//!
//! The `CommandExecutor` is the thin coordination layer between callers
//! (CLI, embedding applications) and the core: every mutating call runs
//! validation first, applies the write, then records exactly one activity
//! entry. A rejection leaves no store write and no activity entry behind.
//!
//! This module is organized into submodules by functional area:
//! - `board`: board CRUD and the grouped board view
//! - `ticket`: ticket CRUD, status/order moves, cascade deletion, relations
//! - `comment`: comments and their activity entries

mod board;
mod comment;
mod ticket;

pub use board::{BoardView, StatusLanes, TypeGroups};
pub use ticket::{TicketDraft, TicketPatch};

// Common imports used across submodules
use crate::activity::{diff_parts, TicketSnapshot, NO_CHANGES};
use crate::domain::{Actor, Board, Priority, Status, Ticket, TicketActivity, TicketComment, TicketType};
use crate::errors::{NotFoundError, ParseError, PermissionError};
use crate::hierarchy::validate_ticket;
use crate::store::BoardStore;
use anyhow::Result;
use chrono::Utc;

/// Executes all mutating and read operations against a storage backend.
pub struct CommandExecutor<S: BoardStore> {
    storage: S,
}

impl<S: BoardStore> CommandExecutor<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying storage (read paths, tests)
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Activity entries for one ticket, newest first.
    ///
    /// Includes the surviving "deleted" entry after the ticket is gone.
    pub fn list_activity_for_ticket(&self, ticket_id: &str) -> Result<Vec<TicketActivity>> {
        let mut entries: Vec<TicketActivity> = self
            .storage
            .read_activity()?
            .into_iter()
            .filter(|a| a.ticket_id == ticket_id)
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Activity entries for all tickets currently on a board, newest first.
    pub fn list_activity_for_board(&self, board_id: &str) -> Result<Vec<TicketActivity>> {
        // Resolve the board first so a bad id is a lookup failure, not an
        // empty result.
        let board = self.storage.load_board(board_id)?;
        let ticket_ids: std::collections::HashSet<String> = self
            .storage
            .list_tickets()?
            .into_iter()
            .filter(|t| t.board_id == board.id)
            .map(|t| t.id)
            .collect();

        let mut entries: Vec<TicketActivity> = self
            .storage
            .read_activity()?
            .into_iter()
            .filter(|a| ticket_ids.contains(&a.ticket_id))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

/// Parse a status token ("todo", "in_progress", "done")
pub fn parse_status(s: &str) -> Result<Status> {
    match s {
        "todo" => Ok(Status::Todo),
        "in_progress" => Ok(Status::InProgress),
        "done" => Ok(Status::Done),
        _ => Err(ParseError::new("status", s, "todo, in_progress, done").into()),
    }
}

/// Parse a priority token ("low", "medium", "high")
pub fn parse_priority(s: &str) -> Result<Priority> {
    match s {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        _ => Err(ParseError::new("priority", s, "low, medium, high").into()),
    }
}

/// Parse a ticket type token ("epic", "ticket", "bug")
pub fn parse_ticket_type(s: &str) -> Result<TicketType> {
    match s {
        "epic" => Ok(TicketType::Epic),
        "ticket" => Ok(TicketType::Ticket),
        "bug" => Ok(TicketType::Bug),
        _ => Err(ParseError::new("ticket type", s, "epic, ticket, bug").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_tokens() {
        assert_eq!(parse_status("todo").unwrap(), Status::Todo);
        assert_eq!(parse_status("in_progress").unwrap(), Status::InProgress);
        assert_eq!(parse_status("done").unwrap(), Status::Done);
        assert!(parse_status("doing").is_err());
    }

    #[test]
    fn test_parse_priority_tokens() {
        assert_eq!(parse_priority("medium").unwrap(), Priority::Medium);
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn test_parse_ticket_type_tokens() {
        assert_eq!(parse_ticket_type("epic").unwrap(), TicketType::Epic);
        assert_eq!(parse_ticket_type("bug").unwrap(), TicketType::Bug);
        assert!(parse_ticket_type("story").is_err());
    }

    #[test]
    fn test_parse_rejections_are_typed() {
        let err = parse_status("doing").unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
        assert_eq!(
            err.to_string(),
            "Invalid status 'doing'. Must be one of: todo, in_progress, done"
        );

        let err = parse_priority("urgent").unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
    }
}
