//! Storage abstraction for boards, tickets, comments, and the activity log.
//!
//! The `BoardStore` trait decouples the mutation orchestrator from the
//! persistence backend, so an in-memory store (tests) and a JSON file store
//! (CLI) can be used interchangeably.

use crate::domain::{Board, Ticket, TicketActivity, TicketComment};
use anyhow::Result;

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::InMemoryStore;

/// Trait for storage backends.
///
/// Implementations must be `Clone` to support shared access patterns. All
/// operations are request-scoped and single-writer; no cross-call locking is
/// provided.
///
/// # Examples
///
/// ```
/// use triage::domain::{Board, Ticket};
/// use triage::store::{BoardStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.init().unwrap();
///
/// let board = Board::new("Dev".to_string(), String::new(), None);
/// store.save_board(&board).unwrap();
///
/// let ticket = Ticket::new(board.id.clone(), "Fix".to_string(), String::new());
/// store.save_ticket(&ticket).unwrap();
/// assert_eq!(store.load_ticket(&ticket.id).unwrap().title, "Fix");
/// ```
pub trait BoardStore: Clone {
    /// Initialize the backend (idempotent).
    fn init(&self) -> Result<()>;

    /// Save a board (create or update).
    fn save_board(&self, board: &Board) -> Result<()>;

    /// Load a board by id.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::errors::NotFoundError`] if the board does not exist.
    fn load_board(&self, id: &str) -> Result<Board>;

    /// List all boards.
    fn list_boards(&self) -> Result<Vec<Board>>;

    /// Delete a board row. Cascading to its tickets is the orchestrator's
    /// responsibility, not the store's.
    fn delete_board(&self, id: &str) -> Result<()>;

    /// Save a ticket (create or update).
    fn save_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Load a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::errors::NotFoundError`] if the ticket does not exist.
    fn load_ticket(&self, id: &str) -> Result<Ticket>;

    /// List all tickets across all boards.
    fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Delete a single ticket row. Cascade (comments, activities, children)
    /// is executed by the orchestrator.
    fn delete_ticket(&self, id: &str) -> Result<()>;

    /// Save a comment.
    fn save_comment(&self, comment: &TicketComment) -> Result<()>;

    /// List comments for a ticket, in insertion order.
    fn list_comments(&self, ticket_id: &str) -> Result<Vec<TicketComment>>;

    /// Remove all comments belonging to a ticket.
    fn delete_comments_for(&self, ticket_id: &str) -> Result<()>;

    /// Append an entry to the activity log.
    fn append_activity(&self, entry: &TicketActivity) -> Result<()>;

    /// Read the full activity log in append order.
    fn read_activity(&self) -> Result<Vec<TicketActivity>>;

    /// Remove all activity entries for a ticket (cascade on delete).
    fn delete_activity_for(&self, ticket_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Status, Ticket};

    /// Exercise the trait against both backends with the same scenario.
    fn roundtrip_with<S: BoardStore>(store: S) {
        store.init().unwrap();

        let board = Board::new("Trait board".to_string(), String::new(), None);
        store.save_board(&board).unwrap();

        let mut ticket = Ticket::new(board.id.clone(), "Trait test".to_string(), String::new());
        ticket.status = Status::InProgress;
        store.save_ticket(&ticket).unwrap();

        let loaded = store.load_ticket(&ticket.id).unwrap();
        assert_eq!(loaded.status, Status::InProgress);

        let boards = store.list_boards().unwrap();
        assert_eq!(boards.len(), 1);

        store.delete_ticket(&ticket.id).unwrap();
        assert!(store.load_ticket(&ticket.id).is_err());
    }

    #[test]
    fn test_both_backends_satisfy_trait() {
        roundtrip_with(InMemoryStore::new());

        let temp_dir = tempfile::tempdir().unwrap();
        roundtrip_with(JsonFileStore::new(temp_dir.path()));
    }

    #[test]
    fn test_activity_log_is_append_ordered() {
        fn check<S: BoardStore>(store: S) {
            store.init().unwrap();
            let ticket = Ticket::new("b".to_string(), "T".to_string(), String::new());
            for i in 0..3 {
                let entry = crate::domain::TicketActivity::new(
                    ticket.id.clone(),
                    None,
                    "updated",
                    format!("change {}", i),
                );
                store.append_activity(&entry).unwrap();
            }
            let log = store.read_activity().unwrap();
            assert_eq!(log.len(), 3);
            assert_eq!(log[0].description, "change 0");
            assert_eq!(log[2].description, "change 2");
        }

        check(InMemoryStore::new());
        let temp_dir = tempfile::tempdir().unwrap();
        check(JsonFileStore::new(temp_dir.path()));
    }
}
