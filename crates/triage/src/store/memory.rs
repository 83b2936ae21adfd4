//! In-memory storage implementation for testing.
//!
//! All data lives in RAM behind `Rc<RefCell<...>>`; clones share the same
//! underlying maps, and each fresh instance is isolated, which keeps
//! parallel tests independent without file I/O.

use crate::domain::{Board, Ticket, TicketActivity, TicketComment};
use crate::errors::NotFoundError;
use crate::store::BoardStore;
use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory storage backend using HashMaps.
///
/// Data is lost when the last clone is dropped.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    boards: Rc<RefCell<HashMap<String, Board>>>,
    tickets: Rc<RefCell<HashMap<String, Ticket>>>,
    comments: Rc<RefCell<Vec<TicketComment>>>,
    activity: Rc<RefCell<Vec<TicketActivity>>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardStore for InMemoryStore {
    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn save_board(&self, board: &Board) -> Result<()> {
        self.boards
            .borrow_mut()
            .insert(board.id.clone(), board.clone());
        Ok(())
    }

    fn load_board(&self, id: &str) -> Result<Board> {
        self.boards
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::board(id).into())
    }

    fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.boards.borrow().values().cloned().collect())
    }

    fn delete_board(&self, id: &str) -> Result<()> {
        self.boards
            .borrow_mut()
            .remove(id)
            .ok_or_else(|| NotFoundError::board(id))?;
        Ok(())
    }

    fn save_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.tickets
            .borrow_mut()
            .insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    fn load_ticket(&self, id: &str) -> Result<Ticket> {
        self.tickets
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::ticket(id).into())
    }

    fn list_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.tickets.borrow().values().cloned().collect())
    }

    fn delete_ticket(&self, id: &str) -> Result<()> {
        self.tickets
            .borrow_mut()
            .remove(id)
            .ok_or_else(|| NotFoundError::ticket(id))?;
        Ok(())
    }

    fn save_comment(&self, comment: &TicketComment) -> Result<()> {
        self.comments.borrow_mut().push(comment.clone());
        Ok(())
    }

    fn list_comments(&self, ticket_id: &str) -> Result<Vec<TicketComment>> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    fn delete_comments_for(&self, ticket_id: &str) -> Result<()> {
        self.comments.borrow_mut().retain(|c| c.ticket_id != ticket_id);
        Ok(())
    }

    fn append_activity(&self, entry: &TicketActivity) -> Result<()> {
        self.activity.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn read_activity(&self) -> Result<Vec<TicketActivity>> {
        Ok(self.activity.borrow().clone())
    }

    fn delete_activity_for(&self, ticket_id: &str) -> Result<()> {
        self.activity.borrow_mut().retain(|a| a.ticket_id != ticket_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_noop() {
        let store = InMemoryStore::new();
        store.init().unwrap();
        store.init().unwrap(); // Should be idempotent
    }

    #[test]
    fn test_save_and_load_ticket() {
        let store = InMemoryStore::new();
        let ticket = Ticket::new("b".to_string(), "Test".to_string(), "Desc".to_string());
        store.save_ticket(&ticket).unwrap();

        let loaded = store.load_ticket(&ticket.id).unwrap();
        assert_eq!(loaded.id, ticket.id);
        assert_eq!(loaded.title, "Test");
    }

    #[test]
    fn test_save_updates_existing_ticket() {
        let store = InMemoryStore::new();
        let mut ticket = Ticket::new("b".to_string(), "Original".to_string(), String::new());
        store.save_ticket(&ticket).unwrap();

        ticket.title = "Updated".to_string();
        store.save_ticket(&ticket).unwrap();

        assert_eq!(store.load_ticket(&ticket.id).unwrap().title, "Updated");
        assert_eq!(store.list_tickets().unwrap().len(), 1);
    }

    #[test]
    fn test_load_nonexistent_ticket_fails() {
        let store = InMemoryStore::new();
        let result = store.load_ticket("nonexistent");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_delete_nonexistent_ticket_fails() {
        let store = InMemoryStore::new();
        assert!(store.delete_ticket("nonexistent").is_err());
    }

    #[test]
    fn test_comments_filtered_by_ticket() {
        let store = InMemoryStore::new();
        let c1 = TicketComment::new("t-1".to_string(), None, "first".to_string());
        let c2 = TicketComment::new("t-2".to_string(), None, "other".to_string());
        store.save_comment(&c1).unwrap();
        store.save_comment(&c2).unwrap();

        let for_t1 = store.list_comments("t-1").unwrap();
        assert_eq!(for_t1.len(), 1);
        assert_eq!(for_t1[0].body, "first");

        store.delete_comments_for("t-1").unwrap();
        assert!(store.list_comments("t-1").unwrap().is_empty());
        assert_eq!(store.list_comments("t-2").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_activity_for_keeps_other_tickets() {
        let store = InMemoryStore::new();
        let a = TicketActivity::new("t-1".to_string(), None, "created", "x".to_string());
        let b = TicketActivity::new("t-2".to_string(), None, "created", "y".to_string());
        store.append_activity(&a).unwrap();
        store.append_activity(&b).unwrap();

        store.delete_activity_for("t-1").unwrap();
        let log = store.read_activity().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].ticket_id, "t-2");
    }

    #[test]
    fn test_clone_shares_storage() {
        let store1 = InMemoryStore::new();
        let board = Board::new("Shared".to_string(), String::new(), None);
        store1.save_board(&board).unwrap();

        let store2 = store1.clone();
        assert_eq!(store2.load_board(&board.id).unwrap().name, "Shared");

        let ticket = Ticket::new(board.id.clone(), "Seen by both".to_string(), String::new());
        store2.save_ticket(&ticket).unwrap();
        assert_eq!(store1.list_tickets().unwrap().len(), 1);
    }
}
