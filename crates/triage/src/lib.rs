//! Triage Ticket Board Library
//!
//! Core functionality for the triage ticket tracker: boards, the
//! epic/ticket/bug hierarchy, importance x urgency prioritization, comments,
//! and the append-only activity log. The CLI binary is a thin layer over
//! this library; it can also be embedded in other applications.

pub mod activity;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod errors;
pub mod hierarchy;
pub mod output;
pub mod priority;
pub mod store;

// Re-export commonly used types
pub use commands::{BoardView, CommandExecutor, TicketDraft, TicketPatch};
pub use domain::{Board, Status, Ticket, TicketActivity, TicketComment, TicketType};
pub use errors::{NotFoundError, ParseError, PermissionError, ValidationError};
pub use store::{BoardStore, InMemoryStore, JsonFileStore};
