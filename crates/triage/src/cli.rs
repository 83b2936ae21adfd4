//! Command-line interface definitions using clap.

use clap::{Parser, Subcommand};

/// Triage ticket board
///
/// A repository-local ticket tracker with an epic/ticket/bug hierarchy,
/// importance x urgency prioritization, and a full activity trail.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid arguments or usage error
///   3  - Resource not found (board, ticket)
///   4  - Validation failed (range, type pairing, cycle detected)
///   5  - Permission denied
#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Ticket board with hierarchy and priority tracking", long_about = None)]
pub struct Cli {
    /// Acting user recorded on mutations (falls back to TRIAGE_ACTOR)
    #[arg(long, global = true)]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory in the current directory
    Init,

    /// Board management commands
    #[command(subcommand)]
    Board(BoardCommands),

    /// Ticket management commands
    #[command(subcommand)]
    Ticket(TicketCommands),

    /// Comment commands
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Activity log commands
    #[command(subcommand)]
    Activity(ActivityCommands),
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Create a new board
    Create {
        /// Board name
        name: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,

        /// Record the creating actor as board owner, restricting
        /// reposition to them
        #[arg(long)]
        own: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all boards
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one board
    Show {
        /// Board ID
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Show a board with tickets grouped by status and type plus recent
    /// activity
    View {
        /// Board ID
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete a board and everything it owns
    Delete {
        /// Board ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// Create a ticket on a board
    Create {
        /// Owning board ID
        board_id: String,

        /// Short summary
        title: String,

        /// Detailed description
        #[arg(long, default_value = "")]
        description: String,

        /// Hierarchy type (epic, ticket, bug)
        #[arg(long = "type", default_value = "ticket")]
        ticket_type: String,

        /// Workflow status (todo, in_progress, done)
        #[arg(long, default_value = "todo")]
        status: String,

        /// Coarse priority label (low, medium, high)
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Importance, 1 (lowest) to 10 (highest)
        #[arg(long, default_value = "1")]
        importance: i32,

        /// Urgency, 1 (lowest) to 10 (highest)
        #[arg(long, default_value = "1")]
        urgency: i32,

        /// Parent ticket ID (epic for tickets, ticket for bugs)
        #[arg(long)]
        parent: Option<String>,

        /// Assigned user
        #[arg(long)]
        assignee: Option<String>,

        /// Manual ordering key within the status lane
        #[arg(long, default_value = "0")]
        sort_order: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one ticket with its derived priority score
    Show {
        /// Ticket ID
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Update ticket fields; logs one activity entry per invocation
    Update {
        /// Ticket ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Workflow status (todo, in_progress, done)
        #[arg(long)]
        status: Option<String>,

        /// Coarse priority label (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Hierarchy type (epic, ticket, bug)
        #[arg(long = "type")]
        ticket_type: Option<String>,

        #[arg(long)]
        importance: Option<i32>,

        #[arg(long)]
        urgency: Option<i32>,

        /// Set the parent ticket
        #[arg(long, conflicts_with = "clear_parent")]
        parent: Option<String>,

        /// Remove the parent link
        #[arg(long)]
        clear_parent: bool,

        /// Set the assignee
        #[arg(long, conflicts_with = "clear_assignee")]
        assignee: Option<String>,

        /// Remove the assignee
        #[arg(long)]
        clear_assignee: bool,

        #[arg(long)]
        sort_order: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a ticket to a status lane (drag-and-drop); one activity entry
    Move {
        /// Ticket ID
        id: String,

        /// Target status (todo, in_progress, done)
        status: String,

        /// New position within the lane
        #[arg(long)]
        sort_order: Option<i64>,

        #[arg(long)]
        json: bool,
    },

    /// Move a ticket on the importance/urgency matrix (board-owner
    /// restricted when an owner is set)
    Reposition {
        /// Ticket ID
        id: String,

        /// Importance, 1 to 10
        importance: i32,

        /// Urgency, 1 to 10
        urgency: i32,

        #[arg(long)]
        json: bool,
    },

    /// Delete tickets and their subtrees
    Delete {
        /// Ticket IDs (more than one implies a bulk deletion)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Link a ticket to another, non-hierarchically
    Relate {
        /// Ticket ID carrying the link
        id: String,

        /// Ticket ID being linked to
        other: String,

        #[arg(long)]
        json: bool,
    },

    /// List tickets that link to the given ticket
    RelatedFrom {
        /// Ticket ID
        id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Add a comment to a ticket (blank bodies are ignored)
    Add {
        /// Ticket ID
        ticket_id: String,

        /// Comment text
        body: String,

        #[arg(long)]
        json: bool,
    },

    /// List comments on a ticket, newest first
    List {
        /// Ticket ID
        ticket_id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Activity entries for one ticket, newest first
    Ticket {
        /// Ticket ID
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Activity entries for all tickets on a board, newest first
    Board {
        /// Board ID
        id: String,

        #[arg(long)]
        json: bool,
    },
}
