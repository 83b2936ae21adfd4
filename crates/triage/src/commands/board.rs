//! Board CRUD and the grouped board view

use super::*;
use serde::Serialize;

/// Tickets of a board grouped by status lane, in sort_order
#[derive(Debug, Default, Serialize)]
pub struct StatusLanes {
    pub todo: Vec<Ticket>,
    pub in_progress: Vec<Ticket>,
    pub done: Vec<Ticket>,
}

/// Tickets of a board grouped by hierarchy type, in sort_order
#[derive(Debug, Default, Serialize)]
pub struct TypeGroups {
    pub epics: Vec<Ticket>,
    pub tickets: Vec<Ticket>,
    pub bugs: Vec<Ticket>,
}

/// Read-only projection of a board for rendering: tickets grouped by status
/// and by type, plus the most recent activity. No validation runs here.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub board: Board,
    pub by_status: StatusLanes,
    pub by_type: TypeGroups,
    pub recent_activity: Vec<TicketActivity>,
}

/// How many activity entries the board view shows
const RECENT_ACTIVITY_LIMIT: usize = 10;

impl<S: BoardStore> CommandExecutor<S> {
    pub fn create_board(
        &self,
        name: String,
        description: String,
        owner: Option<Actor>,
    ) -> Result<Board> {
        let board = Board::new(name, description, owner);
        self.storage.save_board(&board)?;
        Ok(board)
    }

    pub fn list_boards(&self) -> Result<Vec<Board>> {
        let mut boards = self.storage.list_boards()?;
        boards.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(boards)
    }

    pub fn show_board(&self, id: &str) -> Result<Board> {
        self.storage.load_board(id)
    }

    /// Tickets of one board ordered by sort_order (then creation time for a
    /// stable tie-break).
    pub fn list_tickets_for_board(&self, board_id: &str) -> Result<Vec<Ticket>> {
        let board = self.storage.load_board(board_id)?;
        let mut tickets: Vec<Ticket> = self
            .storage
            .list_tickets()?
            .into_iter()
            .filter(|t| t.board_id == board.id)
            .collect();
        tickets.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(tickets)
    }

    /// The grouped, read-only projection the presentation layer renders.
    pub fn board_view(&self, board_id: &str) -> Result<BoardView> {
        let board = self.storage.load_board(board_id)?;
        let tickets = self.list_tickets_for_board(board_id)?;

        let mut by_status = StatusLanes::default();
        let mut by_type = TypeGroups::default();
        for ticket in &tickets {
            match ticket.status {
                Status::Todo => by_status.todo.push(ticket.clone()),
                Status::InProgress => by_status.in_progress.push(ticket.clone()),
                Status::Done => by_status.done.push(ticket.clone()),
            }
            match ticket.ticket_type {
                TicketType::Epic => by_type.epics.push(ticket.clone()),
                TicketType::Ticket => by_type.tickets.push(ticket.clone()),
                TicketType::Bug => by_type.bugs.push(ticket.clone()),
            }
        }

        let mut recent_activity = self.list_activity_for_board(board_id)?;
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Ok(BoardView {
            board,
            by_status,
            by_type,
            recent_activity,
        })
    }

    /// Delete a board and everything it owns.
    ///
    /// Whole-board removal cascades silently: the per-ticket "deleted"
    /// entries belong to explicit ticket deletion, and every activity row of
    /// the board's tickets is removed with them anyway.
    pub fn delete_board(&self, id: &str) -> Result<()> {
        let board = self.storage.load_board(id)?;

        let owned: Vec<String> = self
            .storage
            .list_tickets()?
            .into_iter()
            .filter(|t| t.board_id == board.id)
            .map(|t| t.id)
            .collect();

        for ticket_id in &owned {
            self.storage.delete_comments_for(ticket_id)?;
            self.storage.delete_activity_for(ticket_id)?;
            self.storage.delete_ticket(ticket_id)?;
        }

        self.storage.delete_board(id)
    }
}
