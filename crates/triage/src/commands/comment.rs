//! Comments and their activity entries

use super::*;

impl<S: BoardStore> CommandExecutor<S> {
    /// Add a comment to a ticket.
    ///
    /// The body is trimmed first; a blank body is silently ignored and
    /// produces neither a comment nor an activity entry. A stored comment
    /// logs one "commented" entry carrying the trimmed character count.
    pub fn add_comment(
        &self,
        ticket_id: &str,
        body: &str,
        actor: Option<Actor>,
    ) -> Result<Option<TicketComment>> {
        let ticket = self.storage.load_ticket(ticket_id)?;

        let body = body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        let comment = TicketComment::new(ticket.id.clone(), actor.clone(), body.to_string());
        self.storage.save_comment(&comment)?;
        self.storage.append_activity(&TicketActivity::commented(
            &ticket,
            actor,
            comment.body.chars().count(),
        ))?;

        Ok(Some(comment))
    }

    /// Comments on a ticket, newest first
    pub fn list_comments(&self, ticket_id: &str) -> Result<Vec<TicketComment>> {
        let ticket = self.storage.load_ticket(ticket_id)?;
        let mut comments = self.storage.list_comments(&ticket.id)?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }
}
