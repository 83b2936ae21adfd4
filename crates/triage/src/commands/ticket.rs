//! Ticket CRUD, status/order moves, cascade deletion, and relations

use super::*;
use std::collections::HashSet;

/// Fields for a new ticket. Defaults match a bare created ticket: todo,
/// medium, type ticket, importance/urgency 1, sort_order 0.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub ticket_type: TicketType,
    pub sort_order: i64,
    pub importance: i32,
    pub urgency: i32,
    pub parent: Option<String>,
    pub assignee: Option<Actor>,
}

impl TicketDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            ticket_type: TicketType::Ticket,
            sort_order: 0,
            importance: 1,
            urgency: 1,
            parent: None,
            assignee: None,
        }
    }
}

/// Partial update for an existing ticket. `None` leaves a field untouched;
/// for the two clearable references the inner `Option` distinguishes
/// "set to X" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub ticket_type: Option<TicketType>,
    pub sort_order: Option<i64>,
    pub importance: Option<i32>,
    pub urgency: Option<i32>,
    pub parent: Option<Option<String>>,
    pub assignee: Option<Option<Actor>>,
}

impl<S: BoardStore> CommandExecutor<S> {
    /// Create a ticket on a board.
    ///
    /// Sequence: resolve board and parent (lookup failures surface before
    /// validation), validate the candidate, write, log one "created" entry.
    pub fn create_ticket(
        &self,
        board_id: &str,
        draft: TicketDraft,
        actor: Option<Actor>,
    ) -> Result<Ticket> {
        let board = self.storage.load_board(board_id)?;
        if let Some(parent_id) = &draft.parent {
            // Missing parent is a lookup failure, not a validation verdict.
            self.storage.load_ticket(parent_id)?;
        }

        let mut ticket = Ticket::new(board.id, draft.title, draft.description);
        ticket.status = draft.status;
        ticket.priority = draft.priority;
        ticket.ticket_type = draft.ticket_type;
        ticket.sort_order = draft.sort_order;
        ticket.importance = draft.importance;
        ticket.urgency = draft.urgency;
        ticket.parent = draft.parent;
        ticket.assignee = draft.assignee;
        ticket.updated_by = actor.clone();

        self.validate(&ticket)?;

        self.storage.save_ticket(&ticket)?;
        self.storage
            .append_activity(&TicketActivity::created(&ticket, actor))?;

        Ok(ticket)
    }

    /// Apply a field patch to a ticket.
    ///
    /// Always logs exactly one "updated" entry, even when nothing changed
    /// (sentinel description): the trail records that a mutation was
    /// attempted.
    pub fn update_ticket(
        &self,
        ticket_id: &str,
        patch: TicketPatch,
        actor: Option<Actor>,
    ) -> Result<Ticket> {
        let mut ticket = self.storage.load_ticket(ticket_id)?;
        let before = TicketSnapshot::of(&ticket);

        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        if let Some(ticket_type) = patch.ticket_type {
            ticket.ticket_type = ticket_type;
        }
        if let Some(sort_order) = patch.sort_order {
            ticket.sort_order = sort_order;
        }
        if let Some(importance) = patch.importance {
            ticket.importance = importance;
        }
        if let Some(urgency) = patch.urgency {
            ticket.urgency = urgency;
        }
        if let Some(parent) = patch.parent {
            if let Some(parent_id) = &parent {
                self.storage.load_ticket(parent_id)?;
            }
            ticket.parent = parent;
        }
        if let Some(assignee) = patch.assignee {
            ticket.assignee = assignee;
        }

        self.validate(&ticket)?;

        ticket.updated_by = actor.clone();
        ticket.updated_at = Utc::now();
        self.storage.save_ticket(&ticket)?;

        let after = TicketSnapshot::of(&ticket);
        let description = crate::activity::diff_description(&before, &after);
        self.storage
            .append_activity(&TicketActivity::updated(&ticket, actor, description))?;

        Ok(ticket)
    }

    /// Drag-and-drop move: status and lane position changed together as one
    /// mutation, producing a single activity entry.
    pub fn update_status_and_order(
        &self,
        ticket_id: &str,
        new_status: Status,
        new_sort_order: Option<i64>,
        actor: Option<Actor>,
    ) -> Result<Ticket> {
        let mut ticket = self.storage.load_ticket(ticket_id)?;
        let before = TicketSnapshot::of(&ticket);
        let old_sort_order = ticket.sort_order;

        ticket.status = new_status;
        if let Some(sort_order) = new_sort_order {
            ticket.sort_order = sort_order;
        }

        ticket.updated_by = actor.clone();
        ticket.updated_at = Utc::now();
        self.storage.save_ticket(&ticket)?;

        let after = TicketSnapshot::of(&ticket);
        let mut parts = diff_parts(&before, &after);
        if ticket.sort_order != old_sort_order {
            // sort_order is not in the snapshot field set; reordering gets
            // its own wording.
            parts.push("Priority reordered".to_string());
        }
        let description = if parts.is_empty() {
            NO_CHANGES.to_string()
        } else {
            parts.join("; ")
        };
        self.storage
            .append_activity(&TicketActivity::updated(&ticket, actor, description))?;

        Ok(ticket)
    }

    /// Move a ticket on the importance/urgency matrix.
    ///
    /// Owner-restricted: when the board records an owner, only that actor
    /// may reposition its tickets.
    pub fn reposition_ticket(
        &self,
        ticket_id: &str,
        importance: i32,
        urgency: i32,
        actor: Option<Actor>,
    ) -> Result<Ticket> {
        let ticket = self.storage.load_ticket(ticket_id)?;
        let board = self.storage.load_board(&ticket.board_id)?;

        if let Some(owner) = &board.owner {
            if actor.as_deref() != Some(owner.as_str()) {
                return Err(PermissionError(format!(
                    "only the board owner may reposition tickets on '{}'",
                    board.name
                ))
                .into());
            }
        }

        self.update_ticket(
            ticket_id,
            TicketPatch {
                importance: Some(importance),
                urgency: Some(urgency),
                ..TicketPatch::default()
            },
            actor,
        )
    }

    /// Delete a ticket and its whole subtree.
    ///
    /// Exactly one "deleted" entry is written for the explicitly deleted
    /// ticket, before its row is removed; descendants cascade silently and
    /// their activity rows go with them.
    pub fn delete_ticket(&self, ticket_id: &str, actor: Option<Actor>) -> Result<()> {
        self.remove_subtree(ticket_id, actor, false)
    }

    /// Delete several tickets, logging a per-item bulk "deleted" entry.
    pub fn delete_tickets(&self, ticket_ids: &[String], actor: Option<Actor>) -> Result<()> {
        for id in ticket_ids {
            // An earlier deletion in the batch may have cascaded over a
            // later id; that is completion, not an error.
            match self.storage.load_ticket(id) {
                Ok(_) => self.remove_subtree(id, actor.clone(), true)?,
                Err(e) if e.downcast_ref::<NotFoundError>().is_some() => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn remove_subtree(&self, root_id: &str, actor: Option<Actor>, bulk: bool) -> Result<()> {
        let root = self.storage.load_ticket(root_id)?;

        // Collect the subtree over the parent links. The visited set keeps
        // the walk terminating on pre-existing cyclic parent data, same as
        // the validator's ancestor walk.
        let all = self.storage.list_tickets()?;
        let mut subtree = vec![root.id.clone()];
        let mut seen: HashSet<String> = subtree.iter().cloned().collect();
        let mut frontier = vec![root.id.clone()];
        while let Some(current) = frontier.pop() {
            for child in all.iter().filter(|t| t.parent.as_deref() == Some(&current)) {
                if seen.insert(child.id.clone()) {
                    subtree.push(child.id.clone());
                    frontier.push(child.id.clone());
                }
            }
        }

        // Cascade comments and activity rows for every node first, so the
        // "deleted" entry appended next survives the purge of the root's
        // own history.
        for id in &subtree {
            self.storage.delete_comments_for(id)?;
            self.storage.delete_activity_for(id)?;
        }

        // Log before removing the ticket row, never after: the entry may
        // reference an id that is about to disappear.
        let entry = if bulk {
            TicketActivity::deleted_bulk(&root, actor)
        } else {
            TicketActivity::deleted(&root, actor)
        };
        self.storage.append_activity(&entry)?;

        for id in &subtree {
            self.storage.delete_ticket(id)?;
        }
        Ok(())
    }

    /// Link a ticket to another, non-hierarchically.
    ///
    /// The link is directional; the far end sees it through
    /// [`Self::related_from`]. No hierarchy rules apply.
    pub fn relate_tickets(
        &self,
        ticket_id: &str,
        other_id: &str,
        actor: Option<Actor>,
    ) -> Result<Ticket> {
        let mut ticket = self.storage.load_ticket(ticket_id)?;
        let other = self.storage.load_ticket(other_id)?;

        // A ticket never relates to itself; repeats are also no-ops.
        if ticket.id != other.id && !ticket.related_tickets.contains(&other.id) {
            ticket.related_tickets.push(other.id.clone());
            ticket.updated_by = actor.clone();
            ticket.updated_at = Utc::now();
            self.storage.save_ticket(&ticket)?;
            self.storage.append_activity(&TicketActivity::updated(
                &ticket,
                actor,
                format!("Related ticket {} linked", other.id),
            ))?;
        }
        Ok(ticket)
    }

    /// Tickets that link *to* the given ticket (inverse of
    /// `related_tickets`).
    pub fn related_from(&self, ticket_id: &str) -> Result<Vec<Ticket>> {
        let ticket = self.storage.load_ticket(ticket_id)?;
        Ok(self
            .storage
            .list_tickets()?
            .into_iter()
            .filter(|t| t.related_tickets.contains(&ticket.id))
            .collect())
    }

    pub fn show_ticket(&self, id: &str) -> Result<Ticket> {
        self.storage.load_ticket(id)
    }

    fn validate(&self, candidate: &Ticket) -> Result<()> {
        validate_ticket(candidate, |id| self.storage.load_ticket(id).ok())?;
        Ok(())
    }
}
