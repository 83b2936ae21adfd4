//! JSON file-based storage implementation.
//!
//! Each board, ticket, and comment is one JSON file under `data/`; the
//! activity log is an append-only `data/activity.jsonl`. All whole-file
//! writes are atomic (write to temp file, then rename).

use crate::domain::{Board, Ticket, TicketActivity, TicketComment};
use crate::errors::NotFoundError;
use crate::store::BoardStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const BOARDS_DIR: &str = "data/boards";
const TICKETS_DIR: &str = "data/tickets";
const COMMENTS_DIR: &str = "data/comments";
const INDEX_FILE: &str = "data/index.json";
const ACTIVITY_FILE: &str = "data/activity.jsonl";

/// Index of all entity ids in the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Index {
    /// Schema version for future migrations
    schema_version: u32,
    board_ids: Vec<String>,
    ticket_ids: Vec<String>,
    comment_ids: Vec<String>,
}

impl Default for Index {
    fn default() -> Self {
        Self {
            schema_version: 1,
            board_ids: Vec::new(),
            ticket_ids: Vec::new(),
            comment_ids: Vec::new(),
        }
    }
}

/// JSON file-based storage rooted at a data directory.
#[derive(Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a new JSON file store instance at the given root path
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn board_path(&self, id: &str) -> PathBuf {
        self.root.join(BOARDS_DIR).join(format!("{}.json", id))
    }

    fn ticket_path(&self, id: &str) -> PathBuf {
        self.root.join(TICKETS_DIR).join(format!("{}.json", id))
    }

    fn comment_path(&self, id: &str) -> PathBuf {
        self.root.join(COMMENTS_DIR).join(format!("{}.json", id))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).context("Failed to write temporary file")?;
        fs::rename(&temp_path, path).context("Failed to rename temporary file")?;

        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to deserialize data")
    }

    fn load_index(&self) -> Result<Index> {
        self.read_json(&self.root.join(INDEX_FILE))
    }

    fn save_index(&self, index: &Index) -> Result<()> {
        self.write_json(&self.root.join(INDEX_FILE), index)
    }

    fn read_activity_lines(&self) -> Result<Vec<TicketActivity>> {
        let path = self.root.join(ACTIVITY_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&path).context("Failed to open activity log")?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read activity log line")?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: TicketActivity =
                serde_json::from_str(&line).context("Failed to deserialize activity entry")?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn rewrite_activity(&self, entries: &[TicketActivity]) -> Result<()> {
        let path = self.root.join(ACTIVITY_FILE);
        let temp_path = path.with_extension("jsonl.tmp");
        {
            let mut file = fs::File::create(&temp_path)
                .context("Failed to create temporary activity log")?;
            for entry in entries {
                let line = serde_json::to_string(entry)
                    .context("Failed to serialize activity entry")?;
                writeln!(file, "{}", line).context("Failed to write activity entry")?;
            }
        }
        fs::rename(&temp_path, &path).context("Failed to rename activity log")?;
        Ok(())
    }
}

impl BoardStore for JsonFileStore {
    fn init(&self) -> Result<()> {
        for dir in [BOARDS_DIR, TICKETS_DIR, COMMENTS_DIR] {
            fs::create_dir_all(self.root.join(dir))
                .with_context(|| format!("Failed to create directory: {}", dir))?;
        }

        let index_path = self.root.join(INDEX_FILE);
        if !index_path.exists() {
            self.save_index(&Index::default())?;
        }

        let activity_path = self.root.join(ACTIVITY_FILE);
        if !activity_path.exists() {
            fs::File::create(&activity_path).context("Failed to create activity log")?;
        }

        Ok(())
    }

    fn save_board(&self, board: &Board) -> Result<()> {
        self.write_json(&self.board_path(&board.id), board)?;

        let mut index = self.load_index()?;
        if !index.board_ids.contains(&board.id) {
            index.board_ids.push(board.id.clone());
            self.save_index(&index)?;
        }
        Ok(())
    }

    fn load_board(&self, id: &str) -> Result<Board> {
        let path = self.board_path(id);
        if !path.exists() {
            return Err(NotFoundError::board(id).into());
        }
        self.read_json(&path)
    }

    fn list_boards(&self) -> Result<Vec<Board>> {
        let index = self.load_index()?;
        index
            .board_ids
            .iter()
            .map(|id| self.load_board(id))
            .collect()
    }

    fn delete_board(&self, id: &str) -> Result<()> {
        let path = self.board_path(id);
        if !path.exists() {
            return Err(NotFoundError::board(id).into());
        }
        fs::remove_file(&path).context("Failed to delete board file")?;

        let mut index = self.load_index()?;
        index.board_ids.retain(|b| b != id);
        self.save_index(&index)
    }

    fn save_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.write_json(&self.ticket_path(&ticket.id), ticket)?;

        let mut index = self.load_index()?;
        if !index.ticket_ids.contains(&ticket.id) {
            index.ticket_ids.push(ticket.id.clone());
            self.save_index(&index)?;
        }
        Ok(())
    }

    fn load_ticket(&self, id: &str) -> Result<Ticket> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Err(NotFoundError::ticket(id).into());
        }
        self.read_json(&path)
    }

    fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let index = self.load_index()?;
        index
            .ticket_ids
            .iter()
            .map(|id| self.load_ticket(id))
            .collect()
    }

    fn delete_ticket(&self, id: &str) -> Result<()> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Err(NotFoundError::ticket(id).into());
        }
        fs::remove_file(&path).context("Failed to delete ticket file")?;

        let mut index = self.load_index()?;
        index.ticket_ids.retain(|t| t != id);
        self.save_index(&index)
    }

    fn save_comment(&self, comment: &TicketComment) -> Result<()> {
        self.write_json(&self.comment_path(&comment.id), comment)?;

        let mut index = self.load_index()?;
        if !index.comment_ids.contains(&comment.id) {
            index.comment_ids.push(comment.id.clone());
            self.save_index(&index)?;
        }
        Ok(())
    }

    fn list_comments(&self, ticket_id: &str) -> Result<Vec<TicketComment>> {
        let index = self.load_index()?;
        let mut comments = Vec::new();
        for id in &index.comment_ids {
            let comment: TicketComment = self.read_json(&self.comment_path(id))?;
            if comment.ticket_id == ticket_id {
                comments.push(comment);
            }
        }
        Ok(comments)
    }

    fn delete_comments_for(&self, ticket_id: &str) -> Result<()> {
        let index = self.load_index()?;
        let mut kept = Vec::new();
        for id in &index.comment_ids {
            let path = self.comment_path(id);
            let comment: TicketComment = self.read_json(&path)?;
            if comment.ticket_id == ticket_id {
                fs::remove_file(&path).context("Failed to delete comment file")?;
            } else {
                kept.push(id.clone());
            }
        }

        let mut index = self.load_index()?;
        index.comment_ids = kept;
        self.save_index(&index)
    }

    fn append_activity(&self, entry: &TicketActivity) -> Result<()> {
        let path = self.root.join(ACTIVITY_FILE);
        let line = serde_json::to_string(entry).context("Failed to serialize activity entry")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open activity log")?;
        writeln!(file, "{}", line).context("Failed to append activity entry")?;
        Ok(())
    }

    fn read_activity(&self) -> Result<Vec<TicketActivity>> {
        self.read_activity_lines()
    }

    fn delete_activity_for(&self, ticket_id: &str) -> Result<()> {
        let entries = self.read_activity_lines()?;
        let kept: Vec<TicketActivity> = entries
            .into_iter()
            .filter(|a| a.ticket_id != ticket_id)
            .collect();
        self.rewrite_activity(&kept)
    }
}
