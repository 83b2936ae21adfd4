//! Triage Ticket Board
//!
//! A repository-local CLI ticket tracker with an epic/ticket/bug hierarchy,
//! importance x urgency prioritization, and a full audit trail.
//!
//! # Features
//!
//! - Three-level hierarchy with type pairing and cycle detection
//! - Derived priority score (importance x urgency)
//! - Append-only activity log for every mutation
//! - Status lanes with manual ordering

use anyhow::{anyhow, Result};
use clap::Parser;
use triage::cli::{ActivityCommands, BoardCommands, Cli, Commands, CommentCommands, TicketCommands};
use triage::commands::{parse_priority, parse_status, parse_ticket_type, CommandExecutor, TicketDraft, TicketPatch};
use triage::domain::Ticket;
use triage::errors::{NotFoundError, ParseError, PermissionError, ValidationError};
use triage::output::ExitCode;
use triage::priority::{importance_label, urgency_label};
use triage::store::{BoardStore, JsonFileStore};
use std::env;

/// Map an error to a process exit code via its typed root cause
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if error.downcast_ref::<NotFoundError>().is_some() {
        return ExitCode::NotFound;
    }
    if error.downcast_ref::<ValidationError>().is_some() {
        return ExitCode::ValidationFailed;
    }
    if error.downcast_ref::<PermissionError>().is_some() {
        return ExitCode::PermissionDenied;
    }
    if error.downcast_ref::<ParseError>().is_some() {
        return ExitCode::InvalidArgument;
    }
    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ExitCode::NotFound,
            std::io::ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
            _ => ExitCode::GenericError,
        };
    }
    ExitCode::GenericError
}

fn main() {
    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", e);
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_ticket(ticket: &Ticket) {
    println!("ID: {}", ticket.id);
    println!("Board: {}", ticket.board_id);
    println!("Title: {}", ticket.title);
    println!("Description: {}", ticket.description);
    println!("Type: {}", ticket.ticket_type);
    println!("Status: {}", ticket.status);
    println!("Priority: {}", ticket.priority);
    println!(
        "Importance: {} ({})",
        ticket.importance,
        importance_label(ticket.importance)
    );
    println!(
        "Urgency: {} ({})",
        ticket.urgency,
        urgency_label(ticket.urgency)
    );
    println!("Score: {}", ticket.priority_score());
    println!("Parent: {}", ticket.parent.as_deref().unwrap_or("none"));
    if !ticket.related_tickets.is_empty() {
        println!("Related: {}", ticket.related_tickets.join(", "));
    }
    println!("Assignee: {}", ticket.assignee.as_deref().unwrap_or("none"));
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let actor = cli.actor.or_else(|| env::var("TRIAGE_ACTOR").ok());

    // Ensure command is provided
    let command = cli
        .command
        .ok_or_else(|| anyhow!("No command provided. Use --help for usage."))?;

    let current_dir = env::current_dir()?;

    // Data directory: TRIAGE_DATA_DIR env var or default to .triage/
    let data_dir = if let Ok(custom_dir) = env::var("TRIAGE_DATA_DIR") {
        current_dir.join(custom_dir)
    } else {
        current_dir.join(".triage")
    };

    let storage = JsonFileStore::new(&data_dir);
    let executor = CommandExecutor::new(storage.clone());

    match command {
        Commands::Init => {
            storage.init()?;
            println!("Initialized triage data directory");
        }
        Commands::Board(board_cmd) => match board_cmd {
            BoardCommands::Create {
                name,
                description,
                own,
                json,
            } => {
                let owner = if own { actor.clone() } else { None };
                let board = executor.create_board(name, description, owner)?;
                if json {
                    print_json(&board)?;
                } else {
                    println!("Created board: {}", board.id);
                }
            }
            BoardCommands::List { json } => {
                let boards = executor.list_boards()?;
                if json {
                    print_json(&boards)?;
                } else {
                    for board in boards {
                        println!("{} | {}", board.id, board.name);
                    }
                }
            }
            BoardCommands::Show { id, json } => {
                let board = executor.show_board(&id)?;
                if json {
                    print_json(&board)?;
                } else {
                    println!("ID: {}", board.id);
                    println!("Name: {}", board.name);
                    println!("Description: {}", board.description);
                    println!("Owner: {}", board.owner.as_deref().unwrap_or("none"));
                }
            }
            BoardCommands::View { id, json } => {
                let view = executor.board_view(&id)?;
                if json {
                    print_json(&view)?;
                } else {
                    println!("Board: {}", view.board.name);
                    for (lane, tickets) in [
                        ("todo", &view.by_status.todo),
                        ("in_progress", &view.by_status.in_progress),
                        ("done", &view.by_status.done),
                    ] {
                        println!("\n{} ({}):", lane, tickets.len());
                        for ticket in tickets {
                            println!(
                                "  {} | {} | {} | score {}",
                                ticket.id,
                                ticket.title,
                                ticket.ticket_type,
                                ticket.priority_score()
                            );
                        }
                    }
                    if !view.recent_activity.is_empty() {
                        println!("\nRecent activity:");
                        for entry in &view.recent_activity {
                            println!(
                                "  [{}] {} {}",
                                entry.timestamp.format("%Y-%m-%d %H:%M"),
                                entry.kind,
                                entry.description
                            );
                        }
                    }
                }
            }
            BoardCommands::Delete { id } => {
                executor.delete_board(&id)?;
                println!("Deleted board: {}", id);
            }
        },
        Commands::Ticket(ticket_cmd) => match ticket_cmd {
            TicketCommands::Create {
                board_id,
                title,
                description,
                ticket_type,
                status,
                priority,
                importance,
                urgency,
                parent,
                assignee,
                sort_order,
                json,
            } => {
                let draft = TicketDraft {
                    title,
                    description,
                    status: parse_status(&status)?,
                    priority: parse_priority(&priority)?,
                    ticket_type: parse_ticket_type(&ticket_type)?,
                    sort_order,
                    importance,
                    urgency,
                    parent,
                    assignee,
                };
                let ticket = executor.create_ticket(&board_id, draft, actor)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    println!("Created ticket: {}", ticket.id);
                }
            }
            TicketCommands::Show { id, json } => {
                let ticket = executor.show_ticket(&id)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    print_ticket(&ticket);
                }
            }
            TicketCommands::Update {
                id,
                title,
                description,
                status,
                priority,
                ticket_type,
                importance,
                urgency,
                parent,
                clear_parent,
                assignee,
                clear_assignee,
                sort_order,
                json,
            } => {
                let patch = TicketPatch {
                    title,
                    description,
                    status: status.map(|s| parse_status(&s)).transpose()?,
                    priority: priority.map(|p| parse_priority(&p)).transpose()?,
                    ticket_type: ticket_type.map(|t| parse_ticket_type(&t)).transpose()?,
                    sort_order,
                    importance,
                    urgency,
                    parent: if clear_parent {
                        Some(None)
                    } else {
                        parent.map(Some)
                    },
                    assignee: if clear_assignee {
                        Some(None)
                    } else {
                        assignee.map(Some)
                    },
                };
                let ticket = executor.update_ticket(&id, patch, actor)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    println!("Updated ticket: {}", ticket.id);
                }
            }
            TicketCommands::Move {
                id,
                status,
                sort_order,
                json,
            } => {
                let new_status = parse_status(&status)?;
                let ticket = executor.update_status_and_order(&id, new_status, sort_order, actor)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    println!("Moved ticket {} to {}", ticket.id, ticket.status);
                }
            }
            TicketCommands::Reposition {
                id,
                importance,
                urgency,
                json,
            } => {
                let ticket = executor.reposition_ticket(&id, importance, urgency, actor)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    println!(
                        "Repositioned ticket {}: score {}",
                        ticket.id,
                        ticket.priority_score()
                    );
                }
            }
            TicketCommands::Delete { ids } => {
                if ids.len() == 1 {
                    executor.delete_ticket(&ids[0], actor)?;
                    println!("Deleted ticket: {}", ids[0]);
                } else {
                    executor.delete_tickets(&ids, actor)?;
                    println!("Deleted {} ticket(s)", ids.len());
                }
            }
            TicketCommands::Relate { id, other, json } => {
                let ticket = executor.relate_tickets(&id, &other, actor)?;
                if json {
                    print_json(&ticket)?;
                } else {
                    println!("Related {} to {}", id, other);
                }
            }
            TicketCommands::RelatedFrom { id, json } => {
                let tickets = executor.related_from(&id)?;
                if json {
                    print_json(&tickets)?;
                } else {
                    for ticket in tickets {
                        println!("{} | {}", ticket.id, ticket.title);
                    }
                }
            }
        },
        Commands::Comment(comment_cmd) => match comment_cmd {
            CommentCommands::Add {
                ticket_id,
                body,
                json,
            } => match executor.add_comment(&ticket_id, &body, actor)? {
                Some(comment) => {
                    if json {
                        print_json(&comment)?;
                    } else {
                        println!("Added comment: {}", comment.id);
                    }
                }
                None => {
                    if !json {
                        println!("Empty comment ignored");
                    }
                }
            },
            CommentCommands::List { ticket_id, json } => {
                let comments = executor.list_comments(&ticket_id)?;
                if json {
                    print_json(&comments)?;
                } else {
                    for comment in comments {
                        println!(
                            "[{}] {}: {}",
                            comment.created_at.format("%Y-%m-%d %H:%M"),
                            comment.actor.as_deref().unwrap_or("anonymous"),
                            comment.body
                        );
                    }
                }
            }
        },
        Commands::Activity(activity_cmd) => match activity_cmd {
            ActivityCommands::Ticket { id, json } => {
                let entries = executor.list_activity_for_ticket(&id)?;
                if json {
                    print_json(&entries)?;
                } else {
                    for entry in entries {
                        println!(
                            "[{}] {} {}: {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M"),
                            entry.actor.as_deref().unwrap_or("anonymous"),
                            entry.kind,
                            entry.description
                        );
                    }
                }
            }
            ActivityCommands::Board { id, json } => {
                let entries = executor.list_activity_for_board(&id)?;
                if json {
                    print_json(&entries)?;
                } else {
                    for entry in entries {
                        println!(
                            "[{}] {} {} {}: {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M"),
                            entry.ticket_id,
                            entry.actor.as_deref().unwrap_or("anonymous"),
                            entry.kind,
                            entry.description
                        );
                    }
                }
            }
        },
    }

    Ok(())
}
