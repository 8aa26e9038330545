//! Command-line interface for taskflow
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule. Every invocation
//! is one session: the board is seeded, the command runs against it, and the
//! result is rendered.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::author;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, EventDestination, EventKind, EventSink};
use crate::roster::RosterStore;
use crate::seed;
use crate::store::TaskStore;

mod board;
mod roster;
mod task;

/// taskflow - task board in your terminal
///
/// Renders a dashboard of tasks grouped by status and applies
/// create/edit/delete/comment mutations to an in-memory session board.
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./.taskflow.toml)
    #[arg(long, global = true, env = "TASKFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Author identity for comments and roster changes
    #[arg(long, global = true, env = "TASKFLOW_AUTHOR")]
    pub author: Option<String>,

    /// Emit mutation events as JSON lines ("-" for stdout, or a file path)
    #[arg(long, global = true)]
    pub events: Option<String>,

    /// Start from an empty board instead of the sample data
    #[arg(long, global = true)]
    pub empty: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dashboard: status overview plus the task list
    Board {
        /// Filter the list by status: todo, inprogress, review, completed, blocked, or all
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive search across titles, descriptions, and tags
        #[arg(long)]
        search: Option<String>,
    },

    /// List tasks with optional status and search filters
    List {
        /// Filter by status: todo, inprogress, review, completed, blocked, or all
        #[arg(long, default_value = "all")]
        status: String,

        /// Case-insensitive search across titles, descriptions, and tags
        #[arg(long)]
        search: Option<String>,
    },

    /// Show per-status counts and percentages
    Stats,

    /// Show one task with its comments
    Show {
        /// Task id or a unique title fragment
        task: String,
    },

    /// Create a task
    New {
        /// Task title
        title: String,

        /// Task description
        #[arg(long)]
        description: Option<String>,

        /// Initial status (default: config tasks.default_status)
        #[arg(long)]
        status: Option<String>,

        /// Priority: low, medium, high (default: config tasks.default_priority)
        #[arg(long)]
        priority: Option<String>,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,

        /// Comma-separated tag list
        #[arg(long)]
        tags: Option<String>,

        /// Assignee name
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Edit a task (full-record replace; untouched fields are carried over)
    Edit {
        /// Task id or a unique title fragment
        task: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,

        /// New due date as YYYY-MM-DD
        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Clear the due date
        #[arg(long)]
        no_due: bool,

        /// Replacement comma-separated tag list
        #[arg(long)]
        tags: Option<String>,

        /// New assignee (empty string clears it)
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task id or a unique title fragment
        task: String,
    },

    /// Add a comment to a task
    Comment {
        /// Task id or a unique title fragment
        task: String,

        /// Comment text
        text: String,
    },

    /// User, group, and role administration
    #[command(subcommand)]
    Roster(RosterCommands),
}

/// Roster subcommands
#[derive(Subcommand, Debug)]
pub enum RosterCommands {
    /// List users with role, status, and group membership
    Users,

    /// List groups with their members
    Groups,

    /// Create a user
    NewUser {
        /// Email address
        email: String,

        /// First name
        #[arg(long)]
        first: String,

        /// Last name
        #[arg(long)]
        last: String,

        /// Role: super_user, admin, manager, executive, user
        #[arg(long, default_value = "user")]
        role: String,

        /// Create the user as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Create a group
    NewGroup {
        /// Group name
        name: String,

        /// Group description
        #[arg(long)]
        description: Option<String>,

        /// Member references (user id or email); may be repeated
        #[arg(long = "member")]
        members: Vec<String>,
    },

    /// Activate or deactivate a user
    SetActive {
        /// User id or email
        user: String,

        /// Deactivate instead of activate
        #[arg(long)]
        off: bool,
    },

    /// Delete a user
    RmUser {
        /// User id or email
        user: String,
    },

    /// Delete a group
    RmGroup {
        /// Group id or name
        group: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let common = CommonOptions {
            config: self.config,
            author: self.author,
            events: self.events,
            empty: self.empty,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Board { status, search } => {
                board::run_board(board::BoardOptions { status, search, common })
            }
            Commands::List { status, search } => {
                task::run_list(task::ListOptions { status, search, common })
            }
            Commands::Stats => task::run_stats(task::StatsOptions { common }),
            Commands::Show { task } => task::run_show(task::ShowOptions {
                reference: task,
                common,
            }),
            Commands::New {
                title,
                description,
                status,
                priority,
                due,
                tags,
                assignee,
            } => task::run_new(task::NewOptions {
                title,
                description,
                status,
                priority,
                due,
                tags,
                assignee,
                common,
            }),
            Commands::Edit {
                task,
                title,
                description,
                status,
                priority,
                due,
                no_due,
                tags,
                assignee,
            } => task::run_edit(task::EditOptions {
                reference: task,
                title,
                description,
                status,
                priority,
                due,
                no_due,
                tags,
                assignee,
                common,
            }),
            Commands::Delete { task } => task::run_delete(task::DeleteOptions {
                reference: task,
                common,
            }),
            Commands::Comment { task, text } => task::run_comment(task::CommentOptions {
                reference: task,
                text,
                common,
            }),
            Commands::Roster(cmd) => match cmd {
                RosterCommands::Users => roster::run_users(roster::UsersOptions { common }),
                RosterCommands::Groups => roster::run_groups(roster::GroupsOptions { common }),
                RosterCommands::NewUser {
                    email,
                    first,
                    last,
                    role,
                    inactive,
                } => roster::run_new_user(roster::NewUserOptions {
                    email,
                    first,
                    last,
                    role,
                    inactive,
                    common,
                }),
                RosterCommands::NewGroup {
                    name,
                    description,
                    members,
                } => roster::run_new_group(roster::NewGroupOptions {
                    name,
                    description,
                    members,
                    common,
                }),
                RosterCommands::SetActive { user, off } => {
                    roster::run_set_active(roster::SetActiveOptions {
                        reference: user,
                        active: !off,
                        common,
                    })
                }
                RosterCommands::RmUser { user } => roster::run_rm_user(roster::RmUserOptions {
                    reference: user,
                    common,
                }),
                RosterCommands::RmGroup { group } => {
                    roster::run_rm_group(roster::RmGroupOptions {
                        reference: group,
                        common,
                    })
                }
            },
        }
    }
}

/// Global flags shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct CommonOptions {
    pub config: Option<PathBuf>,
    pub author: Option<String>,
    pub events: Option<String>,
    pub empty: bool,
    pub json: bool,
    pub quiet: bool,
}

impl CommonOptions {
    /// Output options, with JSON suppressed while events stream to stdout.
    pub(crate) fn output(&self, events_to_stdout: bool) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json && !events_to_stdout,
            quiet: self.quiet || events_to_stdout,
        }
    }
}

/// One board session: effective config, seeded store, resolved author.
pub(crate) struct BoardSession {
    pub config: Config,
    pub store: TaskStore,
    pub author: String,
}

pub(crate) fn load_board_session(common: &CommonOptions) -> Result<BoardSession> {
    let config = Config::resolve(common.config.as_ref())?;
    let author = author::resolve_author(&config, common.author.as_deref());
    let store = if !common.empty && config.board.seed {
        seed::sample_board()?
    } else {
        TaskStore::new()
    };
    tracing::debug!(tasks = store.len(), author = %author, "board session loaded");
    Ok(BoardSession {
        config,
        store,
        author,
    })
}

/// One roster session, seeded the same way as the board.
pub(crate) struct RosterSession {
    pub roster: RosterStore,
    pub author: String,
}

pub(crate) fn load_roster_session(common: &CommonOptions) -> Result<RosterSession> {
    let config = Config::resolve(common.config.as_ref())?;
    let author = author::resolve_author(&config, common.author.as_deref());
    let roster = if !common.empty && config.board.seed {
        seed::sample_roster()?
    } else {
        RosterStore::new()
    };
    tracing::debug!(users = roster.users().len(), "roster session loaded");
    Ok(RosterSession { roster, author })
}

/// Open the configured event sink. Returns the sink (if any) and whether it
/// writes to stdout, which suppresses the JSON envelope.
pub(crate) fn open_event_sink(raw: Option<&str>) -> Result<(Option<EventSink>, bool)> {
    match EventDestination::parse(raw) {
        Some(destination) => {
            let to_stdout = matches!(destination, EventDestination::Stdout);
            Ok((Some(destination.open()?), to_stdout))
        }
        None => Ok((None, false)),
    }
}

/// Emit one mutation event, turning sink failures into a warning rather than
/// failing the mutation that already happened.
pub(crate) fn emit_event(
    sink: &mut Option<EventSink>,
    kind: EventKind,
    author: &str,
    data: serde_json::Value,
) -> Option<String> {
    let sink = sink.as_mut()?;
    let event = match Event::new(kind, Some(author.to_string())).with_data(data) {
        Ok(event) => event,
        Err(err) => return Some(format!("event payload error: {err}")),
    };
    match sink.emit(&event) {
        Ok(()) => None,
        Err(err) => Some(format!("event emit error: {err}")),
    }
}
