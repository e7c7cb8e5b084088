//! Command line interface.
//!
//! Without a subcommand the interactive board starts. Subcommands run one
//! board operation against the same durable slot and exit.

use crate::board::{
    parse_tags, Board, Confirm, FilterSelection, Lane, Priority, PrioritySelector, Removal, Task,
    TaskFields,
};
use crate::drag::DragSession;
use crate::error::{AppError, AppResult};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::*;
use std::io::{self, BufRead, Write};

/// Build the argument parser.
///
pub fn build_cli() -> App<'static, 'static> {
    let priority = Arg::with_name("priority")
        .long("priority")
        .short("p")
        .takes_value(true)
        .value_name("PRIORITY")
        .help("low, medium or high");
    let filter_args = [
        Arg::with_name("search")
            .long("search")
            .short("s")
            .takes_value(true)
            .value_name("TEXT")
            .help("Only tasks whose title or a tag contains TEXT"),
        Arg::with_name("priority")
            .long("priority")
            .short("p")
            .takes_value(true)
            .value_name("PRIORITY")
            .help("all, low, medium or high"),
    ];
    let field_args = [
        Arg::with_name("desc")
            .long("desc")
            .short("d")
            .takes_value(true)
            .value_name("TEXT")
            .help("Description"),
        priority,
        Arg::with_name("tags")
            .long("tags")
            .short("t")
            .takes_value(true)
            .value_name("TAGS")
            .help("Comma separated tags"),
        Arg::with_name("due")
            .long("due")
            .takes_value(true)
            .value_name("DATE")
            .help("Due date, free form"),
    ];
    let yes = Arg::with_name("yes")
        .long("yes")
        .short("y")
        .help("Do not ask for confirmation");

    App::new("taskboard")
        .version(crate_version!())
        .about("A task board with three lanes: todo, in progress and done")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory holding config.yml"),
        )
        .arg(
            Arg::with_name("data")
                .long("data")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory holding the board, overrides the configuration"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .help("Print log messages to stderr"),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Print the visible tasks per lane")
                .args(&filter_args),
        )
        .subcommand(
            SubCommand::with_name("add")
                .about("Create a task in the todo lane")
                .arg(Arg::with_name("title").required(true).value_name("TITLE"))
                .args(&field_args),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("Change the fields of a task, keeping the ones not given")
                .arg(Arg::with_name("id").required(true).value_name("ID"))
                .arg(
                    Arg::with_name("title")
                        .long("title")
                        .takes_value(true)
                        .value_name("TITLE"),
                )
                .args(&field_args),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Delete a task")
                .arg(Arg::with_name("id").required(true).value_name("ID"))
                .arg(yes.clone()),
        )
        .subcommand(
            SubCommand::with_name("clear-done")
                .about("Delete every completed task")
                .arg(yes),
        )
        .subcommand(
            SubCommand::with_name("move")
                .about("Move a task to a lane and position among the visible tasks")
                .arg(Arg::with_name("id").required(true).value_name("ID"))
                .arg(Arg::with_name("lane").required(true).value_name("LANE"))
                .arg(
                    Arg::with_name("position")
                        .long("position")
                        .short("n")
                        .takes_value(true)
                        .value_name("N")
                        .help("Zero based position, defaults to the end of the lane"),
                )
                .args(&filter_args),
        )
        .subcommand(
            SubCommand::with_name("stats")
                .about("Print task counts")
                .arg(Arg::with_name("json").long("json").help("Print as JSON")),
        )
}

/// A parsed subcommand.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        selection: FilterSelection,
    },
    Add {
        fields: TaskFields,
    },
    Edit {
        id: String,
        changes: FieldChanges,
    },
    Delete {
        id: String,
        yes: bool,
    },
    ClearDone {
        yes: bool,
    },
    Move {
        id: String,
        lane: Lane,
        position: Option<usize>,
        selection: FilterSelection,
    },
    Stats {
        json: bool,
    },
}

/// Fields given on the command line for an edit. Absent ones keep their
/// current value.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub due: Option<String>,
}

impl FieldChanges {
    fn apply_to(self, mut fields: TaskFields) -> TaskFields {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = Some(description);
        }
        if let Some(priority) = self.priority {
            fields.priority = priority;
        }
        if let Some(tags) = self.tags {
            fields.tags = tags;
        }
        if let Some(due) = self.due {
            fields.due = Some(due);
        }
        fields.normalized()
    }
}

impl Command {
    /// Parse the subcommand, `None` when the interactive board was requested.
    ///
    pub fn from_matches(matches: &ArgMatches) -> AppResult<Option<Command>> {
        let command = match matches.subcommand() {
            ("list", Some(sub)) => Command::List {
                selection: selection(sub)?,
            },
            ("add", Some(sub)) => {
                let changes = changes(sub)?;
                let fields = changes.apply_to(TaskFields::new(
                    sub.value_of("title").unwrap_or_default(),
                ));
                Command::Add { fields }
            }
            ("edit", Some(sub)) => Command::Edit {
                id: required(sub, "id")?,
                changes: changes(sub)?,
            },
            ("delete", Some(sub)) => Command::Delete {
                id: required(sub, "id")?,
                yes: sub.is_present("yes"),
            },
            ("clear-done", Some(sub)) => Command::ClearDone {
                yes: sub.is_present("yes"),
            },
            ("move", Some(sub)) => Command::Move {
                id: required(sub, "id")?,
                lane: required(sub, "lane")?.parse()?,
                position: sub
                    .value_of("position")
                    .map(|p| {
                        p.parse::<usize>()
                            .map_err(|_| AppError::Usage(format!("invalid position '{}'", p)))
                    })
                    .transpose()?,
                selection: selection(sub)?,
            },
            ("stats", Some(sub)) => Command::Stats {
                json: sub.is_present("json"),
            },
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

fn required(matches: &ArgMatches, name: &str) -> AppResult<String> {
    matches
        .value_of(name)
        .map(str::to_string)
        .ok_or_else(|| AppError::Usage(format!("missing <{}>", name)))
}

fn selection(matches: &ArgMatches) -> AppResult<FilterSelection> {
    let mut selection = FilterSelection::new();
    if let Some(search) = matches.value_of("search") {
        selection = selection.with_search(search);
    }
    if let Some(priority) = matches.value_of("priority") {
        selection = selection.with_priority(priority.parse::<PrioritySelector>()?);
    }
    Ok(selection)
}

fn changes(matches: &ArgMatches) -> AppResult<FieldChanges> {
    Ok(FieldChanges {
        title: matches.value_of("title").map(str::to_string),
        description: matches.value_of("desc").map(str::to_string),
        priority: matches
            .value_of("priority")
            .map(str::parse::<Priority>)
            .transpose()?,
        tags: matches.value_of("tags").map(parse_tags),
        due: matches.value_of("due").map(str::to_string),
    })
}

/// Asks on stderr and reads the answer from stdin. Anything but `y` or `yes`
/// declines.
///
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

/// Run one command against the board, writing its report to `out`.
///
pub fn execute(
    board: &mut Board,
    command: Command,
    out: &mut dyn Write,
    confirm: &mut dyn Confirm,
) -> AppResult<()> {
    debug!("Executing {:?}", command);
    match command {
        Command::List { selection } => {
            let view = board.view(&selection);
            for lane in Lane::ALL {
                writeln!(out, "{} ({})", lane.label(), view.visible.count(lane))?;
                for task in view.visible.lane(lane) {
                    writeln!(out, "  {}", task_line(task))?;
                }
            }
        }
        Command::Add { fields } => {
            let task = board.create(fields)?;
            writeln!(out, "Created {}", task_line(&task))?;
        }
        Command::Edit { id, changes } => {
            let current = board
                .get(&id)
                .map(Task::fields)
                .ok_or_else(|| crate::board::BoardError::NotFound { id: id.clone() })?;
            let task = board.update(&id, changes.apply_to(current))?;
            writeln!(out, "Updated {}", task_line(&task))?;
        }
        Command::Delete { id, yes } => {
            let removal = if yes {
                board.delete(&id, &mut crate::board::Answer(true))?
            } else {
                board.delete(&id, confirm)?
            };
            report_removal(out, removal)?;
        }
        Command::ClearDone { yes } => {
            let removal = if yes {
                board.clear_completed(&mut crate::board::Answer(true))?
            } else {
                board.clear_completed(confirm)?
            };
            report_removal(out, removal)?;
        }
        Command::Move {
            id,
            lane,
            position,
            selection,
        } => {
            let layout = {
                let view = board.view(&selection);
                let mut drag = match DragSession::pick_up(&view.visible, &id) {
                    Some(drag) => drag,
                    None if !board.store().contains(&id) => {
                        return Err(crate::board::BoardError::NotFound { id }.into())
                    }
                    None => {
                        return Err(AppError::Usage(format!(
                            "task {} is hidden by the filter",
                            id
                        )))
                    }
                };
                drag.move_to(lane, position.unwrap_or(usize::MAX));
                drag.release()
            };
            board.apply_layout(&layout)?;
            let position = layout.position(&id).map(|(_, p)| p).unwrap_or(0);
            writeln!(out, "Moved {} to {} at position {}", id, lane, position)?;
        }
        Command::Stats { json } => {
            let stats = board.stats();
            if json {
                let text = serde_json::to_string(&stats).map_err(io::Error::from)?;
                writeln!(out, "{}", text)?;
            } else {
                writeln!(
                    out,
                    "total: {}\npending: {}\ncompleted: {}",
                    stats.total, stats.pending, stats.done
                )?;
            }
        }
    }
    Ok(())
}

fn report_removal(out: &mut dyn Write, removal: Removal) -> io::Result<()> {
    match removal {
        Removal::Removed(0) => writeln!(out, "Nothing to delete"),
        Removal::Removed(1) => writeln!(out, "Deleted 1 task"),
        Removal::Removed(n) => writeln!(out, "Deleted {} tasks", n),
        Removal::Declined => writeln!(out, "Cancelled"),
    }
}

fn task_line(task: &Task) -> String {
    let mut line = format!("{} [{}] {}", task.id, task.priority, task.title);
    for tag in &task.tags {
        line.push_str(&format!(" #{}", tag));
    }
    if let Some(due) = &task.due {
        line.push_str(&format!(" (due {})", due));
    }
    line
}
