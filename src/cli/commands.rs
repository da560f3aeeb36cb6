use chrono::NaiveDate;

use crate::cli::validate;
use crate::model::{Priority, TaskId};

/// A fully validated shell command, ready for dispatch.
///
/// Parsing resolves every ambiguity up front (`tag` and `assign` accept an
/// id or a name in their second slot), so dispatch is a plain match with no
/// re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        priority: Option<Priority>,
        deadline: Option<NaiveDate>,
    },
    AddList {
        name: String,
    },
    TagTask {
        id: TaskId,
        tag: String,
    },
    TagList {
        list: String,
        tag: String,
    },
    AssignToTask {
        child: TaskId,
        parent: TaskId,
    },
    AssignToList {
        id: TaskId,
        list: String,
    },
    Toggle {
        id: TaskId,
    },
    ChangeDate {
        id: TaskId,
        date: NaiveDate,
    },
    ChangePriority {
        id: TaskId,
        priority: Option<Priority>,
    },
    Delete {
        id: TaskId,
    },
    Restore {
        id: TaskId,
    },
    Show {
        id: Option<TaskId>,
    },
    Todo,
    Find {
        text: String,
    },
    TaggedWith {
        tag: String,
    },
    Upcoming {
        start: NaiveDate,
    },
    Before {
        end: NaiveDate,
    },
    Between {
        start: NaiveDate,
        end: NaiveDate,
    },
    ShowList {
        name: String,
    },
    Duplicates,
    Quit,
}

/// Why a command line failed to parse.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} expects at least {1} argument(s)")]
    MissingArguments(&'static str, usize),
    #[error("invalid task ID: {0}")]
    InvalidId(String),
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid priority: {0} (expected HI, MD or LO)")]
    InvalidPriority(String),
    #[error("invalid task name: {0}")]
    InvalidName(String),
    #[error("invalid tag: {0}")]
    InvalidTag(String),
    #[error("invalid list name: {0}")]
    InvalidListName(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Parse one non-blank input line into a command.
///
/// Tokens split on whitespace; surplus arguments beyond a command's arity
/// are ignored.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Err(CommandError::UnknownCommand(String::new()));
    };
    match keyword {
        "add" => parse_add(args),
        "add-list" => {
            require(args, "add-list", 1)?;
            Ok(Command::AddList {
                name: validate::parse_list_name(args[0])?.to_string(),
            })
        }
        "tag" => parse_tag(args),
        "assign" => parse_assign(args),
        "toggle" => {
            require(args, "toggle", 1)?;
            Ok(Command::Toggle {
                id: validate::parse_id(args[0])?,
            })
        }
        "change-date" => {
            require(args, "change-date", 2)?;
            Ok(Command::ChangeDate {
                id: validate::parse_id(args[0])?,
                date: validate::parse_date(args[1])?,
            })
        }
        "change-priority" => {
            require(args, "change-priority", 1)?;
            let priority = match args.get(1) {
                Some(token) => Some(validate::parse_priority(token)?),
                None => None,
            };
            Ok(Command::ChangePriority {
                id: validate::parse_id(args[0])?,
                priority,
            })
        }
        "delete" => {
            require(args, "delete", 1)?;
            Ok(Command::Delete {
                id: validate::parse_id(args[0])?,
            })
        }
        "restore" => {
            require(args, "restore", 1)?;
            Ok(Command::Restore {
                id: validate::parse_id(args[0])?,
            })
        }
        "show" => {
            let id = match args.first() {
                Some(token) => Some(validate::parse_id(token)?),
                None => None,
            };
            Ok(Command::Show { id })
        }
        "todo" => Ok(Command::Todo),
        "find" => {
            require(args, "find", 1)?;
            Ok(Command::Find {
                text: validate::parse_name(args[0])?.to_string(),
            })
        }
        "tagged-with" => {
            require(args, "tagged-with", 1)?;
            Ok(Command::TaggedWith {
                tag: validate::parse_tag(args[0])?.to_string(),
            })
        }
        "upcoming" => {
            require(args, "upcoming", 1)?;
            Ok(Command::Upcoming {
                start: validate::parse_date(args[0])?,
            })
        }
        "before" => {
            require(args, "before", 1)?;
            Ok(Command::Before {
                end: validate::parse_date(args[0])?,
            })
        }
        "between" => {
            require(args, "between", 2)?;
            Ok(Command::Between {
                start: validate::parse_date(args[0])?,
                end: validate::parse_date(args[1])?,
            })
        }
        "list" => {
            require(args, "list", 1)?;
            Ok(Command::ShowList {
                name: validate::parse_list_name(args[0])?.to_string(),
            })
        }
        "duplicates" => Ok(Command::Duplicates),
        "quit" => Ok(Command::Quit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn require(args: &[&str], command: &'static str, expected: usize) -> Result<(), CommandError> {
    if args.len() < expected {
        return Err(CommandError::MissingArguments(command, expected));
    }
    Ok(())
}

/// `add <name> [priority] [date]` — the trailing attributes are recognized
/// by shape and may come in either order.
fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    require(args, "add", 1)?;
    let name = validate::parse_name(args[0])?.to_string();
    let mut priority = None;
    let mut deadline = None;
    for token in &args[1..] {
        if let Ok(parsed) = validate::parse_priority(token) {
            priority = Some(parsed);
        } else if let Ok(parsed) = validate::parse_date(token) {
            deadline = Some(parsed);
        } else {
            return Err(CommandError::InvalidParameter((*token).to_string()));
        }
    }
    Ok(Command::Add {
        name,
        priority,
        deadline,
    })
}

/// `tag <id> <tag>` tags a task, `tag <list> <tag>` tags a list; the first
/// token's shape decides.
fn parse_tag(args: &[&str]) -> Result<Command, CommandError> {
    require(args, "tag", 2)?;
    let tag = validate::parse_tag(args[1])?.to_string();
    if validate::is_id_token(args[0]) {
        Ok(Command::TagTask {
            id: validate::parse_id(args[0])?,
            tag,
        })
    } else {
        Ok(Command::TagList {
            list: validate::parse_list_name(args[0])?.to_string(),
            tag,
        })
    }
}

/// `assign <child> <parent-id>` re-parents a task, `assign <task> <list>`
/// adds it to a list.
fn parse_assign(args: &[&str]) -> Result<Command, CommandError> {
    require(args, "assign", 2)?;
    let id = validate::parse_id(args[0])?;
    if validate::is_id_token(args[1]) {
        Ok(Command::AssignToTask {
            child: id,
            parent: validate::parse_id(args[1])?,
        })
    } else {
        Ok(Command::AssignToList {
            id,
            list: validate::parse_list_name(args[1])?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_with_name_only() {
        assert_eq!(
            parse_command("add Essay"),
            Ok(Command::Add {
                name: "Essay".to_string(),
                priority: None,
                deadline: None,
            })
        );
    }

    #[test]
    fn add_accepts_priority_and_date_in_either_order() {
        let expected = Ok(Command::Add {
            name: "Essay".to_string(),
            priority: Some(Priority::High),
            deadline: Some(date(2024, 5, 1)),
        });
        assert_eq!(parse_command("add Essay HI 2024-05-01"), expected);
        assert_eq!(parse_command("add Essay 2024-05-01 HI"), expected);
    }

    #[test]
    fn add_later_trailers_overwrite_earlier_ones() {
        assert_eq!(
            parse_command("add Essay HI LO 2024-05-01 2024-06-01"),
            Ok(Command::Add {
                name: "Essay".to_string(),
                priority: Some(Priority::Low),
                deadline: Some(date(2024, 6, 1)),
            })
        );
    }

    #[test]
    fn add_rejects_unrecognized_trailers() {
        assert_eq!(
            parse_command("add Essay tomorrow"),
            Err(CommandError::InvalidParameter("tomorrow".to_string()))
        );
    }

    #[test]
    fn tag_routes_on_first_token_shape() {
        assert_eq!(
            parse_command("tag 3 uni"),
            Ok(Command::TagTask {
                id: 3,
                tag: "uni".to_string()
            })
        );
        assert_eq!(
            parse_command("tag chores home"),
            Ok(Command::TagList {
                list: "chores".to_string(),
                tag: "home".to_string()
            })
        );
    }

    #[test]
    fn assign_routes_on_second_token_shape() {
        assert_eq!(
            parse_command("assign 2 1"),
            Ok(Command::AssignToTask { child: 2, parent: 1 })
        );
        assert_eq!(
            parse_command("assign 2 uni"),
            Ok(Command::AssignToList {
                id: 2,
                list: "uni".to_string()
            })
        );
    }

    #[test]
    fn show_takes_an_optional_id() {
        assert_eq!(parse_command("show"), Ok(Command::Show { id: None }));
        assert_eq!(parse_command("show 4"), Ok(Command::Show { id: Some(4) }));
        assert!(parse_command("show four").is_err());
    }

    #[test]
    fn change_priority_clears_without_a_token() {
        assert_eq!(
            parse_command("change-priority 2"),
            Ok(Command::ChangePriority {
                id: 2,
                priority: None
            })
        );
        assert_eq!(
            parse_command("change-priority 2 LO"),
            Ok(Command::ChangePriority {
                id: 2,
                priority: Some(Priority::Low)
            })
        );
    }

    #[test]
    fn date_window_commands() {
        assert_eq!(
            parse_command("upcoming 2024-05-01"),
            Ok(Command::Upcoming {
                start: date(2024, 5, 1)
            })
        );
        assert_eq!(
            parse_command("between 2024-05-01 2024-06-01"),
            Ok(Command::Between {
                start: date(2024, 5, 1),
                end: date(2024, 6, 1)
            })
        );
        assert_eq!(
            parse_command("before nope"),
            Err(CommandError::InvalidDate("nope".to_string()))
        );
    }

    #[test]
    fn zero_is_not_a_valid_id() {
        assert_eq!(
            parse_command("toggle 0"),
            Err(CommandError::InvalidId("0".to_string()))
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            parse_command("assign 2"),
            Err(CommandError::MissingArguments("assign", 2))
        );
        assert_eq!(
            parse_command("add"),
            Err(CommandError::MissingArguments("add", 1))
        );
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        assert_eq!(parse_command("todo now please"), Ok(Command::Todo));
        assert_eq!(
            parse_command("toggle 1 2"),
            Ok(Command::Toggle { id: 1 })
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(
            parse_command("frobnicate 1"),
            Err(CommandError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn quit_parses_bare() {
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }
}
