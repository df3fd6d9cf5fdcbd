//! Command-line arguments.

use catan_board::{BoardSize, GenerationConfig};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("No command given")]
    Missing,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("'{0}' needs a value")]
    MissingValue(String),

    #[error("Invalid value '{value}' for {what}")]
    InvalidValue { what: &'static str, value: String },
}

pub const USAGE: &str = "Usage: catan-board <generate [classic|extension] [--no-same-resource] \
[--no-six-eight] [--no-two-twelve] [--no-same-number] [--seed N] [--max-attempts N] \
| show | start | end | roll [--seed N] | select N | manual on|off | reset>";

/// One invocation of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a new board with the given rules
    Generate {
        config: GenerationConfig,
        seed: Option<u64>,
    },
    /// Print the stored board
    Show,
    StartGame,
    EndGame,
    RollDice {
        seed: Option<u64>,
    },
    SelectNumber(u8),
    ManualDice(bool),
    /// Delete the stored game
    Reset,
}

impl Command {
    /// Parse from the arguments after the program name
    pub fn parse<I, S>(args: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let name = args.next().ok_or(CommandError::Missing)?;
        let rest: Vec<String> = args.collect();

        match name.as_str() {
            "generate" | "shuffle" => parse_generate(&rest),
            "show" => no_args(rest, Command::Show),
            "start" => no_args(rest, Command::StartGame),
            "end" => no_args(rest, Command::EndGame),
            "reset" => no_args(rest, Command::Reset),
            "roll" => {
                let mut seed = None;
                let mut iter = rest.into_iter();
                while let Some(arg) = iter.next() {
                    match arg.as_str() {
                        "--seed" => seed = Some(parse_value(&arg, iter.next(), "seed")?),
                        _ => return Err(CommandError::UnknownOption(arg)),
                    }
                }
                Ok(Command::RollDice { seed })
            }
            "select" => {
                let value = rest.first().cloned();
                let number = parse_value("select", value, "dice number")?;
                Ok(Command::SelectNumber(number))
            }
            "manual" => match rest.first().map(String::as_str) {
                Some("on") => Ok(Command::ManualDice(true)),
                Some("off") => Ok(Command::ManualDice(false)),
                Some(other) => Err(CommandError::InvalidValue {
                    what: "manual",
                    value: other.to_string(),
                }),
                None => Err(CommandError::MissingValue("manual".to_string())),
            },
            _ => Err(CommandError::Unknown(name)),
        }
    }
}

fn no_args(rest: Vec<String>, command: Command) -> Result<Command, CommandError> {
    match rest.into_iter().next() {
        Some(extra) => Err(CommandError::UnknownOption(extra)),
        None => Ok(command),
    }
}

fn parse_generate(args: &[String]) -> Result<Command, CommandError> {
    let mut config = GenerationConfig::classic();
    let mut seed = None;
    let mut iter = args.iter().cloned();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "classic" => config.board_size = BoardSize::Classic,
            "extension" => config.board_size = BoardSize::Extension,
            "--no-same-resource" => config.same_resource_can_touch = false,
            "--no-six-eight" => config.eight_six_can_touch = false,
            "--no-two-twelve" => config.two_twelve_can_touch = false,
            "--no-same-number" => config.same_number_can_touch = false,
            "--seed" => seed = Some(parse_value(&arg, iter.next(), "seed")?),
            "--max-attempts" => {
                config.max_number_attempts = parse_value(&arg, iter.next(), "max attempts")?
            }
            _ => return Err(CommandError::UnknownOption(arg)),
        }
    }

    Ok(Command::Generate { config, seed })
}

fn parse_value<T: std::str::FromStr>(
    flag: &str,
    value: Option<String>,
    what: &'static str,
) -> Result<T, CommandError> {
    let value = value.ok_or_else(|| CommandError::MissingValue(flag.to_string()))?;
    value
        .parse()
        .map_err(|_| CommandError::InvalidValue { what, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_defaults() {
        let command = Command::parse(["generate"]).unwrap();
        assert_eq!(
            command,
            Command::Generate {
                config: GenerationConfig::classic(),
                seed: None,
            }
        );
    }

    #[test]
    fn test_parse_generate_with_rules() {
        let command = Command::parse([
            "generate",
            "extension",
            "--no-six-eight",
            "--no-same-resource",
            "--seed",
            "17",
            "--max-attempts",
            "50",
        ])
        .unwrap();

        let expected = GenerationConfig::extension()
            .with_eight_six_can_touch(false)
            .with_same_resource_can_touch(false)
            .with_max_number_attempts(50);
        assert_eq!(
            command,
            Command::Generate {
                config: expected,
                seed: Some(17),
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse(Vec::<String>::new()), Err(CommandError::Missing));
        assert_eq!(
            Command::parse(["fly"]),
            Err(CommandError::Unknown("fly".to_string()))
        );
        assert_eq!(
            Command::parse(["generate", "--seed"]),
            Err(CommandError::MissingValue("--seed".to_string()))
        );
        assert_eq!(
            Command::parse(["select", "x"]),
            Err(CommandError::InvalidValue {
                what: "dice number",
                value: "x".to_string(),
            })
        );
        assert_eq!(
            Command::parse(["show", "extra"]),
            Err(CommandError::UnknownOption("extra".to_string()))
        );
    }

    #[test]
    fn test_parse_play_commands() {
        assert_eq!(Command::parse(["roll"]).unwrap(), Command::RollDice { seed: None });
        assert_eq!(
            Command::parse(["roll", "--seed", "3"]).unwrap(),
            Command::RollDice { seed: Some(3) }
        );
        assert_eq!(Command::parse(["select", "8"]).unwrap(), Command::SelectNumber(8));
        assert_eq!(Command::parse(["manual", "on"]).unwrap(), Command::ManualDice(true));
        assert_eq!(Command::parse(["start"]).unwrap(), Command::StartGame);
    }
}
