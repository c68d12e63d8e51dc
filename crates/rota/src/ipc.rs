use crate::candidate::{CandidateName, parse_names};
use std::fmt;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::str::FromStr;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/caretaker.sock";
const NAME_SEPARATOR: &str = ",";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(String),
}

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("Failed to connect to caretaker at {path}: {source}. Is caretaker running?")]
    Connect {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Spin,
    Reload,
    Show,
    Hide,
    Names,
}

/// One line of the control socket protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Spin,
    Reload,
    Show,
    Hide,
    /// Replaces the candidates; `names Alice,Bob Smith,Charlie`.
    Names(Vec<CandidateName>),
}

impl Command {
    fn verb(&self) -> Verb {
        match self {
            Self::Spin => Verb::Spin,
            Self::Reload => Verb::Reload,
            Self::Show => Verb::Show,
            Self::Hide => Verb::Hide,
            Self::Names(_) => Verb::Names,
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));
        let verb =
            Verb::from_str(head).map_err(|_| ParseCommandError::Unknown(head.to_string()))?;

        if verb != Verb::Names && !rest.is_empty() {
            return Err(ParseCommandError::UnexpectedArgument(
                verb.as_ref().to_string(),
            ));
        }

        Ok(match verb {
            Verb::Spin => Self::Spin,
            Verb::Reload => Self::Reload,
            Verb::Show => Self::Show,
            Verb::Hide => Self::Hide,
            Verb::Names => Self::Names(parse_names(rest.split(NAME_SEPARATOR))),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb().as_ref())?;
        if let Self::Names(names) = self {
            let joined: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
            write!(f, " {}", joined.join(NAME_SEPARATOR))?;
        }
        Ok(())
    }
}

/// Names containing the separator cannot be sent over the socket.
pub fn is_sendable_name(name: &str) -> bool {
    !name.contains(NAME_SEPARATOR) && !name.contains('\n')
}

pub fn send(command: &Command) -> Result<(), IpcError> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|source| IpcError::Connect {
        path: SOCKET_PATH.to_string(),
        source,
    })?;

    writeln!(stream, "{}", command)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("spin", Command::Spin),
            ("  SPIN ", Command::Spin),
            ("reload", Command::Reload),
            ("Show", Command::Show),
            ("hide", Command::Hide),
            ("names", Command::Names(Vec::new())),
            (
                "names Alice, Bob Smith ,,Alice",
                Command::Names(vec![
                    CandidateName::new("Alice"),
                    CandidateName::new("Bob Smith"),
                    CandidateName::new("Alice"),
                ]),
            ),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>().unwrap(), expected, "line {line:?}");
        }
    }

    #[test]
    fn test_command_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(ParseCommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            "spin now".parse::<Command>(),
            Err(ParseCommandError::UnexpectedArgument("spin".to_string()))
        );
    }

    #[test]
    fn test_command_display_parses_back() {
        let command = Command::Names(vec![
            CandidateName::new("Alice"),
            CandidateName::new("Bob Smith"),
        ]);
        assert_eq!(command.to_string(), "names Alice,Bob Smith");
        assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        assert_eq!(Command::Spin.to_string(), "spin");
    }

    #[test]
    fn test_sendable_names() {
        assert!(is_sendable_name("Bob Smith"));
        assert!(!is_sendable_name("Smith, Bob"));
    }
}
