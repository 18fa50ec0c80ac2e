//! Command line parsing
//!
//! Secrets never travel through argv; commands that need one read it from
//! stdin.

use credential::Operation;

pub const USAGE: &str = "\
usage: credctl <command>

commands:
  provision <username> <role>      create a credential (secret on stdin)
  verify <username>                check a secret (on stdin), print the identity
  authorize <username> <operation> verify, then check the access policy
  revoke <username>                delete a credential";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Provision { username: String, role: String },
    Verify { username: String },
    Authorize { username: String, operation: Operation },
    Revoke { username: String },
}

impl Command {
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["provision", username, role] => Ok(Command::Provision {
                username: username.to_string(),
                role: role.to_string(),
            }),
            ["verify", username] => Ok(Command::Verify {
                username: username.to_string(),
            }),
            ["authorize", username, operation] => Ok(Command::Authorize {
                username: username.to_string(),
                operation: operation.parse().map_err(|e| format!("{e}"))?,
            }),
            ["revoke", username] => Ok(Command::Revoke {
                username: username.to_string(),
            }),
            [] => Err("missing command".to_string()),
            [other, ..] => Err(format!("unknown command or arguments: '{other}'")),
        }
    }

    /// Whether the command reads a secret from stdin
    pub fn needs_secret(&self) -> bool {
        !matches!(self, Command::Revoke { .. })
    }

    /// Whether the command only makes sense against records written by an
    /// earlier run
    pub fn needs_database(&self) -> bool {
        !matches!(self, Command::Provision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        Command::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse(&["provision", "alice", "ADMIN"]),
            Ok(Command::Provision {
                username: "alice".into(),
                role: "ADMIN".into()
            })
        );
        assert_eq!(
            parse(&["verify", "alice"]),
            Ok(Command::Verify {
                username: "alice".into()
            })
        );
        assert_eq!(
            parse(&["authorize", "alice", "loans"]),
            Ok(Command::Authorize {
                username: "alice".into(),
                operation: Operation::ViewLoans
            })
        );
        assert_eq!(
            parse(&["revoke", "alice"]),
            Ok(Command::Revoke {
                username: "alice".into()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["verify"]).is_err());
        assert!(parse(&["verify", "alice", "pw123"]).is_err());
        assert!(parse(&["authorize", "alice", "transfer"]).is_err());
        assert!(parse(&["login", "alice"]).is_err());
    }

    #[test]
    fn test_needs_database() {
        assert!(!parse(&["provision", "alice", "USER"]).unwrap().needs_database());
        assert!(parse(&["verify", "alice"]).unwrap().needs_database());
        assert!(parse(&["authorize", "alice", "loans"]).unwrap().needs_database());
        assert!(parse(&["revoke", "alice"]).unwrap().needs_database());
    }

    #[test]
    fn test_needs_secret() {
        assert!(parse(&["verify", "alice"]).unwrap().needs_secret());
        assert!(!parse(&["revoke", "alice"]).unwrap().needs_secret());
    }
}
