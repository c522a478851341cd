//! Run a child process with vault entries in its environment.
//!
//! Entries are handed to `Command::envs`; the parent's own environment
//! is never modified.

use std::process::Command;

use crate::errors::{MumsError, Result};

/// Build the child command.
///
/// Vault entries override inherited variables of the same name.  With
/// `clean_env` the child sees only the vault entries.
pub fn build_command(
    command: &[String],
    env: &[(String, String)],
    clean_env: bool,
) -> Result<Command> {
    let (program, args) = command.split_first().ok_or(MumsError::NoCommandSpecified)?;

    let mut cmd = Command::new(program);
    cmd.args(args);

    if clean_env {
        cmd.env_clear();
    }

    cmd.envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Ok(cmd)
}

/// Spawn the command, wait for it and forward its exit status.
pub fn run(command: &[String], env: &[(String, String)], clean_env: bool) -> Result<()> {
    let status = build_command(command, env, clean_env)?
        .status()
        .map_err(|e| MumsError::CommandFailed(format!("failed to start '{}': {e}", command[0])))?;

    // Forward the child's exit code.
    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(MumsError::ChildProcessFailed(code)),
        None => Err(MumsError::CommandFailed(
            "child process terminated by signal".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn pairs() -> Vec<(String, String)> {
        vec![("DATABASE_URL".into(), "postgres://u:p@h:5432/db".into())]
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            build_command(&[], &pairs(), false),
            Err(MumsError::NoCommandSpecified)
        ));
    }

    #[test]
    fn entries_are_set_on_the_command() {
        let cmd = build_command(&["printenv".into()], &pairs(), false).unwrap();
        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(
            envs,
            vec![(
                OsStr::new("DATABASE_URL"),
                Some(OsStr::new("postgres://u:p@h:5432/db"))
            )]
        );
    }

    #[test]
    fn program_and_args_are_split() {
        let cmd = build_command(&["echo".into(), "a".into(), "b".into()], &[], false).unwrap();
        assert_eq!(cmd.get_program(), "echo");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["a", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_forwarded() {
        let ok = run(&["true".into()], &[], false);
        assert!(ok.is_ok());

        let failed = run(&["sh".into(), "-c".into(), "exit 3".into()], &[], false);
        assert!(matches!(failed, Err(MumsError::ChildProcessFailed(3))));
    }

    #[test]
    fn missing_program_is_a_command_failure() {
        let result = run(&["mums-definitely-not-a-program".into()], &[], false);
        assert!(matches!(result, Err(MumsError::CommandFailed(_))));
    }
}
