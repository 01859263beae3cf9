use std::{
    ffi::OsString,
    path::PathBuf,
    process::{Output, Stdio},
    time::Duration,
};

use log::debug;
use tokio::process::Command;

use crate::error::{Maybe, RemoveError};

/// Outcome of one git invocation. `status` is `None` when git was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit status to hand back to the shell.
    pub fn code(&self) -> i32 {
        self.status.unwrap_or(1)
    }
}

impl From<Output> for CommandResult {
    fn from(output: Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

pub trait Git {
    async fn run(&self, args: &[&str]) -> Maybe<CommandResult>;

    /// Like `run`, but gives up after `limit`. `Ok(None)` means the call timed out.
    async fn run_with_timeout(
        &self,
        args: &[&str],
        limit: Duration,
    ) -> Maybe<Option<CommandResult>>;
}

pub struct GitCli {
    program: OsString,
    dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    #[cfg(test)]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        command
    }
}

impl Git for GitCli {
    async fn run(&self, args: &[&str]) -> Maybe<CommandResult> {
        debug!("Running: git {}", args.join(" "));

        let output = self
            .command(args)
            .output()
            .await
            .map_err(|source| RemoveError::Command {
                args: args.join(" "),
                source,
            })?;
        let result = CommandResult::from(output);

        debug!("git {} exited with {:?}", args.join(" "), result.status);
        if !result.success() && !result.stderr.is_empty() {
            debug!("stderr: {}", result.stderr.trim_end());
        }

        Ok(result)
    }

    async fn run_with_timeout(
        &self,
        args: &[&str],
        limit: Duration,
    ) -> Maybe<Option<CommandResult>> {
        match tokio::time::timeout(limit, self.run(args)).await {
            Ok(result) => result.map(Some),
            Err(_) => {
                debug!("git {} timed out after {}s", args.join(" "), limit.as_secs());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
pub mod scripted {
    use std::{cell::RefCell, time::Duration};

    use super::{CommandResult, Git};
    use crate::error::Maybe;

    enum Reply {
        Done(CommandResult),
        Hang,
    }

    /// Answers git calls from a fixed script and records every call made.
    /// Any call missing from the script panics.
    #[derive(Default)]
    pub struct ScriptedGit {
        replies: Vec<(String, Reply)>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(mut self, args: &str, status: i32, stdout: &str, stderr: &str) -> Self {
            self.replies.push((
                args.to_string(),
                Reply::Done(CommandResult {
                    status: Some(status),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                }),
            ));
            self
        }

        pub fn hang(mut self, args: &str) -> Self {
            self.replies.push((args.to_string(), Reply::Hang));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn reply(&self, args: &[&str]) -> &Reply {
            let joined = args.join(" ");
            self.calls.borrow_mut().push(joined.clone());
            self.replies
                .iter()
                .find(|(expected, _)| *expected == joined)
                .map_or_else(
                    || panic!("unexpected git call: git {joined}"),
                    |(_, reply)| reply,
                )
        }
    }

    impl Git for ScriptedGit {
        async fn run(&self, args: &[&str]) -> Maybe<CommandResult> {
            match self.reply(args) {
                Reply::Done(result) => Ok(result.clone()),
                Reply::Hang => panic!("git {} would never finish", args.join(" ")),
            }
        }

        async fn run_with_timeout(
            &self,
            args: &[&str],
            _limit: Duration,
        ) -> Maybe<Option<CommandResult>> {
            match self.reply(args) {
                Reply::Done(result) => Ok(Some(result.clone())),
                Reply::Hang => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn code_passes_through_git_status() {
        let result = |status| CommandResult {
            status,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(result(Some(0)).code(), 0);
        assert_eq!(result(Some(128)).code(), 128);
        assert_eq!(result(None).code(), 1);
        assert!(!result(None).success());
    }

    #[tokio::test]
    async fn captures_output_of_the_program() {
        let git = GitCli::new("sh");
        let result = git.run(&["-c", "echo out; echo err >&2; exit 3"]).await.unwrap();
        assert_eq!(result.status, Some(3));
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn reports_a_missing_program_as_an_error() {
        let git = GitCli::new("rmb-definitely-not-a-real-git");
        let err = git.run(&["status"]).await.unwrap_err();
        assert!(err.downcast_ref::<RemoveError>().is_some());
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let git = GitCli::new("sh");
        let result = git
            .run_with_timeout(&["-c", "sleep 5"], Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
