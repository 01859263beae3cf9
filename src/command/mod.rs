use crate::{cli::Cli, config::Settings, ctx::init_ctx, error::Maybe};

use self::remove::remove_command;

mod remove;

/// Runs the command and returns the process exit status.
pub async fn run_command(cli: &Cli) -> Maybe<i32> {
    let settings = Settings::from_env()?;
    let ctx = init_ctx(settings);

    remove_command(&ctx, &cli.remove).await
}
