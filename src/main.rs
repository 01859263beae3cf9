#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use command::run_command;
use log::LevelFilter;

mod branch;
mod cli;
mod command;
mod config;
mod console;
mod ctx;
mod error;
mod git;
mod print;
mod remote;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    match run_command(&cli).await {
        Ok(status) => ExitCode::from(u8::try_from(status).unwrap_or(1)),
        Err(e) => {
            eprintln!("Failed with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
