use std::process::ExitCode;

use clap::Parser;

mod client;
mod commands;
mod printer;

use commands::Command;
use filedock_runtime::logging;
use filedock_runtime::session::SessionStore;

#[derive(Debug, Parser)]
#[command(name = "filedock", version, about = "Native file access for desktop front ends")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();

    let store = SessionStore::new();
    let mut session = store.load();

    match cli.command {
        Command::Pick(args) => commands::pick::run(args),
        Command::Scan(args) => commands::scan::run(args),
        Command::Info(args) => commands::info::run_info(args),
        Command::Stat(args) => commands::info::run_stat(args),
        Command::Read(args) => commands::read::run(args),
        Command::Session(args) => commands::session::run(args, &store, &mut session),
        Command::Ping(args) => commands::ping::run(args),
    }
}
