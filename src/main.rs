// Rust TaskGrid
// Command-line host for the task grid engine

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Cli::parse();
    let context = commands::Context::load(args.config, args.db, args.notify)?;
    log::info!("Using database {}", context.database_path.display());

    let command = args.command.unwrap_or(cli::Command::Show {
        month: None,
        categories: Vec::new(),
        weeks: None,
        search: None,
    });
    match command {
        cli::Command::Show {
            month,
            categories,
            weeks,
            search,
        } => commands::show(&context, month, categories, weeks, search),
        cli::Command::List => commands::list(&context),
        cli::Command::Add {
            name,
            start,
            end,
            category,
        } => commands::add(&context, name, start, end, category),
        cli::Command::Move { id, days } => commands::move_task(&context, id, days),
        cli::Command::Remove { id } => commands::remove(&context, id),
        cli::Command::Export { path } => commands::export(&context, &path),
        cli::Command::Import { path } => commands::import(&context, &path),
    }
}
