//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: main dispatch logic (called by `main.rs`)
//! - `init_logging()`: `tracing-subscriber` on stderr, filtered by `TANGO_LOG`
//! - `handle_*()`: per-command handlers that call the API and print the result

use super::render::{print_config, print_entry_list, print_messages};
use super::setup::{Cli, Commands, FieldArgs};
use clap::Parser;
use tango::api::{ConfigAction, EntryDraft, EntryUpdate, VocabApi};
use tango::error::{Result, TangoError};
use tango::init::{initialize, TangoContext};
use tango::model::SearchType;
use tango::store::fs::FileStore;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TANGO_LOG=debug`.
const LOG_ENV: &str = "TANGO_LOG";

struct AppContext {
    api: VocabApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let TangoContext { api } = initialize(cli.data_dir.as_deref())?;
    let mut ctx = AppContext { api };

    match cli.command {
        Some(Commands::List { query, search_type }) => handle_list(&ctx, query, search_type),
        Some(Commands::Search { term, search_type }) => handle_search(&ctx, term, search_type),
        Some(Commands::Add { fields, no_convert }) => handle_add(&mut ctx, fields, no_convert),
        Some(Commands::Edit {
            selector,
            fields,
            no_convert,
        }) => handle_edit(&mut ctx, &selector, fields, no_convert),
        Some(Commands::Delete { selector }) => handle_delete(&mut ctx, &selector),
        Some(Commands::Export { output }) => handle_export(&ctx, output),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::FillReadings) => handle_fill_readings(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, None),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_search_type(raw: Option<String>) -> Option<SearchType> {
    let search_type = SearchType::from(raw?);
    if let SearchType::Unknown(other) = &search_type {
        eprintln!(
            "Warning: unknown search type '{}', nothing will match (use romaji, hiragana or vietnamese)",
            other
        );
    }
    Some(search_type)
}

fn handle_list(ctx: &AppContext, query: Option<String>, search_type: Option<String>) -> Result<()> {
    let result = match query {
        Some(q) => ctx.api.search(&q, parse_search_type(search_type))?,
        None => ctx.api.list_entries()?,
    };
    print_entry_list(&result.listed_entries, result.total);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: Vec<String>, search_type: Option<String>) -> Result<()> {
    let query = term.join(" ");
    let result = ctx.api.search(&query, parse_search_type(search_type))?;
    print_entry_list(&result.listed_entries, result.total);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: FieldArgs, no_convert: bool) -> Result<()> {
    let draft = EntryDraft::new(
        fields.kanji.unwrap_or_default(),
        fields.hiragana.unwrap_or_default(),
        fields.romaji.unwrap_or_default(),
        fields.vietnamese.unwrap_or_default(),
    );
    let result = ctx.api.add_entry(draft, !no_convert)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: &str,
    fields: FieldArgs,
    no_convert: bool,
) -> Result<()> {
    let update = EntryUpdate {
        kanji: fields.kanji,
        hiragana: fields.hiragana,
        romaji: fields.romaji,
        vietnamese: fields.vietnamese,
    };
    if update.is_empty() {
        return Err(TangoError::Api(
            "Nothing to change: pass --kanji, --hiragana, --romaji or --vietnamese".to_string(),
        ));
    }
    let result = ctx.api.update_entry(selector, &update, !no_convert)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.delete_entry(selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<std::path::PathBuf>) -> Result<()> {
    let dir = match output {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(TangoError::Io)?,
    };
    let result = ctx.api.export(&dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_fill_readings(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.fill_readings()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
