//! The main menu: a static routing table from a bounded numeric choice to
//! an enumerated command, and the loop that drives it. The dispatcher holds
//! no state of its own; everything a handler needs arrives as an argument.

use crate::commands::{catalog, users};
use crate::config::Config;
use crate::domain::models::Session;
use crate::input;
use crate::services::fetch::OmdbClient;
use crate::services::output::print_title;
use crate::services::storage::MovieStore;
use owo_colors::OwoColorize;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Quit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    Sort,
    Histogram,
    Filter,
    Website,
    SwitchUser,
}

pub const MENU: [(MenuCommand, &str); 13] = [
    (MenuCommand::Quit, "Quit"),
    (MenuCommand::List, "List movies"),
    (MenuCommand::Add, "Add movie"),
    (MenuCommand::Delete, "Delete movie"),
    (MenuCommand::Update, "Update movie"),
    (MenuCommand::Stats, "Statistics"),
    (MenuCommand::Random, "Random movie"),
    (MenuCommand::Search, "Search movies"),
    (MenuCommand::Sort, "Sort movies"),
    (MenuCommand::Histogram, "Create histogram chart"),
    (MenuCommand::Filter, "Filter by rating and year"),
    (MenuCommand::Website, "Export website"),
    (MenuCommand::SwitchUser, "Switch user"),
];

fn show_menu() {
    print_title("Menu");
    for (index, (_, label)) in MENU.iter().enumerate() {
        println!("{} - {}", index, label.blue());
    }
    println!();
}

fn dispatch(
    command: MenuCommand,
    session: &mut Session,
    store: &mut dyn MovieStore,
    cfg: &Config,
    omdb: Option<&OmdbClient>,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    match command {
        // Quit is handled by the loop before dispatch.
        MenuCommand::Quit => Ok(()),
        MenuCommand::List => catalog::handle_list(session),
        MenuCommand::Add => catalog::handle_add(session, store, cfg, omdb, input),
        MenuCommand::Delete => catalog::handle_delete(session, store, cfg, input),
        MenuCommand::Update => catalog::handle_update(session, store, cfg, input),
        MenuCommand::Stats => catalog::handle_stats(session),
        MenuCommand::Random => catalog::handle_random(session),
        MenuCommand::Search => catalog::handle_search(session, input),
        MenuCommand::Sort => catalog::handle_sort(session, input),
        MenuCommand::Histogram => catalog::handle_histogram(session, input),
        MenuCommand::Filter => catalog::handle_filter(session, input),
        MenuCommand::Website => catalog::handle_website(session, cfg),
        MenuCommand::SwitchUser => {
            users::handle_switch_user(session, store, &cfg.data_dir, input)
        }
    }
}

/// Runs until the user picks Quit or the input stream closes. Recoverable
/// conditions never escape the handlers; an error that reaches this loop is
/// storage or render I/O and aborts the session.
pub fn run(
    session: &mut Session,
    store: &mut dyn MovieStore,
    cfg: &Config,
    omdb: Option<&OmdbClient>,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let max = MENU.len() - 1;
    let prompt = format!("Enter command number (0-{}):", max);
    loop {
        show_menu();
        let choice = match input::read_in_range::<usize>(input, &prompt, 0, max, false) {
            Ok(Some(choice)) => choice,
            Ok(None) => continue,
            Err(err) if err.is::<input::Eof>() => break,
            Err(err) => return Err(err),
        };
        let command = MENU[choice].0;
        if command == MenuCommand::Quit {
            break;
        }
        if let Err(err) = dispatch(command, session, store, cfg, omdb, input) {
            if err.is::<input::Eof>() {
                break;
            }
            return Err(err);
        }
    }
    Ok(())
}
