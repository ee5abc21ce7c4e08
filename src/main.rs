use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod input;
mod menu;
mod services;

use domain::models::Session;
use services::fetch::OmdbClient;
use services::output::print_title;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();
    let cfg = config::Config::load(&cli)?;
    log::debug!(
        "backend {:?}, data dir {}",
        cfg.backend,
        cfg.data_dir.display()
    );

    let mut store = services::storage::open_store(cfg.backend, &cfg.data_dir)?;
    let omdb = match &cfg.api {
        Some(api) => Some(OmdbClient::new(api)?),
        None => None,
    };

    print_title("cinelog");
    if omdb.is_none() {
        println!("No OMDB_API_URL/OMDB_API_KEY set; adds use manual entry.");
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let Some(user) = commands::users::login(store.as_mut(), &mut input, cli.user.as_deref())?
    else {
        return Ok(());
    };
    let movies = store.load(user.id)?;
    println!(
        "Logged in as {} ({} movie(s) loaded).",
        user.username,
        movies.len()
    );

    let mut session = Session::new(user, movies);
    menu::run(
        &mut session,
        store.as_mut(),
        &cfg,
        omdb.as_ref(),
        &mut input,
    )?;
    println!("Bye.");
    Ok(())
}
