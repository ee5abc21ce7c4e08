use crate::domain::models::{Session, User};
use crate::input;
use crate::services::output::print_success;
use crate::services::storage::{audit, MovieStore};
use std::io::BufRead;
use std::path::Path;

/// Session-start login. Users are created on first login; an EOF before a
/// name was given means the session never starts (clean quit).
pub fn login(
    store: &mut dyn MovieStore,
    input: &mut dyn BufRead,
    preselected: Option<&str>,
) -> anyhow::Result<Option<User>> {
    if let Some(name) = preselected {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("--user must not be empty");
        }
        return Ok(Some(store.ensure_user(name)?));
    }

    let known = store.users()?;
    if !known.is_empty() {
        let names: Vec<&str> = known.iter().map(|u| u.username.as_str()).collect();
        println!("Known users: {}", names.join(", "));
    }
    match input::read_nonempty(input, "Log in as:") {
        Ok(name) => Ok(Some(store.ensure_user(&name)?)),
        Err(err) if err.is::<input::Eof>() => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn handle_switch_user(
    session: &mut Session,
    store: &mut dyn MovieStore,
    data_dir: &Path,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let name = input::read_nonempty(input, "Switch to user:")?;
    let user = store.ensure_user(&name)?;
    let movies = store.load(user.id)?;
    audit(
        data_dir,
        "switch_user",
        serde_json::json!({"user": user.username}),
    );
    print_success(&format!(
        "Active user is now {} ({} movie(s)).",
        user.username,
        movies.len()
    ));
    session.user = user;
    session.movies = movies;
    Ok(())
}
