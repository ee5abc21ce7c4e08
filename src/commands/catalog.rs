use crate::cli::DuplicatePolicy;
use crate::config::Config;
use crate::domain::models::{Movie, Session};
use crate::input;
use crate::services::analysis::{self, NumericAttribute, SortKey};
use crate::services::chart;
use crate::services::fetch::{MovieAttributes, OmdbClient};
use crate::services::output::{print_error, print_movie, print_movies, print_success, print_title};
use crate::services::storage::{audit, MovieStore, StoreError};
use crate::services::website;
use std::io::BufRead;
use std::path::Path;

pub fn handle_list(session: &Session) -> anyhow::Result<()> {
    if session.movies.is_empty() {
        print_error("No movies in the collection yet.");
        return Ok(());
    }
    print_title(&format!("Movies for {}", session.user.username));
    print_movies(session.movies.values());
    println!("{} movie(s) total", session.movies.len());
    Ok(())
}

pub fn handle_add(
    session: &mut Session,
    store: &mut dyn MovieStore,
    cfg: &Config,
    omdb: Option<&OmdbClient>,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let title = input::read_nonempty(input, "Movie title:")?;

    if session.movies.contains_key(&title) && cfg.on_duplicate == DuplicatePolicy::Confirm {
        let overwrite = input::confirm(
            input,
            &format!("'{}' already exists. Overwrite it? (y/n)", title),
        )?;
        if !overwrite {
            print_error("Add cancelled, collection unchanged.");
            return Ok(());
        }
    }

    let attributes = match lookup(omdb, &title) {
        Some(found) => found,
        None => manual_entry(input)?,
    };

    let movie = Movie {
        title: title.clone(),
        year: attributes.year,
        rating: attributes.rating,
        note: String::new(),
        poster_url: attributes.poster_url,
        imdb_id: attributes.imdb_id,
        country: attributes.country,
        favorite: false,
    };
    store.upsert(session.user.id, &movie)?;
    session.movies.insert(title.clone(), movie);
    audit(
        &cfg.data_dir,
        "add_movie",
        serde_json::json!({"user": session.user.username, "title": title}),
    );
    print_success(&format!(
        "Added '{}' ({} movie(s) in the collection).",
        title,
        session.movies.len()
    ));
    Ok(())
}

/// Enriched path: one lookup, no retries. Any failure is reported and the
/// add continues with manual entry.
fn lookup(omdb: Option<&OmdbClient>, title: &str) -> Option<MovieAttributes> {
    let client = omdb?;
    match client.fetch(title) {
        Ok(attributes) => {
            print_success(&format!(
                "Found '{}': rated {:.1}, released {}.",
                title, attributes.rating, attributes.year
            ));
            Some(attributes)
        }
        Err(err) => {
            print_error(&err.to_string());
            println!("Enter the details manually instead.");
            None
        }
    }
}

fn manual_entry(input: &mut dyn BufRead) -> anyhow::Result<MovieAttributes> {
    let rating = input::read_in_range(
        input,
        "Rating (1.0-10.0):",
        input::RATING_MIN,
        input::RATING_MAX,
        false,
    )?
    .unwrap_or(input::RATING_MIN);
    let year = input::read_in_range(
        input,
        "Release year:",
        input::FIRST_MOVIE_RELEASE,
        input::current_year(),
        false,
    )?
    .unwrap_or(input::FIRST_MOVIE_RELEASE);
    let poster = input::read_line(input, "Poster URL (optional):")?;
    Ok(MovieAttributes {
        rating,
        year,
        poster_url: if poster.is_empty() { None } else { Some(poster) },
        imdb_id: None,
        country: None,
    })
}

pub fn handle_delete(
    session: &mut Session,
    store: &mut dyn MovieStore,
    cfg: &Config,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let title = input::read_nonempty(input, "Title to delete:")?;
    match store.delete(session.user.id, &title) {
        Ok(()) => {
            session.movies.remove(&title);
            audit(
                &cfg.data_dir,
                "delete_movie",
                serde_json::json!({"user": session.user.username, "title": title}),
            );
            print_success(&format!("Deleted '{}'.", title));
        }
        Err(err @ StoreError::NotFound(_)) => print_error(&err.to_string()),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn handle_update(
    session: &mut Session,
    store: &mut dyn MovieStore,
    cfg: &Config,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    let title = input::read_nonempty(input, "Title to update:")?;
    let Some(existing) = session.movies.get(&title) else {
        print_error(&StoreError::NotFound(title).to_string());
        return Ok(());
    };
    let mut updated = existing.clone();

    if let Some(rating) = input::read_in_range(
        input,
        "New rating (1.0-10.0, blank keeps current):",
        input::RATING_MIN,
        input::RATING_MAX,
        true,
    )? {
        updated.rating = rating;
    }
    let note = input::read_line(input, "Note (blank keeps current):")?;
    if !note.is_empty() {
        updated.note = note;
    }
    match input::read_choice(input, "Favorite? (y/n, blank keeps current):", &["y", "n", ""])?
        .as_str()
    {
        "y" => updated.favorite = true,
        "n" => updated.favorite = false,
        _ => {}
    }

    store.upsert(session.user.id, &updated)?;
    audit(
        &cfg.data_dir,
        "update_movie",
        serde_json::json!({"user": session.user.username, "title": updated.title}),
    );
    print_success(&format!("Updated '{}'.", updated.title));
    session.movies.insert(updated.title.clone(), updated);
    Ok(())
}

pub fn handle_stats(session: &Session) -> anyhow::Result<()> {
    if session.movies.is_empty() {
        print_error("The collection has no movies to analyze.");
        return Ok(());
    }
    let average = analysis::average(&session.movies)?;
    let median = analysis::median(&session.movies)?;
    let best = analysis::top(&session.movies);
    let worst = analysis::bottom(&session.movies);

    print_title("Statistics");
    println!("average rating: {:.2}", average);
    println!("median rating: {:.2}", median);
    println!("best ({:.1}): {}", best[0].rating, titles(&best));
    println!("worst ({:.1}): {}", worst[0].rating, titles(&worst));
    Ok(())
}

fn titles(movies: &[&Movie]) -> String {
    movies
        .iter()
        .map(|m| m.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn handle_random(session: &Session) -> anyhow::Result<()> {
    match analysis::random_pick(&session.movies) {
        Some(movie) => {
            print_title("Random movie");
            print_movie(movie);
        }
        None => print_error("No movies to pick from."),
    }
    Ok(())
}

pub fn handle_search(session: &Session, input: &mut dyn BufRead) -> anyhow::Result<()> {
    let query = input::read_nonempty(input, "Search for:")?;
    let matches = analysis::search(&session.movies, &query);
    if matches.is_empty() {
        print_error(&format!("No titles matching '{}'.", query));
        return Ok(());
    }
    print_title("Search results");
    print_movies(matches);
    Ok(())
}

pub fn handle_sort(session: &Session, input: &mut dyn BufRead) -> anyhow::Result<()> {
    if session.movies.is_empty() {
        print_error("No movies to sort.");
        return Ok(());
    }
    let key = match input::read_choice(input, "Sort by (title/rating/year):", &["title", "rating", "year"])?
        .as_str()
    {
        "rating" => SortKey::Rating,
        "year" => SortKey::Year,
        _ => SortKey::Title,
    };
    let order = input::read_choice(
        input,
        "Highest first or last? (first/last):",
        &["first", "last"],
    )?;
    print_title("Sorted movies");
    print_movies(analysis::sorted_by(&session.movies, key, order == "first"));
    Ok(())
}

pub fn handle_histogram(session: &Session, input: &mut dyn BufRead) -> anyhow::Result<()> {
    if session.movies.is_empty() {
        print_error("No movies to chart.");
        return Ok(());
    }
    let attribute = match input::read_choice(
        input,
        "Attribute to visualize (rating/year):",
        &["rating", "year"],
    )?
    .as_str()
    {
        "year" => NumericAttribute::Year,
        _ => NumericAttribute::Rating,
    };
    let mut file_name = input::read_nonempty(input, "File name for the chart:")?;
    if !file_name.ends_with(".png") {
        file_name.push_str(".png");
    }
    let buckets = analysis::histogram(&session.movies, attribute)?;
    chart::render_histogram(&buckets, Path::new(&file_name))?;
    print_success(&format!("Chart saved to {}.", file_name));
    Ok(())
}

pub fn handle_filter(session: &Session, input: &mut dyn BufRead) -> anyhow::Result<()> {
    if session.movies.is_empty() {
        print_error("No movies to filter.");
        return Ok(());
    }
    let min_rating = input::read_in_range(
        input,
        "Minimum rating (blank for none):",
        input::RATING_MIN,
        input::RATING_MAX,
        true,
    )?
    .unwrap_or(input::RATING_MIN);
    let current = input::current_year();
    let start_year = input::read_in_range(
        input,
        "Start year (blank for none):",
        input::FIRST_MOVIE_RELEASE,
        current,
        true,
    )?
    .unwrap_or(input::FIRST_MOVIE_RELEASE);
    let end_year = input::read_in_range(
        input,
        "End year (blank for none):",
        input::FIRST_MOVIE_RELEASE,
        current,
        true,
    )?
    .unwrap_or(current);
    if start_year > end_year {
        print_error("Start year is after end year, nothing can match.");
        return Ok(());
    }

    let matches = analysis::filter_by(&session.movies, min_rating, start_year, end_year);
    if matches.is_empty() {
        print_error("No movies match those criteria.");
        return Ok(());
    }
    print_title("Filtered movies");
    print_movies(matches);
    Ok(())
}

pub fn handle_website(session: &Session, cfg: &Config) -> anyhow::Result<()> {
    let path = cfg.website_path();
    website::export(&path, &session.user.username, &session.movies)?;
    print_success(&format!("Website written to {}.", path.display()));
    Ok(())
}
