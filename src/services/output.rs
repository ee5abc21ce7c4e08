use crate::domain::models::Movie;
use owo_colors::OwoColorize;

pub fn print_title(text: &str) {
    println!();
    println!("{}", text.yellow().bold());
    println!("{}", "=".repeat(text.len()).yellow());
}

pub fn print_success(text: &str) {
    println!("{}", text.green());
}

pub fn print_error(text: &str) {
    println!("{}", text.red());
}

pub fn movie_row(movie: &Movie) -> String {
    let marker = if movie.favorite { " *" } else { "" };
    let note = if movie.note.is_empty() {
        String::new()
    } else {
        format!("  [{}]", movie.note)
    };
    format!(
        "{} ({}): {:.1}{}{}",
        movie.title, movie.year, movie.rating, marker, note
    )
}

pub fn print_movies<'a>(movies: impl IntoIterator<Item = &'a Movie>) {
    for movie in movies {
        println!("{}", movie_row(movie).cyan());
    }
}

pub fn print_movie(movie: &Movie) {
    println!("{}", movie_row(movie).cyan());
    if let Some(url) = &movie.poster_url {
        println!("poster: {}", url);
    }
    if let Some(id) = &movie.imdb_id {
        println!("imdb: https://www.imdb.com/title/{}", id);
    }
    if let Some(country) = &movie.country {
        println!("country: {}", country);
    }
}
