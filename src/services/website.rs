//! Static HTML export. The template carries all the styling; this module
//! only feeds it the collection and writes the result out once.

use crate::domain::models::Collection;
use std::path::Path;
use tera::{Context, Tera};

const TEMPLATE: &str = include_str!("../../templates/catalog.html");

pub fn render(username: &str, movies: &Collection) -> anyhow::Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template("catalog.html", TEMPLATE)?;
    let mut ctx = Context::new();
    ctx.insert("title", &format!("{}'s movie catalog", username));
    ctx.insert("movies", &movies.values().collect::<Vec<_>>());
    Ok(tera.render("catalog.html", &ctx)?)
}

pub fn export(path: &Path, username: &str, movies: &Collection) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render(username, movies)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Movie;

    #[test]
    fn rendered_page_carries_titles_and_links() {
        let mut movies = Collection::new();
        movies.insert(
            "Heat".to_string(),
            Movie {
                title: "Heat".to_string(),
                year: 1995,
                rating: 8.3,
                note: "rewatch".to_string(),
                poster_url: Some("https://img.example/heat.jpg".to_string()),
                imdb_id: Some("tt0113277".to_string()),
                country: None,
                favorite: true,
            },
        );
        movies.insert(
            "Ikiru".to_string(),
            Movie {
                title: "Ikiru".to_string(),
                year: 1952,
                rating: 8.3,
                note: String::new(),
                poster_url: None,
                imdb_id: None,
                country: Some("Japan".to_string()),
                favorite: false,
            },
        );

        let html = render("alice", &movies).expect("render");
        assert!(html.contains("alice's movie catalog"));
        assert!(html.contains("Heat"));
        assert!(html.contains("Ikiru"));
        assert!(html.contains("https://www.imdb.com/title/tt0113277"));
        assert!(html.contains("https://img.example/heat.jpg"));
        // No client-side logic in the export.
        assert!(!html.contains("<script"));
    }

    #[test]
    fn empty_collection_still_renders_a_page() {
        let html = render("bob", &Collection::new()).expect("render");
        assert!(html.contains("bob's movie catalog"));
    }
}
