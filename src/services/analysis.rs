//! Read-only statistics over the in-memory collection. Nothing here touches
//! storage; handlers pass the loaded map and print what comes back.

use crate::domain::models::{Collection, Movie};
use rand::Rng;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("the collection has no movies to analyze")]
    EmptyCollection,
}

/// Attributes the histogram and sort operations understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericAttribute {
    Rating,
    Year,
}

impl NumericAttribute {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rating" => Some(Self::Rating),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Rating,
    Year,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(Self::Title),
            "rating" => Some(Self::Rating),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// One histogram bar. For year histograms the label is always a whole year,
/// so the rendered axis can only ever carry integer ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

pub fn average(movies: &Collection) -> Result<f64, AnalysisError> {
    if movies.is_empty() {
        return Err(AnalysisError::EmptyCollection);
    }
    let sum: f64 = movies.values().map(|m| m.rating).sum();
    Ok(sum / movies.len() as f64)
}

pub fn median(movies: &Collection) -> Result<f64, AnalysisError> {
    if movies.is_empty() {
        return Err(AnalysisError::EmptyCollection);
    }
    let mut ratings: Vec<f64> = movies.values().map(|m| m.rating).collect();
    ratings.sort_by(f64::total_cmp);
    let mid = ratings.len() / 2;
    if ratings.len() % 2 == 1 {
        Ok(ratings[mid])
    } else {
        Ok((ratings[mid - 1] + ratings[mid]) / 2.0)
    }
}

/// Every movie tied at the maximum rating, not an arbitrary single pick.
pub fn top(movies: &Collection) -> Vec<&Movie> {
    extremes(movies, true)
}

/// Every movie tied at the minimum rating.
pub fn bottom(movies: &Collection) -> Vec<&Movie> {
    extremes(movies, false)
}

fn extremes(movies: &Collection, max: bool) -> Vec<&Movie> {
    let extreme = movies
        .values()
        .map(|m| m.rating)
        .reduce(|a, b| if (b > a) == max { b } else { a });
    match extreme {
        None => Vec::new(),
        Some(extreme) => movies.values().filter(|m| m.rating == extreme).collect(),
    }
}

pub fn histogram(
    movies: &Collection,
    attribute: NumericAttribute,
) -> Result<Vec<Bucket>, AnalysisError> {
    if movies.is_empty() {
        return Err(AnalysisError::EmptyCollection);
    }
    match attribute {
        NumericAttribute::Rating => Ok(rating_buckets(movies)),
        NumericAttribute::Year => Ok(year_buckets(movies)),
    }
}

/// Fixed-width 1.0 bins over the rating domain: [1,2), [2,3), .. [9,10].
fn rating_buckets(movies: &Collection) -> Vec<Bucket> {
    let mut counts = [0usize; 9];
    for movie in movies.values() {
        let idx = (movie.rating.floor() as usize).clamp(1, 9) - 1;
        counts[idx] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bucket {
            label: format!("{}-{}", i + 1, i + 2),
            count,
        })
        .collect()
}

/// One bucket per integer year from the earliest to the latest release,
/// zero-count years included, so the axis never needs fractional ticks.
fn year_buckets(movies: &Collection) -> Vec<Bucket> {
    let min = movies.values().map(|m| m.year).min().expect("non-empty");
    let max = movies.values().map(|m| m.year).max().expect("non-empty");
    (min..=max)
        .map(|year| Bucket {
            label: year.to_string(),
            count: movies.values().filter(|m| m.year == year).count(),
        })
        .collect()
}

pub fn random_pick(movies: &Collection) -> Option<&Movie> {
    if movies.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..movies.len());
    movies.values().nth(idx)
}

/// Case-insensitive substring match on the title.
pub fn search<'a>(movies: &'a Collection, query: &str) -> Vec<&'a Movie> {
    let query = query.to_lowercase();
    movies
        .values()
        .filter(|m| m.title.to_lowercase().contains(&query))
        .collect()
}

pub fn sorted_by(movies: &Collection, key: SortKey, descending: bool) -> Vec<&Movie> {
    let mut out: Vec<&Movie> = movies.values().collect();
    match key {
        SortKey::Title => out.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Rating => out.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortKey::Year => out.sort_by_key(|m| m.year),
    }
    if descending {
        out.reverse();
    }
    out
}

pub fn filter_by(
    movies: &Collection,
    min_rating: f64,
    start_year: i32,
    end_year: i32,
) -> Vec<&Movie> {
    movies
        .values()
        .filter(|m| m.rating >= min_rating && (start_year..=end_year).contains(&m.year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Movie;

    fn collection(entries: &[(&str, i32, f64)]) -> Collection {
        entries
            .iter()
            .map(|&(title, year, rating)| {
                (
                    title.to_string(),
                    Movie {
                        title: title.to_string(),
                        year,
                        rating,
                        note: String::new(),
                        poster_url: None,
                        imdb_id: None,
                        country: None,
                        favorite: false,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn average_and_median_match_known_values() {
        let movies = collection(&[("A", 2000, 8.7), ("B", 2001, 9.5), ("C", 2002, 3.6)]);
        assert!((average(&movies).unwrap() - 7.266_666_6).abs() < 1e-6);
        assert_eq!(median(&movies).unwrap(), 8.7);
    }

    #[test]
    fn median_averages_middle_pair_for_even_counts() {
        let movies = collection(&[
            ("A", 2000, 2.0),
            ("B", 2001, 4.0),
            ("C", 2002, 6.0),
            ("D", 2003, 8.0),
        ]);
        assert_eq!(median(&movies).unwrap(), 5.0);
    }

    #[test]
    fn empty_collection_is_a_typed_error() {
        let movies = Collection::new();
        assert_eq!(average(&movies), Err(AnalysisError::EmptyCollection));
        assert_eq!(median(&movies), Err(AnalysisError::EmptyCollection));
        assert_eq!(
            histogram(&movies, NumericAttribute::Year),
            Err(AnalysisError::EmptyCollection)
        );
    }

    #[test]
    fn extremes_return_every_tied_movie() {
        let movies = collection(&[
            ("A", 2000, 9.5),
            ("B", 2001, 9.5),
            ("C", 2002, 3.6),
            ("D", 2003, 3.6),
        ]);
        let best: Vec<&str> = top(&movies).iter().map(|m| m.title.as_str()).collect();
        let worst: Vec<&str> = bottom(&movies).iter().map(|m| m.title.as_str()).collect();
        assert_eq!(best, ["A", "B"]);
        assert_eq!(worst, ["C", "D"]);
    }

    #[test]
    fn year_histogram_fills_gap_years_with_zero() {
        let movies = collection(&[("A", 1999, 7.0), ("B", 1999, 8.0), ("C", 2001, 9.0)]);
        let buckets = histogram(&movies, NumericAttribute::Year).unwrap();
        let as_pairs: Vec<(&str, usize)> =
            buckets.iter().map(|b| (b.label.as_str(), b.count)).collect();
        assert_eq!(as_pairs, [("1999", 2), ("2000", 0), ("2001", 1)]);
        // Integer ticks only: every label parses as a whole year.
        assert!(buckets.iter().all(|b| b.label.parse::<i32>().is_ok()));
    }

    #[test]
    fn rating_histogram_keeps_ten_in_the_top_bin() {
        let movies = collection(&[("A", 2000, 10.0), ("B", 2001, 9.2), ("C", 2002, 1.0)]);
        let buckets = histogram(&movies, NumericAttribute::Rating).unwrap();
        assert_eq!(buckets.len(), 9);
        assert_eq!(buckets[8].label, "9-10");
        assert_eq!(buckets[8].count, 2);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let movies = collection(&[("The Matrix", 1999, 8.7), ("Heat", 1995, 8.3)]);
        let hits: Vec<&str> = search(&movies, "matr").iter().map(|m| m.title.as_str()).collect();
        assert_eq!(hits, ["The Matrix"]);
        assert!(search(&movies, "zzz").is_empty());
    }

    #[test]
    fn sort_and_filter_compose_with_year_range() {
        let movies = collection(&[("A", 1990, 5.0), ("B", 2000, 9.0), ("C", 2010, 7.0)]);
        let sorted: Vec<&str> = sorted_by(&movies, SortKey::Rating, true)
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(sorted, ["B", "C", "A"]);
        let filtered: Vec<&str> = filter_by(&movies, 6.0, 1995, 2005)
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(filtered, ["B"]);
    }

    #[test]
    fn random_pick_comes_from_the_collection() {
        let movies = collection(&[("A", 2000, 5.0), ("B", 2001, 6.0)]);
        for _ in 0..10 {
            let picked = random_pick(&movies).expect("non-empty");
            assert!(movies.contains_key(&picked.title));
        }
        assert!(random_pick(&Collection::new()).is_none());
    }
}
