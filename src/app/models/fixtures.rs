//! The fixed three-movie payload served at start-up

use super::movie::Movie;

/// Address the movie collection fetches from
pub const MOVIES_URL: &str = "movies/";

/// Response body served for [`MOVIES_URL`] when no real backend is configured
pub const MOVIES_JSON: &str = r#"[
    {"id": 1, "name": "Star Wars", "rating": "PG", "description": "Best ever"},
    {"id": 2, "name": "The Matrix", "rating": "R", "description": "Also good..."},
    {"id": 3, "name": "Saving Private Ryan", "rating": "R", "description": "Arguably best war movie ever"}
]"#;

/// The same payload as typed records
pub fn movies() -> Vec<Movie> {
    vec![
        Movie::new(1, "Star Wars", "PG", "Best ever"),
        Movie::new(2, "The Matrix", "R", "Also good..."),
        Movie::new(3, "Saving Private Ryan", "R", "Arguably best war movie ever"),
    ]
}
