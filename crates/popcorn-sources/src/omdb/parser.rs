use popcorn_models::{MovieDetail, SearchResultItem};
use serde::Deserialize;
use crate::error::SourceError;

const DEFAULT_NOT_FOUND: &str = "Movie not found!";

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn not_found(error: Option<String>) -> SourceError {
    SourceError::NotFound(
        error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOT_FOUND.to_string()),
    )
}

/// Parse a `?s=` search body.
///
/// `Response: "False"` is a logical failure even when the HTTP status was 200.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>, SourceError> {
    let parsed: OmdbSearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    if !parsed.response.eq_ignore_ascii_case("true") {
        return Err(not_found(parsed.error));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchResultItem {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: item.poster,
        })
        .collect())
}

/// Parse an `?i=` title body. `requested_id` fills in the id when the body omits it.
pub fn parse_title_response(body: &str, requested_id: &str) -> Result<MovieDetail, SourceError> {
    let parsed: OmdbTitleResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;

    if !parsed.response.eq_ignore_ascii_case("true") {
        return Err(not_found(parsed.error));
    }

    let imdb_id = if parsed.imdb_id.is_empty() {
        requested_id.to_string()
    } else {
        parsed.imdb_id
    };

    Ok(MovieDetail {
        imdb_id,
        title: parsed.title,
        year: parsed.year,
        poster: parsed.poster,
        runtime: parsed.runtime,
        imdb_rating: parsed.imdb_rating,
        plot: parsed.plot,
        released: parsed.released,
        actors: parsed.actors,
        director: parsed.director,
        genre: parsed.genre,
    })
}

#[cfg(test)]
mod tests;
