use super::*;

#[test]
fn test_parse_search_response() {
    let body = r#"{
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/bb.jpg"},
            {"Title": "The Batman", "Year": "2022", "imdbID": "tt1877830", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    }"#;

    let items = parse_search_response(body).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].imdb_id, "tt0372784");
    assert_eq!(items[0].title, "Batman Begins");
    assert_eq!(items[0].year, "2005");
    assert_eq!(items[1].poster, "N/A");
}

#[test]
fn test_parse_search_response_false_is_not_found() {
    let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
    let err = parse_search_response(body).unwrap_err();
    assert_eq!(err, SourceError::NotFound("Movie not found!".to_string()));
}

#[test]
fn test_parse_search_response_false_without_message() {
    let body = r#"{"Response": "False"}"#;
    let err = parse_search_response(body).unwrap_err();
    assert_eq!(err.to_string(), "Movie not found!");
}

#[test]
fn test_parse_search_response_too_many_results() {
    let body = r#"{"Response": "False", "Error": "Too many results."}"#;
    let err = parse_search_response(body).unwrap_err();
    assert_eq!(err.to_string(), "Too many results.");
}

#[test]
fn test_parse_search_response_garbage() {
    let err = parse_search_response("<html>oops</html>").unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[test]
fn test_parse_title_response() {
    let body = r#"{
        "Title": "Inception", "Year": "2010", "Rated": "PG-13", "Released": "16 Jul 2010",
        "Runtime": "148 min", "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
        "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        "Plot": "A thief who steals corporate secrets...", "Poster": "https://example.com/inception.jpg",
        "imdbRating": "8.8", "imdbID": "tt1375666", "Type": "movie", "Response": "True"
    }"#;

    let detail = parse_title_response(body, "tt1375666").unwrap();
    assert_eq!(detail.title, "Inception");
    assert_eq!(detail.runtime_minutes(), Some(148));
    assert_eq!(detail.imdb_rating_value(), Some(8.8));
    assert_eq!(detail.director, "Christopher Nolan");
    assert_eq!(detail.genre, "Action, Adventure, Sci-Fi");
    assert_eq!(detail.released, "16 Jul 2010");
}

#[test]
fn test_parse_title_response_missing_id_uses_requested() {
    let body = r#"{"Title": "Inception", "Response": "True"}"#;
    let detail = parse_title_response(body, "tt1375666").unwrap();
    assert_eq!(detail.imdb_id, "tt1375666");
    assert_eq!(detail.runtime, "");
}

#[test]
fn test_parse_title_response_incorrect_id() {
    let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
    let err = parse_title_response(body, "nope").unwrap_err();
    assert_eq!(err, SourceError::NotFound("Incorrect IMDb ID.".to_string()));
}
