use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;
use crate::omdb::parser::{parse_search_response, parse_title_response};

pub fn create_http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {}", e)))
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, SourceError> {
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        debug!("OMDb request failed with status {}", status);
        return Err(SourceError::Http { status: status.as_u16() });
    }

    Ok(response.text().await?)
}

/// `GET <base>?apikey=<key>&s=<query>`
pub async fn search_titles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResultItem>, SourceError> {
    let body = get_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let items = parse_search_response(&body)?;
    debug!("OMDb search '{}' returned {} items", query, items.len());
    Ok(items)
}

/// `GET <base>?apikey=<key>&i=<id>`
pub async fn get_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, SourceError> {
    let body = get_body(client, base_url, &[("apikey", api_key), ("i", imdb_id)]).await?;
    parse_title_response(&body, imdb_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        create_http_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_error_status_to_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "batman"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = search_titles(&client(), &server.uri(), "key", "batman").await.unwrap_err();
        assert_eq!(err, SourceError::Http { status: 503 });
        assert!(err.to_string().starts_with("Something went wrong while fetching movies!"));
    }

    #[tokio::test]
    async fn test_search_false_response_with_ok_status_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("apikey", "key"))
            .and(query_param("s", "zzzzzz"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Response":"False","Error":"Movie not found!"}"#),
            )
            .mount(&server)
            .await;

        let err = search_titles(&client(), &server.uri(), "key", "zzzzzz").await.unwrap_err();
        assert_eq!(err, SourceError::NotFound("Movie not found!".to_string()));
    }

    #[tokio::test]
    async fn test_search_returns_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "batman"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"Search":[{"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
            ))
            .mount(&server)
            .await;

        let items = search_titles(&client(), &server.uri(), "key", "batman").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].imdb_id, "tt0372784");
    }

    #[tokio::test]
    async fn test_get_title_maps_error_status_to_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("i", "tt0372784"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = get_title(&client(), &server.uri(), "key", "tt0372784").await.unwrap_err();
        assert_eq!(err, SourceError::Http { status: 401 });
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let err = search_titles(&client(), &format!("http://{}", addr), "key", "batman")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Network(_)), "got {:?}", err);
    }
}
