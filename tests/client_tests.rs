use mockito::Matcher;
use recipe_browser::api::{RecipeClient, RecipeSource, Serves};
use recipe_browser::browser::query::{BrowseQuery, RetrievalQuery};
use recipe_browser::browser::{FilterField, PageLimit, SearchFilters};
use recipe_browser::config::ApiConfig;
use recipe_browser::Error;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> RecipeClient {
    RecipeClient::new(&ApiConfig {
        base_url: format!("{}/api", server.url()),
        timeout_seconds: 5,
        user_agent: "recipe-browser-tests".to_string(),
    })
    .expect("Failed to build client")
}

#[tokio::test]
async fn test_browse_sends_page_and_limit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/recipes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "page": 2,
                "limit": 20,
                "total": 41,
                "data": [
                    {"id": 21, "title": "Pumpkin Soup", "cuisine": "American", "rating": 4.6,
                     "total_time": 45, "serves": "6 servings", "nutrients": {"calories": "210 kcal"}},
                    {"id": 22, "title": "Dal", "rating": null, "serves": 4}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let listing = client_for(&server)
        .browse(&BrowseQuery {
            page: 2,
            limit: PageLimit::Twenty,
        })
        .await
        .expect("browse failed");

    mock.assert_async().await;
    assert_eq!(listing.total, Some(41));
    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].title, "Pumpkin Soup");
    assert_eq!(listing.items[0].calories(), Some(210.0));
    assert!(listing.items[1].rating.is_none());
    assert_eq!(listing.items[1].serves, Some(Serves::Count(4)));
}

#[tokio::test]
async fn test_search_sends_only_filled_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/recipes/search")
        .match_query(Matcher::Exact("cuisine=Italian&rating=%3E%3D4".into()))
        .with_header("content-type", "application/json")
        .with_body(json!({"data": [{"id": 5, "title": "Risotto"}]}).to_string())
        .create_async()
        .await;

    let mut filters = SearchFilters::default();
    filters.set(FilterField::Title, "");
    filters.set(FilterField::Cuisine, "Italian");
    filters.set(FilterField::Rating, ">=4");
    let query = filters.to_query().expect("filters are set");

    let listing = client_for(&server)
        .fetch(&RetrievalQuery::Search(query))
        .await
        .expect("search failed");

    mock.assert_async().await;
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.total, None);
}

#[tokio::test]
async fn test_error_payload_is_server_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/recipes")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "no such table: recipes"}).to_string())
        .create_async()
        .await;

    let result = client_for(&server)
        .browse(&BrowseQuery {
            page: 1,
            limit: PageLimit::Fifteen,
        })
        .await;

    match result {
        Err(Error::ServerReported(msg)) => assert_eq!(msg, "no such table: recipes"),
        other => panic!("expected server-reported error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_with_envelope_keeps_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/recipes")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({"error": "division by zero"}).to_string())
        .create_async()
        .await;

    let result = client_for(&server)
        .browse(&BrowseQuery {
            page: 1,
            limit: PageLimit::Fifteen,
        })
        .await;

    assert!(matches!(result, Err(Error::ServerReported(msg)) if msg == "division by zero"));
}

#[tokio::test]
async fn test_error_status_without_envelope() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/recipes")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let result = client_for(&server)
        .browse(&BrowseQuery {
            page: 1,
            limit: PageLimit::Fifteen,
        })
        .await;

    assert!(matches!(result, Err(Error::HttpStatus(502))));
}

#[tokio::test]
async fn test_unparsable_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/recipes")
        .match_query(Matcher::Any)
        .with_body("not json at all")
        .create_async()
        .await;

    let result = client_for(&server)
        .browse(&BrowseQuery {
            page: 1,
            limit: PageLimit::Fifteen,
        })
        .await;

    let err = result.expect_err("body should not decode");
    assert!(matches!(err, Error::Decode(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = RecipeClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        timeout_seconds: 5,
        user_agent: "recipe-browser-tests".to_string(),
    })
    .unwrap();

    let err = client
        .browse(&BrowseQuery {
            page: 1,
            limit: PageLimit::Fifteen,
        })
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
}
