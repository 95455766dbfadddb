//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

/// Client that does not follow redirects, so 303 targets can be asserted
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Create an author and return the id from the redirect target
async fn create_author(client: &Client, first: &str, family: &str) -> i32 {
    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", first), ("family_name", family)])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    id_from_location(&response, "/catalog/author/")
}

fn id_from_location(response: &reqwest::Response, prefix: &str) -> i32 {
    let location = response
        .headers()
        .get("location")
        .expect("No location header")
        .to_str()
        .expect("Invalid location header");
    location
        .strip_prefix(prefix)
        .unwrap_or_else(|| panic!("Unexpected redirect target: {}", location))
        .parse()
        .expect("Non-numeric id in redirect target")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_index_counts() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "index");
    assert!(body["context"]["data"]["book_count"].is_number());
    assert!(body["context"]["data"]["genre_count"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_genre_create_and_delete() {
    let client = client();

    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "Test Genre Roundtrip")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let id = id_from_location(&response, "/catalog/genre/");

    // Retrievable by the id from the redirect target
    let response = client
        .get(format!("{}/catalog/genre/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["context"]["genre"]["name"], "Test Genre Roundtrip");

    // No books reference it, so delete goes through
    let response = client
        .post(format!("{}/catalog/genre/{}/delete", BASE_URL, id))
        .form(&[("genreid", id.to_string())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}/catalog/genre/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_genre_duplicate_redirects_to_existing() {
    let client = client();

    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "Case Fiction")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let id = id_from_location(&response, "/catalog/genre/");

    // Same name under case variation resolves to the existing record
    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "case fiction")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(id_from_location(&response, "/catalog/genre/"), id);

    // Cleanup
    let _ = client
        .post(format!("{}/catalog/genre/{}/delete", BASE_URL, id))
        .form(&[("genreid", id.to_string())])
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_genre_create_missing_name_rerenders() {
    let response = client()
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "   ")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "genre_form");
    assert_eq!(body["context"]["errors"][0]["field"], "name");
    assert_eq!(body["context"]["errors"][0]["message"], "Genre name required");
}

#[tokio::test]
#[ignore]
async fn test_genre_with_books_is_not_deleted() {
    let client = client();

    // Genre with one referencing book
    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "Guarded Genre")])
        .send()
        .await
        .expect("Failed to send request");
    let genre_id = id_from_location(&response, "/catalog/genre/");

    let author_id = create_author(&client, "Guard", "Writer").await;

    let response = client
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[
            ("title", "Guarded Book"),
            ("author", &author_id.to_string()),
            ("summary", "A book that protects its genre."),
            ("isbn", "978-0-00-000001-7"),
            ("genre", &genre_id.to_string()),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let book_id = id_from_location(&response, "/catalog/book/");

    // Delete re-renders the confirmation page with the dependents listed
    let response = client
        .post(format!("{}/catalog/genre/{}/delete", BASE_URL, genre_id))
        .form(&[("genreid", genre_id.to_string())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "genre_delete");
    assert_eq!(body["context"]["genre_books"][0]["title"], "Guarded Book");

    // The genre is still listed
    let response = client
        .get(format!("{}/catalog/genre/{}", BASE_URL, genre_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Cleanup: book, then genre, then author
    let _ = client
        .post(format!("{}/catalog/book/{}/delete", BASE_URL, book_id))
        .form(&[("bookid", book_id.to_string())])
        .send()
        .await;
    let _ = client
        .post(format!("{}/catalog/genre/{}/delete", BASE_URL, genre_id))
        .form(&[("genreid", genre_id.to_string())])
        .send()
        .await;
    let _ = client
        .post(format!("{}/catalog/author/{}/delete", BASE_URL, author_id))
        .form(&[("authorid", author_id.to_string())])
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_instance_defaults() {
    let client = client();

    let author_id = create_author(&client, "Imprint", "Author").await;

    let response = client
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[
            ("title", "Copied Book"),
            ("author", &author_id.to_string()),
            ("summary", "A book with copies."),
            ("isbn", "978-0-00-000002-4"),
        ])
        .send()
        .await
        .expect("Failed to send request");
    let book_id = id_from_location(&response, "/catalog/book/");

    // Empty status and due_back fall back to their defaults
    let response = client
        .post(format!("{}/catalog/bookinstance/create", BASE_URL))
        .form(&[
            ("book", book_id.to_string().as_str()),
            ("imprint", "Fourth printing"),
            ("status", ""),
            ("due_back", ""),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let instance_id = id_from_location(&response, "/catalog/bookinstance/");

    let response = client
        .get(format!("{}/catalog/bookinstance/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let instance = &body["context"]["bookinstance"];
    assert_eq!(instance["status"], "Maintenance");
    assert_eq!(instance["imprint"], "Fourth printing");
    assert!(instance["due_back"].is_string());
    assert_eq!(instance["book"]["title"], "Copied Book");

    // Copies have no dependents; delete is unconditional
    let response = client
        .post(format!(
            "{}/catalog/bookinstance/{}/delete",
            BASE_URL, instance_id
        ))
        .form(&[("bookinstanceid", instance_id.to_string())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Cleanup
    let _ = client
        .post(format!("{}/catalog/book/{}/delete", BASE_URL, book_id))
        .form(&[("bookid", book_id.to_string())])
        .send()
        .await;
    let _ = client
        .post(format!("{}/catalog/author/{}/delete", BASE_URL, author_id))
        .form(&[("authorid", author_id.to_string())])
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_detail_of_missing_record_is_404() {
    let client = client();

    for path in [
        "/catalog/book/999999",
        "/catalog/author/999999",
        "/catalog/genre/999999",
        "/catalog/bookinstance/999999",
    ] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_book_create_missing_fields_lists_each_error() {
    let response = client()
        .post(format!("{}/catalog/book/create", BASE_URL))
        .form(&[("title", ""), ("author", ""), ("summary", ""), ("isbn", "")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "book_form");
    let errors = body["context"]["errors"]
        .as_array()
        .expect("No errors array");
    assert_eq!(errors.len(), 4);
}

#[tokio::test]
#[ignore]
async fn test_author_update_keeps_identifier_on_failure() {
    let client = client();
    let author_id = create_author(&client, "Mutable", "Person").await;

    let response = client
        .post(format!("{}/catalog/author/{}/update", BASE_URL, author_id))
        .form(&[
            ("first_name", ""),
            ("family_name", "Person"),
            ("date_of_birth", "not-a-date"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["context"]["author"]["id"], author_id);
    let errors = body["context"]["errors"]
        .as_array()
        .expect("No errors array");
    assert_eq!(errors.len(), 2);

    // Cleanup
    let _ = client
        .post(format!("{}/catalog/author/{}/delete", BASE_URL, author_id))
        .form(&[("authorid", author_id.to_string())])
        .send()
        .await;
}
