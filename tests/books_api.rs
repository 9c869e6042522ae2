mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use common::{get, json, spawn_app};

fn book(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "author": "Ursula K. Le Guin",
        "content": "A wizard's tale.",
        "price": 12.5,
        "rating": 5
    })
}

#[tokio::test]
async fn writes_require_a_bearer_token() {
    let app = spawn_app();

    let (status, body) = app
        .send(json("POST", "/v1/auth/book", None, &book("Earthsea")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = app
        .send(json("POST", "/v1/auth/book", Some("not-a-jwt"), &book("Earthsea")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/v1/auth/book/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_read_back() {
    let app = spawn_app();
    let token = app.token();

    let (status, created) = app
        .send(json("POST", "/v1/auth/book", Some(&token), &book("Earthsea")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Success");
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["created_at"], created["data"]["updated_at"]);

    let (status, fetched) = app.send(get(&format!("/v1/book/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["title"], "Earthsea");
    assert_eq!(fetched["data"]["author"], "Ursula K. Le Guin");
    assert_eq!(fetched["data"]["content"], "A wizard's tale.");
    assert_eq!(fetched["data"]["price"], 12.5);
    assert_eq!(fetched["data"]["rating"], 5);
    assert!(fetched.get("meta").is_none());
}

#[tokio::test]
async fn invalid_book_lists_every_broken_field() {
    let app = spawn_app();
    let token = app.token();

    let (status, body) = app
        .send(json(
            "POST",
            "/v1/auth/book",
            Some(&token),
            &json!({"author": "Someone", "content": "text", "price": 0, "rating": 9}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["price", "rating", "title"]);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = spawn_app();
    let token = app.token();

    let req = Request::builder()
        .method("POST")
        .uri("/v1/auth/book")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn listing_is_paged_newest_first() {
    let app = spawn_app();
    let token = app.token();
    for i in 0..5 {
        let (status, _) = app
            .send(json("POST", "/v1/auth/book", Some(&token), &book(&format!("Book {i}"))))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.send(get("/v1/book?perPage=2&page=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["meta"],
        json!({"total_count": 5, "page_count": 2, "current_page": 2, "per_page": 2})
    );
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Book 2", "Book 1"]);

    // Out-of-range pages clamp; junk parameters fall back to defaults.
    let (_, body) = app.send(get("/v1/book?perPage=2&page=99")).await;
    assert_eq!(body["meta"]["current_page"], 2);
    let (_, body) = app.send(get("/v1/book?perPage=lots&page=x")).await;
    assert_eq!(body["meta"]["per_page"], 20);
    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let app = spawn_app();
    let (status, body) = app.send(get("/v1/book")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["page_count"], 0);
    assert_eq!(body["meta"]["current_page"], 1);
}

#[tokio::test]
async fn update_and_delete_lifecycle() {
    let app = spawn_app();
    let token = app.token();
    let (_, created) = app
        .send(json("POST", "/v1/auth/book", Some(&token), &book("Draft")))
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = app
        .send(json(
            "PUT",
            &format!("/v1/auth/book/{id}"),
            Some(&token),
            &json!({"title": "Final", "author": "A", "content": "C", "price": 3, "rating": 1}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], id);
    assert_eq!(updated["data"]["title"], "Final");
    assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);

    let delete = |id: i64| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/v1/auth/book/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };
    let (status, body) = app.send(delete(id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": "deleted", "message": "Success"}));

    let (status, body) = app.send(delete(id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = app.send(get(&format!("/v1/book/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_a_missing_book_is_not_found() {
    let app = spawn_app();
    let token = app.token();
    let (status, _) = app
        .send(json("PUT", "/v1/auth/book/404", Some(&token), &book("Ghost")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.send(get("/v1/book")).await;
    assert_eq!(list["meta"]["total_count"], 0);
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = spawn_app();
    let (status, body) = app.send(get("/v1/book/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}
