use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::domain::ProductId;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct CatalogServerState {
    requested: Arc<Mutex<Vec<String>>>,
}

fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId(1),
            name: "Apple".to_string(),
            description: "Crisp".to_string(),
            price: 2.5,
            image_url: String::new(),
        },
        Product {
            id: ProductId(2),
            name: "Banana".to_string(),
            description: "Ripe".to_string(),
            price: 1.0,
            image_url: "https://img.test/banana.png".to_string(),
        },
    ]
}

async fn categories(State(state): State<CatalogServerState>) -> Json<Vec<Category>> {
    state.requested.lock().await.push("/api/categories".to_string());
    Json(vec![
        Category {
            id: CategoryId(1),
            name: "Fruit".to_string(),
        },
        Category {
            id: CategoryId(3),
            name: "Vegetables".to_string(),
        },
    ])
}

async fn all_products(State(state): State<CatalogServerState>) -> Json<Vec<Product>> {
    state.requested.lock().await.push("/api/products".to_string());
    Json(sample_products())
}

async fn products_in_category(
    State(state): State<CatalogServerState>,
    Path(category_id): Path<i64>,
) -> Json<Vec<Product>> {
    state
        .requested
        .lock()
        .await
        .push(format!("/api/products/category/{category_id}"));
    let products = sample_products()
        .into_iter()
        .filter(|product| product.id.0 == category_id)
        .collect();
    Json(products)
}

async fn image() -> Vec<u8> {
    b"\x89PNG-bytes".to_vec()
}

async fn spawn_catalog_server() -> (String, CatalogServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = CatalogServerState::default();
    let app = Router::new()
        .route("/api/categories", get(categories))
        .route("/api/products", get(all_products))
        .route("/api/products/category/:id", get(products_in_category))
        .route("/images/banana.png", get(image))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

async fn spawn_failing_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route(
            "/api/categories",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/products", get(|| async { "not json" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn lists_categories_from_api() {
    let (server_url, state) = spawn_catalog_server().await;
    let client = CatalogClient::new(format!("{server_url}/api"));

    let categories = client.list_categories().await.expect("categories");

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, CategoryId(3));
    assert_eq!(categories[1].name, "Vegetables");
    assert_eq!(*state.requested.lock().await, ["/api/categories"]);
}

#[tokio::test]
async fn no_category_requests_all_products_endpoint() {
    let (server_url, state) = spawn_catalog_server().await;
    let client = CatalogClient::new(format!("{server_url}/api/"));

    let products = client.list_products(None).await.expect("products");

    assert_eq!(products, sample_products());
    assert_eq!(*state.requested.lock().await, ["/api/products"]);
}

#[tokio::test]
async fn category_selection_requests_scoped_endpoint() {
    let (server_url, state) = spawn_catalog_server().await;
    let client = CatalogClient::new(format!("{server_url}/api"));

    let products = client
        .list_products(Some(CategoryId(2)))
        .await
        .expect("products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Banana");
    assert_eq!(
        *state.requested.lock().await,
        ["/api/products/category/2"]
    );
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let server_url = spawn_failing_server().await;
    let client = CatalogClient::new(format!("{server_url}/api"));

    let err = client.list_categories().await.expect_err("500 must fail");

    assert_eq!(
        err,
        FetchError::Status {
            url: format!("{server_url}/api/categories"),
            status: 500,
        }
    );
}

#[tokio::test]
async fn malformed_body_is_a_fetch_failure() {
    let server_url = spawn_failing_server().await;
    let client = CatalogClient::new(format!("{server_url}/api"));

    let err = client.list_products(None).await.expect_err("bad json must fail");

    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = CatalogClient::new(format!("http://{addr}/api"));
    let err = client.list_categories().await.expect_err("closed port must fail");

    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetches_raw_image_bytes() {
    let (server_url, _state) = spawn_catalog_server().await;
    let client = CatalogClient::new(format!("{server_url}/api"));

    let bytes = client
        .fetch_image(&format!("{server_url}/images/banana.png"))
        .await
        .expect("image bytes");

    assert_eq!(bytes, b"\x89PNG-bytes");
}

#[test]
fn trims_trailing_slash_from_api_base() {
    let client = CatalogClient::new("http://localhost:8080/api/");
    assert_eq!(client.api_base(), DEFAULT_API_BASE_URL);
}
