mod common;

use axum::http::StatusCode;
use common::{id_from_location, product_fields, TestApp};
use garment_shop::model::ProductId;
use garment_shop::Store;

#[tokio::test]
async fn root_and_health() {
    let app = TestApp::new();
    assert_eq!(app.get("/").await.body, "Hello World");
    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");
    assert_eq!(app.get("/ready").await.status, StatusCode::OK);
    assert!(app.get("/version").await.body.contains("garment-shop"));
}

#[tokio::test]
async fn created_product_detail_shows_submitted_values() {
    let app = TestApp::new();
    let resp = app.post_form("/products", &product_fields("Denim Jacket", "outerwear")).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location.expect("redirect");
    assert!(location.ends_with("?flash=product_created"));

    let page = app.get(&location).await;
    assert_eq!(page.status, StatusCode::OK);
    for expected in ["Denim Jacket", "Acme", "$89.50", "indigo", "Outerwear", "Heavy cotton", "Product created"] {
        assert!(page.body.contains(expected), "missing {expected:?}");
    }

    // The notice is one-shot: the plain detail URL has none.
    let id = id_from_location(&location, "/products/");
    let again = app.get(&format!("/products/{id}")).await;
    assert!(!again.body.contains("Product created"));
}

#[tokio::test]
async fn missing_required_field_is_400_and_nothing_is_stored() {
    let app = TestApp::new();
    let mut fields = product_fields("", "shirt");
    fields.retain(|(k, _)| *k != "price");

    let resp = app.post_form("/products", &fields).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Product name is required, Price is required");
    assert!(app.store.list_products(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_or_unknown_id_is_404() {
    let app = TestApp::new();
    for uri in ["/products/not-an-id", "/products/64b7f0c2e4b0a1a2b3c4d5e6/edit"] {
        let resp = app.get(uri).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(resp.body, "Product not found");
    }
    let unknown = app.get(&format!("/products/{}", ProductId::generate())).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body, "Product not found");
}

#[tokio::test]
async fn category_filter() {
    let app = TestApp::new();
    app.post_form("/products", &product_fields("Oxford Shirt", "shirt")).await;
    app.post_form("/products", &product_fields("Chino", "pants")).await;

    let all = app.get("/products").await;
    assert!(all.body.contains("All Products"));
    assert!(all.body.contains("Oxford Shirt") && all.body.contains("Chino"));

    let shirts = app.get("/products?category=shirt").await;
    assert!(shirts.body.contains("Shirts Products"));
    assert!(shirts.body.contains("Oxford Shirt"));
    assert!(!shirts.body.contains("Chino"));

    let none = app.get("/products?category=dress").await;
    assert_eq!(none.status, StatusCode::OK);
    assert!(none.body.contains("No products found."));

    let blank = app.get("/products?category=").await;
    assert!(blank.body.contains("All Products"));
}

#[tokio::test]
async fn category_filter_ignores_case_of_known_categories() {
    let app = TestApp::new();
    app.post_form("/products", &product_fields("Oxford Shirt", "shirt")).await;

    let shirts = app.get("/products?category=Shirt").await;
    assert!(shirts.body.contains("Shirts Products"));
    assert!(shirts.body.contains("Oxford Shirt"));

    let unknown = app.get("/products?category=Hats").await;
    assert!(unknown.body.contains("Hats Products"));
    assert!(unknown.body.contains("No products found."));
}

#[tokio::test]
async fn encoded_flash_key_is_shown() {
    let app = TestApp::new();
    let created = app.post_form("/products", &product_fields("Polo", "shirt")).await;
    let id = id_from_location(&created.location.unwrap(), "/products/");

    let page = app.get(&format!("/products/{id}?flash=product%5Fcreated")).await;
    assert!(page.body.contains("Product created"));
}

#[tokio::test]
async fn invalid_update_leaves_product_unchanged() {
    let app = TestApp::new();
    let created = app.post_form("/products", &product_fields("Linen Shirt", "shirt")).await;
    let id = id_from_location(&created.location.unwrap(), "/products/");
    let before = app.store.find_product(id.parse().unwrap()).await.unwrap().unwrap();

    let mut fields = product_fields("Linen Shirt v2", "shirt");
    fields.retain(|(k, _)| *k != "price");
    fields.push(("price", "-5"));
    let resp = app.post_form(&format!("/products/{id}?_method=PUT"), &fields).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Price must be at least 0");

    let after = app.store.find_product(id.parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn edit_form_and_update() {
    let app = TestApp::new();
    let created = app.post_form("/products", &product_fields("Linen Shirt", "shirt")).await;
    let id = id_from_location(&created.location.unwrap(), "/products/");

    let form = app.get(&format!("/products/{id}/edit")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Edit Linen Shirt"));
    assert!(form.body.contains("89.50"));

    let resp = app
        .post_form(&format!("/products/{id}?_method=PUT"), &product_fields("Linen Overshirt", "outerwear"))
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(resp.location.unwrap().ends_with("?flash=product_updated"));

    let stored = app.store.find_product(id.parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.name, "Linen Overshirt");
    assert_eq!(stored.category.as_str(), "outerwear");
}

#[tokio::test]
async fn patch_override_updates_product() {
    let app = TestApp::new();
    let created = app.post_form("/products", &product_fields("Linen Shirt", "shirt")).await;
    let id = id_from_location(&created.location.unwrap(), "/products/");

    let resp = app
        .post_form(&format!("/products/{id}?_method=PATCH"), &product_fields("Linen Tunic", "dress"))
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(resp.location.unwrap().ends_with("?flash=product_updated"));

    let stored = app.store.find_product(id.parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.name, "Linen Tunic");
    assert_eq!(stored.category.as_str(), "dress");
}

#[tokio::test]
async fn delete_via_method_override() {
    let app = TestApp::new();
    let created = app.post_form("/products", &product_fields("Scarf", "accessories")).await;
    let id = id_from_location(&created.location.unwrap(), "/products/");

    let resp = app.post_form(&format!("/products/{id}?_method=DELETE"), &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/products?flash=product_deleted"));
    assert_eq!(app.get(&format!("/products/{id}")).await.status, StatusCode::NOT_FOUND);

    // Deleting again is not an error.
    let again = app.post_form(&format!("/products/{id}?_method=DELETE"), &[]).await;
    assert_eq!(again.status, StatusCode::SEE_OTHER);

    let malformed = app.post_form("/products/nope?_method=DELETE", &[]).await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_form_renders() {
    let app = TestApp::new();
    let resp = app.get("/products/create").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("New Product"));
    assert!(resp.body.contains("accessories"));
}
