use axum::{
    routing::{delete, get, post, put},
    Router,
};
use crate::handlers::product::{
    create_product, delete_product, get_product, get_products, search_product, update_product,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create_product", post(create_product))
        .route("/products", get(get_products))
        .route("/products/search/{code}", get(search_product))
        .route("/getProduct/{product_id}", get(get_product))
        .route("/updateProducts/{product_id}", put(update_product))
        .route("/deleteProducts/{product_id}", delete(delete_product))
}
