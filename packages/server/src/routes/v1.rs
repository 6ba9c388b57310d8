use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/products", product_routes(config))
        .nest("/categories", category_routes())
        .nest("/attributes", attribute_routes())
}

fn product_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            handlers::product::list_products,
            handlers::product::create_product
        ))
        .routes(routes!(handlers::product::list_nes_tabs))
        .routes(routes!(
            handlers::product::get_product,
            handlers::product::update_product,
            handlers::product::delete_product
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::product::upload_images))
        .layer(handlers::product::upload_body_limit(
            config.upload.max_body_bytes,
        ));

    crud.merge(upload)
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::list_categories,
            handlers::category::create_category
        ))
        .routes(routes!(handlers::category::get_category))
}

fn attribute_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::attribute::list_attributes,
        handlers::attribute::create_attribute
    ))
}
