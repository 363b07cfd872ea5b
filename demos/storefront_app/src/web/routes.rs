// demos/storefront_app/src/web/routes.rs

use actix_web::web;

// Simple health check. In a real deployment this would also probe the
// backing store.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Public Catalog Routes
      .service(
        web::scope("/products")
          .route(
            "",
            web::get().to(crate::web::handlers::product_handlers::list_products_handler),
          )
          .route(
            "/{product_id}",
            web::get().to(crate::web::handlers::product_handlers::get_product_handler),
          ),
      )
      // Checkout Route
      .service(web::scope("/checkout").route(
        "",
        web::post().to(crate::web::handlers::checkout_handlers::checkout_handler),
      ))
      // Admin Routes (a real deployment would gate these behind auth
      // middleware; session mechanics are outside this service)
      .service(
        web::scope("/admin")
          .service(
            web::scope("/products")
              .route(
                "",
                web::post().to(crate::web::handlers::admin_handlers::add_product_handler),
              )
              .route(
                "/{product_id}",
                web::delete().to(crate::web::handlers::admin_handlers::delete_product_handler),
              )
              .route(
                "/{product_id}/stock",
                web::put().to(crate::web::handlers::admin_handlers::adjust_stock_handler),
              ),
          )
          .service(
            web::scope("/orders")
              .route(
                "",
                web::get().to(crate::web::handlers::admin_handlers::list_orders_handler),
              )
              .route(
                "/{order_id}",
                web::get().to(crate::web::handlers::admin_handlers::get_order_handler),
              )
              .route(
                "/{order_id}/status",
                web::put().to(crate::web::handlers::admin_handlers::update_order_status_handler),
              ),
          ),
      ),
  );
}
