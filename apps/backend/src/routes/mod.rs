use actix_web::web;

pub mod books;
pub mod health;

/// Configure application routes for the HttpServer and test harnesses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Books resource: /books/**
    cfg.service(web::scope("/books").configure(books::configure_routes));
}
