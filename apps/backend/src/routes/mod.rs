use actix_web::web;

pub mod games;
pub mod health;

/// Register every route. Shared by `main.rs` and the route tests so both
/// exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
