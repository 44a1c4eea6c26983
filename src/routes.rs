//! Route configuration
//!
//! Centralized route setup: the public leaderboard and auth endpoints are
//! open, everything else sits behind the JWT middleware. The admin role is
//! checked inside the admin handlers, not here.

use crate::config::Config;
use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &Config) {
    let jwt_auth = JwtAuthMiddleware::new(config.jwt.secret.clone());

    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(handlers::signup))
                    .route("/login", web::post().to(handlers::login))
                    .route("/admin/login", web::post().to(handlers::admin_login)),
            )
            .service(
                web::scope("/admin")
                    .wrap(jwt_auth.clone())
                    .route("/students", web::get().to(handlers::list_students_admin)),
            )
            .service(
                web::scope("/students")
                    // Public ranked list
                    .route("", web::get().to(handlers::list_leaderboard))
                    // Authenticated endpoints; /me must be registered before /{id} routes
                    .service(
                        web::scope("")
                            .wrap(jwt_auth)
                            .route("/me", web::get().to(handlers::get_my_profile))
                            .route("/{id}/score", web::put().to(handlers::update_score))
                            .route("/{id}", web::delete().to(handlers::delete_student)),
                    ),
            ),
    );
}
