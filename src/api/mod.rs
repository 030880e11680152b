//! REST API routes for lyricsnap

pub mod extract;

use actix_web::web;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(extract::configure))
        .service(extract::index);
}
