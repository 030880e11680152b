//! Lyrics extraction route

use actix_web::{get, post, web, HttpResponse, Responder};

use crate::core::LyricsResolver;
use crate::models::ExtractRequest;

/// Extract lyrics for a video URL.
///
/// Failures are part of the response body contract: the endpoint always
/// answers 200 with a status field, matching the upstream behavior.
#[post("/extract")]
pub async fn extract_lyrics(
    body: web::Json<ExtractRequest>,
    resolver: web::Data<LyricsResolver>,
) -> impl Responder {
    let outcome = resolver.resolve(&body.youtube_url).await;
    HttpResponse::Ok().json(outcome)
}

/// Liveness probe
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "lyricsnap API is running!" }))
}

/// Configure extraction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(extract_lyrics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupSettings;
    use actix_web::{test, App};

    fn test_resolver() -> web::Data<LyricsResolver> {
        web::Data::new(LyricsResolver::from_settings(
            &LookupSettings::without_delays(),
        ))
    }

    #[actix_web::test]
    async fn test_index_route() {
        let app = test::init_service(
            App::new()
                .app_data(test_resolver())
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "lyricsnap API is running!");
    }

    #[actix_web::test]
    async fn test_extract_rejects_invalid_url_without_lookups() {
        let app = test::init_service(
            App::new()
                .app_data(test_resolver())
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/extract")
            .set_json(serde_json::json!({ "youtube_url": "not-a-url" }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["lyrics"], "Invalid video URL");
        assert_eq!(body["metadata"]["title"], "");
        assert_eq!(body["metadata"]["artist"], "");
    }
}
