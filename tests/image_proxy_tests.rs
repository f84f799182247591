// tests/image_proxy_tests.rs - /api/image-proxy against a local upstream
//
// Requires the ssr feature:
//   cargo test --features ssr --test image_proxy_tests

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpResponse, HttpServer};
use catalog_proposals::web_app::api::image_proxy::{self, ImageProxy, PROXY_PATH};
use catalog_proposals::web_app::export::images::PLACEHOLDER_PNG;

const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

/// Upstream serving /ok.gif (with a content type), /bare (none) and a 500 at /fail
async fn start_upstream() -> anyhow::Result<SocketAddr> {
    let server = HttpServer::new(|| {
        App::new()
            .route("/ok.gif", web::get().to(|| async { HttpResponse::Ok().content_type("image/gif").body(GIF) }))
            .route("/bare", web::get().to(|| async { HttpResponse::Ok().body(GIF) }))
            .route("/fail", web::get().to(|| async { HttpResponse::InternalServerError().finish() }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Ok(addr)
}

fn proxy() -> ImageProxy {
    ImageProxy::new(Duration::from_secs(5), PLACEHOLDER_PNG.to_vec()).expect("proxy client")
}

fn proxied(url: &str) -> String {
    format!("{}?url={}", PROXY_PATH, urlencoding::encode(url))
}

#[actix_web::test]
async fn test_proxies_upstream_bytes_and_content_type() -> anyhow::Result<()> {
    let upstream = start_upstream().await?;
    let app = test::init_service(App::new().app_data(web::Data::new(proxy())).configure(image_proxy::configure)).await;

    let req = test::TestRequest::get().uri(&proxied(&format!("http://{upstream}/ok.gif"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/gif");
    assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "public, max-age=3600");
    assert_eq!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), GIF);
    Ok(())
}

#[actix_web::test]
async fn test_missing_content_type_defaults_to_jpeg() -> anyhow::Result<()> {
    let upstream = start_upstream().await?;
    let app = test::init_service(App::new().app_data(web::Data::new(proxy())).configure(image_proxy::configure)).await;

    let req = test::TestRequest::get().uri(&proxied(&format!("http://{upstream}/bare"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/jpeg");
    Ok(())
}

#[actix_web::test]
async fn test_upstream_error_serves_placeholder() -> anyhow::Result<()> {
    let upstream = start_upstream().await?;
    let app = test::init_service(App::new().app_data(web::Data::new(proxy())).configure(image_proxy::configure)).await;

    for url in [format!("http://{upstream}/fail"), "http://127.0.0.1:9/unreachable.png".to_string()] {
        let req = test::TestRequest::get().uri(&proxied(&url)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "placeholder for {url}");
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "public, max-age=300");
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), PLACEHOLDER_PNG);
    }
    Ok(())
}

#[actix_web::test]
async fn test_bad_requests() {
    let app = test::init_service(App::new().app_data(web::Data::new(proxy())).configure(image_proxy::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(PROXY_PATH).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await.as_ref(), b"Missing url parameter");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&proxied("file:///etc/passwd")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
