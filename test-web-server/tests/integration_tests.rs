//! Integration tests for the test web server.
//!
//! These tests start a real HTTP server, send actual HTTP requests,
//! and verify end-to-end functionality.

use test_web_server::TestWebServer;

#[test]
fn test_serves_registered_body() {
    let server = TestWebServer::start().expect("server starts");

    let html = "<html><head>Header</head><body>Body</body></html>";
    let url = server.set_response("/test.html", html, &[]);

    let response = reqwest::blocking::get(&url).expect("request succeeds");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().unwrap(), html);

    assert_eq!(server.request_count("/test.html"), 1);
    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_serves_registered_headers() {
    let server = TestWebServer::start().expect("server starts");

    let url = server.set_response(
        "/page.html",
        "<html></html>",
        &[("Content-Type", "text/html"), ("Cache-Control", "no-store")],
    );

    let response = reqwest::blocking::get(&url).expect("request succeeds");
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "text/html"
    );
    assert_eq!(
        response.headers().get("Cache-Control").unwrap(),
        "no-store"
    );

    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_unregistered_path_is_not_found() {
    let server = TestWebServer::start().expect("server starts");

    let url = server.response_url("/missing.html");
    let response = reqwest::blocking::get(&url).expect("request succeeds");
    assert_eq!(response.status(), 404);

    // 404s still count as served requests for the path.
    assert_eq!(server.request_count("/missing.html"), 1);
    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_request_counts_increment_per_fetch() {
    let server = TestWebServer::start().expect("server starts");

    let url = server.set_response("/counted.html", "<html></html>", &[]);
    for _ in 0..3 {
        reqwest::blocking::get(&url).expect("request succeeds");
    }

    assert_eq!(server.request_count("/counted.html"), 3);
    assert_eq!(server.request_count("/other.html"), 0);
    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_redirect_sends_location() {
    let server = TestWebServer::start().expect("server starts");

    let destination = server.set_response("/destination.html", "<html></html>", &[]);
    let redirect_url = server.set_redirect("/from.html", &destination);

    let client = reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = client.get(&redirect_url).send().expect("request succeeds");

    assert_eq!(response.status(), 302);
    assert_eq!(
        response.headers().get("Location").unwrap(),
        destination.as_str()
    );

    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_replacing_a_response_keeps_counts() {
    let server = TestWebServer::start().expect("server starts");

    let url = server.set_response("/page.html", "first", &[]);
    reqwest::blocking::get(&url).expect("request succeeds");

    server.set_response("/page.html", "second", &[]);
    let response = reqwest::blocking::get(&url).expect("request succeeds");
    assert_eq!(response.text().unwrap(), "second");
    assert_eq!(server.request_count("/page.html"), 2);

    server.shutdown().expect("clean shutdown");
}

#[test]
fn test_drop_releases_listener() {
    let port = {
        let server = TestWebServer::start().expect("server starts");
        server.set_response("/page.html", "<html></html>", &[]);
        server.port()
        // Dropped here without an explicit shutdown.
    };

    // The old port must be bindable again once drop has joined the
    // server thread.
    std::net::TcpListener::bind(("127.0.0.1", port))
        .expect("port released after drop");
}
