//! Integration test: the whole load cycle from raw address to page.

mod common;

use common::mctp_server;
use mctp_core::config::ClientConfig;
use mctp_core::page::{self, Page};

fn load_local(port: u16, path: &str) -> Page {
    page::load(&format!("127.0.0.1:{port}{path}"), &ClientConfig::default())
}

#[test]
fn metadata_title_and_rendered_body() {
    let server = mctp_server::start(
        "<head>\n<title>Field Notes</title>\n<meta name=\"author\" content=\"k\">\n</head>\n\n# Day one\n\nIt rained.\n",
    );
    let page = load_local(server.port, "/notes.md");

    assert_eq!(page.title, "Field Notes");
    let head_end = page.document.find("</head>").unwrap();
    let (head, body) = page.document.split_at(head_end);
    assert!(head.contains("<title>Field Notes</title>\n<meta name=\"author\" content=\"k\">"));
    assert!(!head.contains("Day one"));
    assert!(body.contains("<h1>Day one</h1>"));
    assert!(body.contains("<p>It rained.</p>"));
    assert!(!body.contains("Field Notes"));
    assert_eq!(
        page.address.as_deref(),
        Some(format!("127.0.0.1:{}/notes.md", server.port).as_str())
    );
}

#[test]
fn title_falls_back_to_host_and_path() {
    let server = mctp_server::start("# Untitled\n");
    let page = load_local(server.port, "/");
    assert_eq!(page.title, "127.0.0.1/index.md");
    assert!(page.document.contains("<h1>Untitled</h1>"));
    assert_eq!(
        server.requests()[0],
        "MCTP/1.0\nHost: 127.0.0.1\nRequest: GET /index.md\n\n"
    );
}

#[test]
fn unreachable_server_still_yields_a_page() {
    let port = mctp_server::closed_port();
    let page = page::load(&format!("mctp://127.0.0.1:{port}/a.md"), &ClientConfig::default());
    assert!(page.document.contains("<h1>Error</h1>"));
    assert!(page
        .document
        .contains(&format!("Could not fetch content from MCTP server at 127.0.0.1:{port}")));
    assert_eq!(page.title, "127.0.0.1/a.md");
    assert!(page.address.is_some());
}

#[test]
fn configured_default_port_is_used() {
    let server = mctp_server::start("<head><title>Home</title></head>");
    let cfg = ClientConfig {
        default_port: server.port,
        ..ClientConfig::default()
    };
    let page = page::load("127.0.0.1", &cfg);
    assert_eq!(page.title, "Home");
    assert_eq!(page.address.as_deref(), Some("127.0.0.1/index.md"));
}

#[test]
fn rejected_schemes_never_connect() {
    let server = mctp_server::start("unused");
    let page = page::load(
        &format!("http://127.0.0.1:{}/", server.port),
        &ClientConfig::default(),
    );
    assert_eq!(page.title, "Invalid Protocol");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn async_load_runs_on_blocking_pool() {
    let server = mctp_server::start("<head><title>Async</title></head>\ntext");
    let page = page::load_async(
        format!("127.0.0.1:{}/a.md", server.port),
        ClientConfig::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.title, "Async");
}
