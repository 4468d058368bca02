//! Shared setup for the integration tests: a mock booking service on a
//! random port, log capture, and the suite scenarios.

#![allow(dead_code)]

pub mod scenarios;

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness's captured stdout.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Base URL of a mock service shared by every test in this binary.
///
/// Tests play the part of parallel workers against one remote service, so
/// the server is started once and never reset.
pub fn mock_base_url() -> &'static str {
    static BASE_URL: OnceLock<String> = OnceLock::new();
    BASE_URL.get_or_init(spawn_mock_server)
}

/// Start a fresh mock service on a random port and return its base URL.
pub fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            booker_mock::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}
