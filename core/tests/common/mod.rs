//! Shared setup for the integration scenarios.
//!
//! With `API_BASE_URL` unset, the mock server is started on a random loopback
//! port (once per test binary) and every scenario targets it. With
//! `API_BASE_URL` set, scenarios run against that service instead.

use std::net::SocketAddr;

use api_harness::config::BASE_URL_VAR;
use api_harness::{ApiClient, HarnessConfig, Specs};

/// The process-wide specs, installed on first use.
pub fn specs() -> &'static Specs {
    Specs::get_or_install(|| {
        api_harness::init_logging();
        let mut config = HarnessConfig::from_env().expect("invalid harness configuration");
        if std::env::var(BASE_URL_VAR).is_err() {
            config.base_url = format!("http://{}", start_mock_server());
        }
        Specs::from_config(&config)
    })
}

pub fn client() -> ApiClient<'static> {
    ApiClient::new(&specs().request)
}

fn start_mock_server() -> SocketAddr {
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
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}
