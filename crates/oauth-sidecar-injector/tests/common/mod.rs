use axum::Router;
use oauth_sidecar_injector::{
    config::{Config, SidecarConfig},
    SidecarInjectorServer,
};
use std::net::SocketAddr;

pub(crate) fn default_test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 8443)),
        tls_config: None,
        sidecar: SidecarConfig::default(),
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) async fn app(config: Config) -> Router {
    let server = SidecarInjectorServer::new_from_config(config).await.unwrap();

    server.router()
}
