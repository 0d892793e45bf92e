pub mod admission_request;
pub mod admission_response;
pub mod api;
mod certs;
pub mod cli;
pub mod config;
pub mod errors;
pub mod injection;
pub mod patch;
pub mod review;
pub mod tracing;

use anyhow::{anyhow, Result};
use axum::{
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::{self, TraceLayer};

use ::tracing::{info, Level};

use crate::api::{
    handlers::{mutate_handler, readiness_handler},
    state::ApiServerState,
};
use crate::certs::create_tls_config_and_watch_certificate_changes;
use crate::config::Config;
use crate::injection::Injector;

/// The admission webhook: routes the API server requests to the injector.
pub struct SidecarInjectorServer {
    router: Router,
    addr: SocketAddr,
    tls_config: Option<RustlsConfig>,
}

impl SidecarInjectorServer {
    pub async fn new_from_config(config: Config) -> Result<Self> {
        info!(
            container_name = config.sidecar.container_name.as_str(),
            image = config.sidecar.image.as_str(),
            "sidecar configuration"
        );

        let state = Arc::new(ApiServerState {
            injector: Injector::new(config.sidecar),
        });

        let tls_config = match config.tls_config {
            Some(tls_config) => {
                Some(create_tls_config_and_watch_certificate_changes(tls_config).await?)
            }
            None => None,
        };

        let router = Router::new()
            .route("/mutate", post(mutate_handler))
            .with_state(state)
            .route("/readiness", get(readiness_handler))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
            );

        Ok(Self {
            router,
            addr: config.addr,
            tls_config,
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn run(self) -> Result<()> {
        info!("OAuth sidecar injector is now running");

        match self.tls_config {
            Some(tls_config) => {
                info!(address = self.addr.to_string().as_str(), "started HTTPS server");
                axum_server::bind_rustls(self.addr, tls_config)
                    .serve(self.router.into_make_service())
                    .await
                    .map_err(|e| anyhow!("HTTPS server error: {e}"))?;
            }
            None => {
                info!(address = self.addr.to_string().as_str(), "started HTTP server");
                axum_server::bind(self.addr)
                    .serve(self.router.into_make_service())
                    .await
                    .map_err(|e| anyhow!("HTTP server error: {e}"))?;
            }
        }

        Ok(())
    }
}
