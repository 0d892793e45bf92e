use anyhow::{anyhow, Result};
use tokio::runtime::Runtime;

use oauth_sidecar_injector::{cli, config::Config, tracing::setup_tracing, SidecarInjectorServer};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    // Starting from rustls 0.22, each application must set its default crypto provider.
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Cannot install the rustls crypto provider"))?;

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;

        let server = SidecarInjectorServer::new_from_config(config).await?;
        server.run().await
    })
}
