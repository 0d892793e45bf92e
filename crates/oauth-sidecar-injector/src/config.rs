use anyhow::{anyhow, Result};
use clap::ArgMatches;
use lazy_static::lazy_static;
use std::net::SocketAddr;
use std::path::PathBuf;

lazy_static! {
    pub(crate) static ref HOSTNAME: String =
        std::env::var("HOSTNAME").unwrap_or_else(|_| String::from("unknown"));
}

pub struct Config {
    pub addr: SocketAddr,
    pub tls_config: Option<TlsConfig>,
    pub sidecar: SidecarConfig,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
}

pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

/// The container injected into the Pods. Fixed for the whole process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarConfig {
    pub container_name: String,
    pub image: String,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        SidecarConfig {
            container_name: String::from("oauth-sidecar"),
            image: String::from("bitnami/oauth2-proxy:latest"),
        }
    }
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let addr = api_bind_address(matches)?;

        let (cert_file, key_file) = tls_files(matches)?;
        let tls_config = if cert_file.is_empty() {
            None
        } else {
            Some(TlsConfig {
                cert_file: PathBuf::from(cert_file),
                key_file: PathBuf::from(key_file),
            })
        };

        let sidecar = sidecar_config(matches)?;

        let log_level = matches
            .get_one::<String>("log-level")
            .expect("This should not happen, there's a default value for log-level")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("This should not happen, there's a default value for log-fmt")
            .to_owned();
        let log_no_color = matches
            .get_one::<bool>("log-no-color")
            .expect("clap should have assigned a default value")
            .to_owned();

        Ok(Self {
            addr,
            tls_config,
            sidecar,
            log_level,
            log_fmt,
            log_no_color,
        })
    }
}

fn api_bind_address(matches: &ArgMatches) -> Result<SocketAddr> {
    let address = matches
        .get_one::<String>("address")
        .ok_or_else(|| anyhow!("error parsing arguments: missing --addr"))?;
    let port = matches
        .get_one::<String>("port")
        .ok_or_else(|| anyhow!("error parsing arguments: missing --port"))?;

    format!("{address}:{port}")
        .parse()
        .map_err(|e| anyhow!("error parsing arguments: {}", e))
}

fn tls_files(matches: &ArgMatches) -> Result<(String, String)> {
    let cert_file = matches
        .get_one::<String>("cert-file")
        .cloned()
        .unwrap_or_default();
    let key_file = matches
        .get_one::<String>("key-file")
        .cloned()
        .unwrap_or_default();
    if cert_file.is_empty() != key_file.is_empty() {
        Err(anyhow!(
            "error parsing arguments: either both --cert-file and --key-file \
             must be provided, or neither"
        ))
    } else {
        Ok((cert_file, key_file))
    }
}

fn sidecar_config(matches: &ArgMatches) -> Result<SidecarConfig> {
    let container_name = matches
        .get_one::<String>("container-name")
        .expect("This should not happen, there's a default value for container-name")
        .to_owned();
    let image = matches
        .get_one::<String>("container-image")
        .expect("This should not happen, there's a default value for container-image")
        .to_owned();

    if container_name.is_empty() {
        return Err(anyhow!("error parsing arguments: --container-name cannot be empty"));
    }
    if image.is_empty() {
        return Err(anyhow!("error parsing arguments: --container-image cannot be empty"));
    }

    Ok(SidecarConfig {
        container_name,
        image,
    })
}
