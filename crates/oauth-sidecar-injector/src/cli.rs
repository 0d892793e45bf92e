use clap::builder::PossibleValue;
use clap::{crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    let mut args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("OAUTH_SIDECAR_LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("OAUTH_SIDECAR_LOG_FMT")
            .default_value("text")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .help("Disable colored output for logs"),
        Arg::new("address")
            .long("addr")
            .value_name("BIND_ADDRESS")
            .default_value("0.0.0.0")
            .env("OAUTH_SIDECAR_BIND_ADDRESS")
            .help("Bind against ADDRESS"),
        Arg::new("port")
            .long("port")
            .value_name("PORT")
            .default_value("8443")
            .env("OAUTH_SIDECAR_PORT")
            .help("Listen on PORT"),
        Arg::new("cert-file")
            .long("cert-file")
            .value_name("CERT_FILE")
            .default_value("webhook-server-tls.crt")
            .env("OAUTH_SIDECAR_CERT_FILE")
            .help(
                "Path to an X.509 certificate file for HTTPS. \
                 Set both this and --key-file to an empty string to serve plain HTTP",
            ),
        Arg::new("key-file")
            .long("key-file")
            .value_name("KEY_FILE")
            .default_value("webhook-server-tls.key")
            .env("OAUTH_SIDECAR_KEY_FILE")
            .help("Path to an X.509 private key file for HTTPS"),
        Arg::new("container-name")
            .long("container-name")
            .value_name("CONTAINER_NAME")
            .default_value("oauth-sidecar")
            .env("OAUTH_SIDECAR_CONTAINER_NAME")
            .help("Name of the injected OAuth proxy container"),
        Arg::new("container-image")
            .long("container-image")
            .value_name("CONTAINER_IMAGE")
            .default_value("bitnami/oauth2-proxy:latest")
            .env("OAUTH_SIDECAR_CONTAINER_IMAGE")
            .help("Image of the injected OAuth proxy container"),
    ];
    args.sort_by(|a, b| a.get_id().cmp(b.get_id()));

    Command::new(crate_name!())
        .author(crate_authors!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
