use k8s_openapi::api::core::v1::Container;

/// Split the arguments annotation on the space character. No quoting nor
/// escaping is supported.
///
/// A missing or empty annotation produces a single empty argument rather than
/// no arguments at all. Webhooks already deployed rely on this, see DESIGN.md.
pub fn parse_args(args: Option<&str>) -> Vec<String> {
    args.unwrap_or_default()
        .split(' ')
        .map(str::to_owned)
        .collect()
}

/// Build the sidecar container. Name and image always come from the injector
/// configuration, never from the Pod being admitted.
pub fn build_sidecar(name: &str, image: &str, args: Option<&str>) -> Container {
    Container {
        name: name.to_owned(),
        image: Some(image.to_owned()),
        args: Some(parse_args(args)),
        ..Default::default()
    }
}
