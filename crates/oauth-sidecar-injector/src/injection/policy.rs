use k8s_openapi::api::core::v1::Pod;

/// Annotation a Pod must carry, set to `"true"`, to opt into the injection.
pub const ENABLE_ANNOTATION: &str = "add-oauth-sidecar";

/// Annotation holding the space separated arguments of the sidecar.
pub const ARGS_ANNOTATION: &str = "oauth-sidecar-args";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InjectionMode {
    Enabled,
    #[default]
    Disabled,
}

impl InjectionMode {
    /// Only the exact string `true` enables the injection: `True`, `yes` or
    /// `1` keep it disabled.
    pub fn from_annotation(value: Option<&str>) -> Self {
        match value {
            Some("true") => InjectionMode::Enabled,
            _ => InjectionMode::Disabled,
        }
    }
}

/// The injection settings a Pod asks for through its annotations.
/// Built for every admission request and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionPolicy {
    pub mode: InjectionMode,
    pub args: Option<String>,
}

impl InjectionPolicy {
    pub fn from_pod(pod: &Pod) -> Self {
        let annotations = pod.metadata.annotations.as_ref();
        let annotation = |key: &str| annotations.and_then(|a| a.get(key)).map(String::as_str);

        InjectionPolicy {
            mode: InjectionMode::from_annotation(annotation(ENABLE_ANNOTATION)),
            args: annotation(ARGS_ANNOTATION).map(str::to_owned),
        }
    }

    /// Whether `pod`, which this policy was read from, still lacks the
    /// `sidecar_name` container it asks for.
    pub fn requires_sidecar(&self, pod: &Pod, sidecar_name: &str) -> bool {
        match self.mode {
            InjectionMode::Disabled => false,
            InjectionMode::Enabled => !has_container(pod, sidecar_name),
        }
    }
}

fn has_container(pod: &Pod, name: &str) -> bool {
    pod.spec
        .as_ref()
        .is_some_and(|spec| spec.containers.iter().any(|c| c.name == name))
}

/// Decide whether the sidecar named `sidecar_name` has to be added to `pod`.
///
/// Pods that did not opt in are left alone, and so are Pods already running a
/// container with the sidecar name: admitting the same Pod twice never adds a
/// second sidecar.
pub fn should_inject(pod: &Pod, sidecar_name: &str) -> bool {
    InjectionPolicy::from_pod(pod).requires_sidecar(pod, sidecar_name)
}
