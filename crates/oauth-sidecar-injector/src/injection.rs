pub mod policy;
pub mod sidecar;

use k8s_openapi::api::core::v1::{Container, Pod};

use crate::config::SidecarConfig;

pub use policy::{should_inject, InjectionMode, InjectionPolicy};
pub use sidecar::build_sidecar;

/// Decides, for a single Pod, which sidecar has to be injected.
///
/// The sidecar configuration is handed over at construction time; the injector
/// has no other state and can be shared between concurrent requests.
#[derive(Debug, Clone)]
pub struct Injector {
    sidecar: SidecarConfig,
}

impl Injector {
    pub fn new(sidecar: SidecarConfig) -> Self {
        Self { sidecar }
    }

    pub fn sidecar_config(&self) -> &SidecarConfig {
        &self.sidecar
    }

    /// The container to append to `pod`, or `None` when the Pod must be left as it is.
    pub fn sidecar_for(&self, pod: &Pod) -> Option<Container> {
        let policy = InjectionPolicy::from_pod(pod);
        if !policy.requires_sidecar(pod, &self.sidecar.container_name) {
            return None;
        }

        Some(build_sidecar(
            &self.sidecar.container_name,
            &self.sidecar.image,
            policy.args.as_deref(),
        ))
    }
}
