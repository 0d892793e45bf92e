use json_patch::{jsonptr::PointerBuf, AddOperation, Patch, PatchOperation};
use k8s_openapi::api::core::v1::Container;

use crate::errors::{InjectorError, Result};

/// Appends to the containers list of the Pod. The `-` token is valid even
/// when the list is empty.
pub const CONTAINERS_APPEND_PATH: &str = "/spec/containers/-";

/// Turn the injection decision into a JSON Patch.
///
/// No container means no mutation, hence an empty patch. Otherwise the patch
/// holds a single `add` operation; the injector never removes nor replaces.
pub fn build_patch(sidecar: Option<&Container>) -> Result<Patch> {
    let Some(container) = sidecar else {
        return Ok(Patch(Vec::new()));
    };

    let value = serde_json::to_value(container).map_err(InjectorError::ContainerSerialization)?;
    let path = PointerBuf::parse(CONTAINERS_APPEND_PATH)
        .map_err(|e| InjectorError::InvalidPatchPath(e.to_string()))?;

    Ok(Patch(vec![PatchOperation::Add(AddOperation { path, value })]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::build_sidecar;
    use serde_json::json;

    #[test]
    fn no_sidecar_no_operations() {
        let patch = build_patch(None).unwrap();
        assert!(patch.0.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!([]));
    }

    #[test]
    fn single_add_operation() {
        let container = build_sidecar("oauth-sidecar", "bitnami/oauth2-proxy:latest", None);

        let patch = build_patch(Some(&container)).unwrap();

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([{
                "op": "add",
                "path": "/spec/containers/-",
                "value": {
                    "name": "oauth-sidecar",
                    "image": "bitnami/oauth2-proxy:latest",
                    "args": [""],
                },
            }])
        );
    }

    #[test]
    fn patch_value_decodes_back_into_the_container() {
        let container = build_sidecar(
            "oauth-sidecar",
            "bitnami/oauth2-proxy:latest",
            Some("--cookie-secure=false --upstream=http://127.0.0.1:8080"),
        );

        let patch = build_patch(Some(&container)).unwrap();
        let [PatchOperation::Add(operation)] = patch.0.as_slice() else {
            panic!("expected a single add operation, got {patch:?}");
        };

        let decoded: Container = serde_json::from_value(operation.value.clone()).unwrap();
        assert_eq!(decoded, container);
    }

    #[test]
    fn patch_applies_to_pod_without_containers() {
        let mut pod = json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "nginx"},
            "spec": {"containers": []},
        });
        let container = build_sidecar("oauth-sidecar", "bitnami/oauth2-proxy:latest", None);

        json_patch::patch(&mut pod, &build_patch(Some(&container)).unwrap()).unwrap();

        assert_eq!(pod["spec"]["containers"][0]["name"], "oauth-sidecar");
    }
}
