use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::errors::{InjectorError, Result};

/// This models the admission/v1/AdmissionResponse object of Kubernetes
/// See https://pkg.go.dev/k8s.io/kubernetes/pkg/apis/admission#AdmissionResponse
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    /// UID is an identifier for the individual request/response.
    /// This must be copied over from the corresponding AdmissionRequest.
    pub uid: String,

    /// Allowed indicates whether or not the admission request was permitted.
    pub allowed: bool,

    /// The type of Patch. Currently we only allow "JSONPatch".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_type: Option<PatchType>,

    /// The patch body, a base64 encoded RFC 6902 JSON Patch document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

/// PatchType is the type of patch being used to represent the mutated object
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub enum PatchType {
    #[serde(rename = "JSONPatch")]
    #[default]
    JSONPatch,
}

impl AdmissionResponse {
    /// The injector never rejects: every response it builds is allowed.
    pub fn allow(uid: String) -> AdmissionResponse {
        AdmissionResponse {
            uid,
            allowed: true,
            ..Default::default()
        }
    }

    /// Attach the given patch. An empty patch leaves the response untouched,
    /// the API server must not receive a `patchType` without operations.
    pub fn with_patch(mut self, patch: &json_patch::Patch) -> Result<AdmissionResponse> {
        if patch.0.is_empty() {
            return Ok(self);
        }

        let encoded = serde_json::to_string(patch)
            .map(|s| general_purpose::STANDARD.encode(s))
            .map_err(InjectorError::PatchSerialization)?;

        self.patch_type = Some(PatchType::JSONPatch);
        self.patch = Some(encoded);
        Ok(self)
    }

    /// Decode the patch carried by this response, if any.
    pub fn decoded_patch(&self) -> Option<json_patch::Patch> {
        let patch = self.patch.as_ref()?;
        let raw = general_purpose::STANDARD.decode(patch).ok()?;
        serde_json::from_slice(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn allow_without_patch() {
        let response = AdmissionResponse::allow(String::from("UID"))
            .with_patch(&json_patch::Patch(vec![]))
            .unwrap();

        assert_eq!(response.uid, "UID");
        assert!(response.allowed);
        assert_eq!(response.patch, None);
        assert_eq!(response.patch_type, None);

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized, json!({"uid": "UID", "allowed": true}));
    }

    #[test]
    fn allow_with_patch() {
        let patch: json_patch::Patch = serde_json::from_value(json!([
            {"op": "add", "path": "/spec/containers/-", "value": {"name": "proxy"}}
        ]))
        .unwrap();

        let response = AdmissionResponse::allow(String::from("UID"))
            .with_patch(&patch)
            .unwrap();

        assert!(response.allowed);
        assert_eq!(response.patch_type, Some(PatchType::JSONPatch));
        assert_eq!(response.decoded_patch(), Some(patch));

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["patchType"], "JSONPatch");
    }
}
