use crate::admission_request::AdmissionRequest;
use crate::admission_response::AdmissionResponse;

pub const ADMISSION_REVIEW_API_VERSION: &str = "admission.k8s.io/v1";
pub const ADMISSION_REVIEW_KIND: &str = "AdmissionReview";

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub request: AdmissionRequest,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub response: AdmissionResponse,
}

impl AdmissionReviewResponse {
    /// Wrap `response` into an envelope carrying the same `apiVersion` and
    /// `kind` as the review it answers. The API server matches the two, so
    /// they are copied rather than picked here. Reviews that omit them get
    /// the admission.k8s.io/v1 values.
    pub fn for_request(
        review: &AdmissionReviewRequest,
        response: AdmissionResponse,
    ) -> AdmissionReviewResponse {
        AdmissionReviewResponse {
            api_version: Some(
                review
                    .api_version
                    .clone()
                    .unwrap_or_else(|| String::from(ADMISSION_REVIEW_API_VERSION)),
            ),
            kind: Some(
                review
                    .kind
                    .clone()
                    .unwrap_or_else(|| String::from(ADMISSION_REVIEW_KIND)),
            ),
            response,
        }
    }
}
