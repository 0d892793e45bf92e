//! The steps an admission review goes through, from the raw HTTP body to
//! the review sent back to the API server:
//!
//! `Received -> Validated -> Decided -> Responded`
//!
//! Each step consumes the previous one, so a review cannot be answered before
//! it has been validated and decided. Every failure ends the review with an
//! [`InjectorError`]; nothing is retried.

use k8s_openapi::api::core::v1::Pod;

use crate::admission_request::{AdmissionRequest, GroupVersionResource};
use crate::admission_response::AdmissionResponse;
use crate::api::admission_review::{AdmissionReviewRequest, AdmissionReviewResponse};
use crate::errors::{InjectorError, Result};
use crate::injection::Injector;
use crate::patch::build_patch;

/// A review as it came off the wire.
pub struct ReceivedReview<'a> {
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

/// A review targeting Pods, sent as JSON.
#[derive(Debug)]
pub struct ValidatedReview {
    review: AdmissionReviewRequest,
}

/// A review whose patch has been computed. The patch is empty when the Pod
/// does not need the sidecar.
#[derive(Debug)]
pub struct DecidedReview {
    review: AdmissionReviewRequest,
    patch: json_patch::Patch,
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .is_some_and(|ct| ct.essence_str() == mime::APPLICATION_JSON.essence_str())
}

impl ReceivedReview<'_> {
    pub fn validate(self) -> Result<ValidatedReview> {
        if !is_json(self.content_type) {
            return Err(InjectorError::UnsupportedContentType);
        }

        let review: AdmissionReviewRequest =
            serde_json::from_slice(self.body).map_err(InjectorError::InvalidAdmissionReview)?;

        if review.request.resource != GroupVersionResource::pods() {
            return Err(InjectorError::UnsupportedResource(
                review.request.resource.resource.clone(),
            ));
        }

        Ok(ValidatedReview { review })
    }
}

impl ValidatedReview {
    pub fn request(&self) -> &AdmissionRequest {
        &self.review.request
    }

    /// Decode the Pod carried by the review. The envelope promised a Pod, a
    /// missing or broken object is an internal error, not a client one.
    pub fn pod(&self) -> Result<Pod> {
        let object = self
            .review
            .request
            .object
            .as_ref()
            .ok_or_else(|| InjectorError::PodDecoding("request has no object".to_owned()))?;

        serde_json::from_value(object.0.clone())
            .map_err(|e| InjectorError::PodDecoding(e.to_string()))
    }

    pub fn decide(self, injector: &Injector) -> Result<DecidedReview> {
        let pod = self.pod()?;
        let sidecar = injector.sidecar_for(&pod);
        let patch = build_patch(sidecar.as_ref())?;

        Ok(DecidedReview {
            review: self.review,
            patch,
        })
    }
}

impl DecidedReview {
    pub fn patch(&self) -> &json_patch::Patch {
        &self.patch
    }

    pub fn is_mutation(&self) -> bool {
        !self.patch.0.is_empty()
    }

    /// Build the review sent back to the API server: same uid, same
    /// `apiVersion`/`kind`, always allowed.
    pub fn respond(self) -> Result<AdmissionReviewResponse> {
        let response =
            AdmissionResponse::allow(self.review.request.uid.clone()).with_patch(&self.patch)?;

        Ok(AdmissionReviewResponse::for_request(&self.review, response))
    }
}
