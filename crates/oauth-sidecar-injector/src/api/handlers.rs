use axum::{
    body::Bytes,
    extract,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error, info, Span};

use crate::{
    admission_request::AdmissionRequest,
    admission_response::AdmissionResponse,
    api::{admission_review::AdmissionReviewResponse, api_error::ApiError, state::ApiServerState},
    errors::InjectorError,
    review::ReceivedReview,
};

// note about tracing: the fields are declared empty and filled once the
// admission review has been decoded, requests that fail before that point
// are still traced.
#[tracing::instrument(
    name = "mutation",
    fields(
        request_uid=tracing::field::Empty,
        host=crate::config::HOSTNAME.as_str(),
        name=tracing::field::Empty,
        namespace=tracing::field::Empty,
        operation=tracing::field::Empty,
        kind=tracing::field::Empty,
        resource=tracing::field::Empty,
        allowed=tracing::field::Empty,
        mutated=tracing::field::Empty,
    ),
    skip_all)]
/// Inject the sidecar into the Pod carried by the admission review, when the Pod asks for it.
pub(crate) async fn mutate_handler(
    extract::State(state): extract::State<Arc<ApiServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AdmissionReviewResponse>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let validated = ReceivedReview {
        content_type,
        body: &body,
    }
    .validate()
    .map_err(handle_injector_error)?;

    populate_span_with_admission_request_data(validated.request());

    let decided = validated
        .decide(&state.injector)
        .map_err(handle_injector_error)?;
    if decided.is_mutation() {
        info!(
            sidecar = state.injector.sidecar_config().container_name.as_str(),
            "injecting sidecar"
        );
    }

    let review = decided.respond().map_err(handle_injector_error)?;

    populate_span_with_admission_response(&review.response);
    debug!(response =? &review.response, "admission review processed");

    Ok(Json(review))
}

pub(crate) async fn readiness_handler() -> StatusCode {
    StatusCode::OK
}

fn populate_span_with_admission_request_data(adm_req: &AdmissionRequest) {
    Span::current().record("kind", adm_req.kind.kind.as_str());
    Span::current().record("name", adm_req.name.clone().unwrap_or_default().as_str());
    Span::current().record(
        "namespace",
        adm_req.namespace.clone().unwrap_or_default().as_str(),
    );
    Span::current().record("operation", adm_req.operation.as_str());
    Span::current().record("request_uid", adm_req.uid.as_str());
    Span::current().record("resource", adm_req.resource.resource.as_str());
}

fn populate_span_with_admission_response(response: &AdmissionResponse) {
    Span::current().record("allowed", response.allowed);
    Span::current().record("mutated", response.patch.is_some());
}

fn handle_injector_error(error: InjectorError) -> ApiError {
    if error.is_client_error() {
        debug!(error = %error, "rejecting admission review");
    } else {
        error!(error = %error, "cannot process admission review");
    }

    ApiError::from(error)
}
