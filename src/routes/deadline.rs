use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use std::time::Duration;
use tracing::warn;

use crate::WishlistError;

const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Upper bound for handling one request, registered as app data
#[derive(Debug, Clone, Copy)]
pub struct RequestDeadline(pub Duration);

/// Answers 504 once the request has been in flight longer than its deadline
pub async fn enforce_deadline(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let deadline = req
        .app_data::<web::Data<RequestDeadline>>()
        .map(|d| d.0)
        .unwrap_or(DEFAULT_DEADLINE);
    let path = req.path().to_string();

    match tokio::time::timeout(deadline, next.call(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, deadline_secs = deadline.as_secs_f64(), "request deadline exceeded");
            Err(WishlistError::Timeout.into())
        }
    }
}
