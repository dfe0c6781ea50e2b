//! Error dispatch and panic recovery boundary.
//!
//! Wraps the whole application so that domain errors become JSON error
//! responses, unexpected errors are replaced with a generic internal-error
//! body, and panics are recovered into the same generic body. No other
//! layer writes error responses.
//!
//! Per request the outcome is terminal: success passes through, a domain
//! error renders with its own status, anything else renders as a 500. Each
//! failure log record carries a generated request identifier for
//! correlation.

use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;
use uuid::Uuid;

use crate::domain::Error;

/// Middleware converting handler outcomes into wire responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use ramen_blog::middleware::Dispatch;
///
/// let app = App::new().wrap(Dispatch);
/// ```
#[derive(Clone)]
pub struct Dispatch;

impl<S, B> Transform<S, ServiceRequest> for Dispatch
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = DispatchMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DispatchMiddleware { service }))
    }
}

/// Service wrapper produced by [`Dispatch`].
pub struct DispatchMiddleware<S> {
    service: S,
}

/// How a completed response relates to the error taxonomy.
enum Outcome {
    /// No error attached; pass the response through untouched.
    Clean,
    /// A domain error rendered its own body; already logged.
    Domain,
    /// A non-domain error; its body must not reach the client.
    Unexpected,
}

fn generic_internal_response() -> HttpResponse {
    Error::internal("unexpected error occurred").error_response()
}

fn classify(response: &ServiceResponse<impl MessageBody>, request_id: Uuid) -> Outcome {
    let Some(err) = response.response().error() else {
        return Outcome::Clean;
    };
    let method = response.request().method();
    let path = response.request().path();
    match err.as_error::<Error>() {
        Some(app_error) => {
            error!(
                %request_id,
                %method,
                path,
                code = ?app_error.code(),
                error = %app_error,
                "request failed"
            );
            Outcome::Domain
        }
        None => {
            error!(%request_id, %method, path, error = %err, "unexpected handler error");
            Outcome::Unexpected
        }
    }
}

fn error_to_response(err: &actix_web::Error, request: &HttpRequest, request_id: Uuid) -> HttpResponse {
    let method = request.method();
    let path = request.path();
    match err.as_error::<Error>() {
        Some(app_error) => {
            error!(
                %request_id,
                %method,
                path,
                code = ?app_error.code(),
                error = %app_error,
                "request failed"
            );
            app_error.error_response()
        }
        None => {
            error!(%request_id, %method, path, error = %err, "unexpected request error");
            generic_internal_response()
        }
    }
}

fn panic_description(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

impl<S, B> Service<ServiceRequest> for DispatchMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let request_id = Uuid::new_v4();
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => match classify(&res, request_id) {
                    Outcome::Clean | Outcome::Domain => Ok(res.map_into_boxed_body()),
                    Outcome::Unexpected => {
                        Ok(ServiceResponse::new(request, generic_internal_response()))
                    }
                },
                Ok(Err(err)) => {
                    let response = error_to_response(&err, &request, request_id);
                    Ok(ServiceResponse::new(request, response))
                }
                Err(panic) => {
                    error!(
                        %request_id,
                        method = %request.method(),
                        path = request.path(),
                        panic = %panic_description(panic.as_ref()),
                        backtrace = %std::backtrace::Backtrace::force_capture(),
                        "panic recovered"
                    );
                    Ok(ServiceResponse::new(request, generic_internal_response()))
                }
            }
        })
    }
}
