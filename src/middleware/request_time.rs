use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::{ready, LocalBoxFuture, Ready};

/// The moment a request entered the application, stamped by `RequestTimeMiddleware`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTime(pub DateTime<Utc>);

impl RequestTime {
    /// ISO 8601 form used in the `requestedAt` field, e.g. `2024-03-01T10:15:30.123Z`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Stores a `RequestTime` in the request extensions before calling the next service.
pub struct RequestTimeMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestTimeMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestTimeMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeMiddlewareService { service }))
    }
}

pub struct RequestTimeMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTimeMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        req.extensions_mut().insert(RequestTime(Utc::now()));
        Box::pin(self.service.call(req))
    }
}

/// Reads the stamp left by `RequestTimeMiddleware`.
///
/// Falls back to the current time when the middleware is not mounted, so a
/// handler never fails just because the stamp is missing.
impl FromRequest for RequestTime {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let stamp = req
            .extensions()
            .get::<RequestTime>()
            .copied()
            .unwrap_or_else(|| RequestTime(Utc::now()));
        ready(Ok(stamp))
    }
}
