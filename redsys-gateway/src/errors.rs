use http::StatusCode;
use serde::Serialize;

/// Errors raised while starting a payment or processing a result.
///
/// None of them is retried. Note that [`Error::PaymentFailed`] is raised after
/// the "done" and "fail" hooks have already run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Redsys(#[from] redsys_core::errors::Error),

    /// The bridge holds no order for this payment.
    #[error("Order not found")]
    OrderNotFound,

    /// Redsys refused the payment.
    #[error("Payment failed with response code {}", describe_code(.response_code))]
    PaymentFailed { response_code: Option<i64> },

    /// The payment bridge failed.
    #[error("Payment bridge error: {0}")]
    Bridge(String),

    /// A lifecycle hook failed.
    #[error("Payment event error: {0}")]
    Dispatcher(String),
}

fn describe_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "<none>".to_string(), |c| c.to_string())
}

impl Error {
    /// HTTP status best describing the error to the caller.
    pub fn status(&self) -> StatusCode {
        use redsys_core::errors::Error as Redsys;

        match self {
            Error::Redsys(Redsys::MissingParameters(_))
            | Error::Redsys(Redsys::MalformedPayload(_))
            | Error::Redsys(Redsys::InvalidSignature)
            | Error::Redsys(Redsys::UnsupportedCurrency(_)) => StatusCode::BAD_REQUEST,
            Error::Redsys(Redsys::InvalidKeyMaterial(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::OrderNotFound => StatusCode::NOT_FOUND,
            Error::PaymentFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            Error::Bridge(_) | Error::Dispatcher(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Represents an error response from the gateway.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

/// JSON body of an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let status = err.status();
        // Server side failures keep their details in the logs.
        let error = if status.is_server_error() {
            "Payment processing error".to_string()
        } else {
            err.to_string()
        };
        ErrorResponse {
            status,
            body: ErrorBody { error },
        }
    }
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        ErrorResponse::from(&err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status, axum::extract::Json(self.body)).into_response()
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        ErrorResponse::from(self).into_response()
    }
}
