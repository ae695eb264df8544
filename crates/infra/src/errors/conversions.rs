//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use stockdesk_domain::StockDeskError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StockDeskError);

impl From<InfraError> for StockDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StockDeskError> for InfraError {
    fn from(value: StockDeskError) -> Self {
        InfraError(value)
    }
}

trait IntoStockDeskError {
    fn into_stockdesk(self) -> StockDeskError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → StockDeskError */
/* -------------------------------------------------------------------------- */

impl IntoStockDeskError for HttpError {
    fn into_stockdesk(self) -> StockDeskError {
        if self.is_timeout() {
            return StockDeskError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return StockDeskError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return StockDeskError::Remote {
                status: None,
                message: format!("malformed response body: {self}"),
            };
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => StockDeskError::Auth(message),
                404 => StockDeskError::NotFound(message),
                _ => StockDeskError::Remote { status: Some(code), message },
            };
        }

        StockDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_stockdesk())
    }
}
