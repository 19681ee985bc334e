//! Response → user-facing output.

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::HttpResponse;

/// Render a successful response body, or map a non-2xx response to an error
/// carrying the server's body verbatim.
///
/// JSON bodies are pretty-printed; anything else is returned as text.
pub fn render(response: &HttpResponse) -> Result<String, ApiError> {
    let text = String::from_utf8_lossy(&response.body);
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            body: text.into_owned(),
        });
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => Ok(serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.into_owned())),
        Err(_) => Ok(text.into_owned()),
    }
}
