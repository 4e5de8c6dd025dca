use crate::error::ApiError;

/// Parse an integer path identifier.
pub fn parse_id(raw: Option<&str>) -> Result<i32, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Err(ApiError::bad_request("Missing ID parameter")),
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request("Invalid ID format")),
    }
}
