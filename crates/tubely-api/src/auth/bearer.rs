use axum::http::{header::AUTHORIZATION, HeaderMap};
use tubely_core::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized(
            "Missing bearer token".to_string(),
        ));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        assert!(extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer_token(&headers_with("Bearer ")).is_err());
        assert!(extract_bearer_token(&headers_with("bearer abc")).is_err());
    }
}
