use crate::{ApiError, ApiErrorCode};

/// Single table from failure code to HTTP status. Anything the table
/// does not name is a 500.
#[must_use]
pub fn map_error(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::ValidationFailed
        | ApiErrorCode::DuplicateEmail
        | ApiErrorCode::InvalidToken
        | ApiErrorCode::InvalidOrExpiredToken => 400,
        ApiErrorCode::InvalidCredentials | ApiErrorCode::Unauthorized => 401,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::Internal => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_matches_the_taxonomy() {
        assert_eq!(map_error(&ApiError::validation("x")), 400);
        assert_eq!(map_error(&ApiError::duplicate_email()), 400);
        assert_eq!(map_error(&ApiError::invalid_token()), 400);
        assert_eq!(map_error(&ApiError::invalid_or_expired_token()), 400);
        assert_eq!(map_error(&ApiError::invalid_credentials()), 401);
        assert_eq!(map_error(&ApiError::unauthorized("x")), 401);
        assert_eq!(map_error(&ApiError::forbidden("x")), 403);
        assert_eq!(map_error(&ApiError::not_found("x")), 404);
        assert_eq!(map_error(&ApiError::internal("x")), 500);
    }
}
