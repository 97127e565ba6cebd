use super::ApiError;

pub const MIN_PAGE_LIMIT: u64 = 1;
pub const MAX_PAGE_LIMIT: u64 = 50;
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_SEARCH_CHARS: usize = 100;

pub fn validate_blog_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid blog ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_user_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid user ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_page(page: u64) -> Result<u64, ApiError> {
    if page < 1 {
        return Err(ApiError::validation("Page must be 1 or greater"));
    }
    Ok(page)
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    if !(MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_PAGE_LIMIT} and {MAX_PAGE_LIMIT}"
        )));
    }
    Ok(limit)
}

/// Trims and bounds the free-text search term; empty terms become `None`
/// so the listing skips the filter entirely.
pub fn validate_search(search: &str) -> Result<Option<String>, ApiError> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_SEARCH_CHARS {
        return Err(ApiError::validation(format!(
            "Search term must be {MAX_SEARCH_CHARS} characters or less"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
