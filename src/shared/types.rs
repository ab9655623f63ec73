use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: total as i64,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Page addressing for fixed-size list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn new(number: i64, size: i64) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// SQL OFFSET for this page; saturates so huge page numbers land past the end
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    /// Success envelope with a message, the common case for this API
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::success(Some(data), Some(message.into()), None)
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

impl ApiResponse<()> {
    /// Message-only success envelope
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(None, Some(message.into()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::new(1, 2).offset(), 0);
        assert_eq!(Page::new(3, 2).offset(), 4);
    }

    #[test]
    fn test_page_clamps_to_first() {
        assert_eq!(Page::new(0, 2), Page::new(1, 2));
        assert_eq!(Page::new(-4, 2).offset(), 0);
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(Page::new(i64::MAX, 2).offset(), i64::MAX);
    }
}
