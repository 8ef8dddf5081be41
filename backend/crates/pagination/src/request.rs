//! Page request parsing and normalisation.

use thiserror::Error;

/// Page size applied when the caller omits one or supplies an unusable value.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors returned by the strict [`PageRequest::new`] constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// Configured upper bound.
        max: u32,
    },
}

/// A one-based page number paired with a page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is outside its range.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// Build a page request from untrusted query-string values.
    ///
    /// Never fails. A missing, non-numeric or non-positive page becomes 1. A
    /// missing, non-numeric or non-positive page size becomes
    /// [`DEFAULT_PAGE_SIZE`], and sizes above [`MAX_PAGE_SIZE`] are clamped.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_query(Some("-3"), Some("abc"));
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), 10);
    /// ```
    #[must_use]
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let page_size = parse_positive(page_size)
            .map_or(DEFAULT_PAGE_SIZE, |size| size.min(MAX_PAGE_SIZE));
        Self { page, page_size }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding the first item of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Alias for [`PageRequest::page_size`] widened for storage queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// Parse a strictly positive integer, saturating values beyond `u32::MAX`.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value: i64 = raw?.trim().parse().ok()?;
    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}
