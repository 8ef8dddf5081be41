//! Page-number pagination primitives.
//!
//! Endpoints that return bounded slices of an ordered result set describe the
//! slice with a [`PageRequest`] and answer with a [`Page`] envelope. The
//! envelope carries the total match count alongside the page so clients can
//! render pagination controls without a second round-trip.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 10).expect("valid request");
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k"], request, 11);
//! assert_eq!(page.total_pages(), 2);
//! ```

mod envelope;
mod request;

pub use envelope::{Page, total_pages};
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageRequestError};
