use rocket::{
    http::Status,
    request::{self, FromRequest, Request},
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 500;

/// Requested page of a listing, taken from the `page_num` and `page_size`
/// query parameters. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_num: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_num: usize, page_size: usize) -> Result<Self, Error> {
        if page_num == 0 {
            return Err(Error::Status(
                Status::BadRequest,
                "Page numbers start at 1".to_string(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::Status(
                Status::BadRequest,
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(Self {
            page_num,
            page_size,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn skip(&self) -> usize {
        (self.page_num - 1).saturating_mul(self.page_size)
    }

    pub fn result(self, total: usize) -> PaginationResult {
        PaginationResult {
            page_num: self.page_num,
            page_size: self.page_size,
            total,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Pagination {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let page_num = match req.query_value::<usize>("page_num").unwrap_or(Ok(1)) {
            Ok(page_num) => page_num,
            Err(_) => {
                let err = Error::Status(Status::BadRequest, "Invalid page_num".to_string());
                return request::Outcome::Failure((Status::BadRequest, err));
            }
        };
        let page_size = match req
            .query_value::<usize>("page_size")
            .unwrap_or(Ok(DEFAULT_PAGE_SIZE))
        {
            Ok(page_size) => page_size,
            Err(_) => {
                let err = Error::Status(Status::BadRequest, "Invalid page_size".to_string());
                return request::Outcome::Failure((Status::BadRequest, err));
            }
        };
        match Self::new(page_num, page_size) {
            Ok(pagination) => request::Outcome::Success(pagination),
            Err(err) => request::Outcome::Failure((Status::BadRequest, err)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationResult {
    page_num: usize,
    page_size: usize,
    total: usize,
}

/// One page of items plus where it sits in the whole listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub pagination: PaginationResult,
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_counts_whole_pages() {
        assert_eq!(Pagination::default().skip(), 0);
        assert_eq!(Pagination::new(3, 10).unwrap().skip(), 20);
    }

    #[test]
    fn bounds() {
        assert!(Pagination::new(0, 10).is_err());
        assert!(Pagination::new(1, 0).is_err());
        assert!(Pagination::new(1, MAX_PAGE_SIZE + 1).is_err());
        assert!(Pagination::new(1, MAX_PAGE_SIZE).is_ok());
    }
}
