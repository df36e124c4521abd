//! Pagination and sorting types shared by the repository, the cache keys and
//! the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 2_000;

/// Fields a listing can be sorted by.
pub const SORTABLE_FIELDS: [&str; 5] = ["id", "title", "url", "createdAt", "updatedAt"];

// == Direction ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("Unknown sort direction '{}'", other)),
        }
    }
}

// == Order ==
/// One `(property, direction)` sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction)
    }
}

// == Sort ==
/// Ordered list of sort criteria. Empty means unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }
}

impl fmt::Display for Sort {
    /// `createdAt: DESC, title: ASC`, or `UNSORTED` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return f.write_str("UNSORTED");
        }
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", order)?;
        }
        Ok(())
    }
}

// == Page Request ==
/// Zero-based page number, page size and sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    pub fn sorted(page: u32, size: u32, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

// == Page ==
/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub sort: String,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1) as u64;
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(size) as u32,
            sort: request.sort.to_string(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort: self.sort,
        }
    }
}
