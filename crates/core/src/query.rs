//! Collection query interpretation: the sortable-field allow-list, direction
//! parsing, pagination token parsing, and page-window arithmetic.
//!
//! Everything here classifies before anything touches storage; an illegal
//! component fails the whole request.

use crate::error::CoreError;
use crate::types::DbId;

/// Page index used when a paginated request omits `page`.
pub const DEFAULT_PAGE: &str = "0";
/// Page size used when a paginated request omits `size`.
pub const DEFAULT_SIZE: &str = "10";

/// Attributes a collection may legally be sorted by.
///
/// An explicit allow-list: unknown fields are rejected before any query is
/// constructed. Both exposed entities share the same sortable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Name,
}

impl SearchField {
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        match token {
            "id" => Ok(SearchField::Id),
            "name" => Ok(SearchField::Name),
            other => Err(CoreError::Validation(format!(
                "unknown sort field: {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Name => "name",
        }
    }
}

/// Sort direction; ascending when the token omits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        match token.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(CoreError::Validation(format!(
                "unknown sort direction: {other}"
            ))),
        }
    }
}

/// A validated sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SearchField,
    pub direction: SortDirection,
}

impl Sort {
    /// Stable default ordering for unsorted listings.
    pub const fn by_id() -> Self {
        Sort {
            field: SearchField::Id,
            direction: SortDirection::Ascending,
        }
    }

    /// Parse an optional `field` / `field,direction` token.
    pub fn parse(token: Option<&str>) -> Result<Self, CoreError> {
        let Some(token) = token else {
            return Ok(Sort::by_id());
        };
        let (field, direction) = match token.split_once(',') {
            Some((field, direction)) => (
                SearchField::parse(field)?,
                SortDirection::parse(direction)?,
            ),
            None => (SearchField::parse(token)?, SortDirection::default()),
        };
        Ok(Sort { field, direction })
    }
}

/// A validated pagination window in offset/limit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Parse a raw `page`/`size` token. A token that is not an integer is
/// malformed input (400), never a missing page.
pub fn parse_page_token(raw: &str, param: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("{param} must be an integer, got '{raw}'")))
}

/// Compute the window for `page` within a collection of `total` items.
///
/// A non-positive `size` partitions the collection into zero pages, so every
/// page index is out of range; otherwise the valid indices are
/// `[0, ceil(total / size) - 1]`. An empty collection has zero pages.
pub fn page_window(page: i64, size: i64, total: i64) -> Result<PageWindow, CoreError> {
    let pages = if size <= 0 { 0 } else { (total + size - 1) / size };
    if page < 0 || page >= pages {
        return Err(CoreError::PageOutOfRange { page });
    }
    Ok(PageWindow {
        offset: page * size,
        limit: size,
    })
}

/// Parse a path identifier. Anything but a strictly positive integer is a
/// malformed identifier (400); a well-formed id that matches nothing is the
/// storage layer's 404.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!(
            "malformed identifier: {raw}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn sort_defaults_to_id_ascending() {
        assert_eq!(Sort::parse(None).unwrap(), Sort::by_id());
    }

    #[test]
    fn sort_parses_field_and_direction() {
        let sort = Sort::parse(Some("name,DESC")).unwrap();
        assert_eq!(sort.field, SearchField::Name);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn sort_direction_defaults_to_ascending_when_omitted() {
        let sort = Sort::parse(Some("name")).unwrap();
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn sort_rejects_unknown_field() {
        assert_matches!(
            Sort::parse(Some("invalid,ASC")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn sort_rejects_unknown_direction() {
        assert_matches!(
            Sort::parse(Some("name,sideways")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn page_token_rejects_non_numeric() {
        assert_matches!(
            parse_page_token("abc", "page"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn page_window_covers_all_full_pages() {
        // 5 items at size 2 -> pages 0, 1, 2 valid; page 3 out of range.
        assert_eq!(
            page_window(0, 2, 5).unwrap(),
            PageWindow { offset: 0, limit: 2 }
        );
        assert_eq!(
            page_window(2, 2, 5).unwrap(),
            PageWindow { offset: 4, limit: 2 }
        );
        assert_matches!(page_window(3, 2, 5), Err(CoreError::PageOutOfRange { .. }));
    }

    #[test]
    fn last_valid_page_is_ceil_minus_one() {
        // 4 items at size 2 -> exactly 2 pages.
        assert!(page_window(1, 2, 4).is_ok());
        assert_matches!(page_window(2, 2, 4), Err(CoreError::PageOutOfRange { .. }));
    }

    #[test]
    fn zero_or_negative_size_yields_zero_pages() {
        assert_matches!(page_window(0, 0, 5), Err(CoreError::PageOutOfRange { .. }));
        assert_matches!(page_window(0, -1, 5), Err(CoreError::PageOutOfRange { .. }));
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        assert_matches!(page_window(0, 1, 0), Err(CoreError::PageOutOfRange { .. }));
    }

    #[test]
    fn negative_page_is_out_of_range() {
        assert_matches!(page_window(-1, 2, 5), Err(CoreError::PageOutOfRange { .. }));
    }

    #[test]
    fn path_id_must_be_a_positive_integer() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_matches!(parse_id("abc"), Err(CoreError::Validation(_)));
        assert_matches!(parse_id("0"), Err(CoreError::Validation(_)));
        assert_matches!(parse_id("-3"), Err(CoreError::Validation(_)));
    }
}
