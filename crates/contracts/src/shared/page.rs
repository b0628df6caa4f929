use serde::{Deserialize, Serialize};

/// Spring `Page<T>` envelope returned by every paginated list endpoint.
///
/// `number` is zero-based on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub last: Option<bool>,
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            number: 0,
            last: Some(true),
        }
    }
}

impl<T> PageEnvelope<T> {
    /// Whether another page can be requested ("load more").
    ///
    /// Older endpoints omit `last`; then it is derived from `number`/`totalPages`.
    pub fn has_more(&self) -> bool {
        match self.last {
            Some(last) => !last,
            None => self.number + 1 < self.total_pages,
        }
    }

    /// One-based page number, as shown to the user.
    pub fn display_page(&self) -> u32 {
        self.number + 1
    }
}

/// Query parameters for a paginated request (`page` is zero-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn sorted(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spring_page() {
        let json = r#"{
            "content": [1, 2, 3],
            "totalPages": 4,
            "totalElements": 10,
            "number": 0,
            "last": false,
            "pageable": {"pageNumber": 0}
        }"#;
        let page: PageEnvelope<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 10);
        assert!(page.has_more());
        assert_eq!(page.display_page(), 1);
    }

    #[test]
    fn test_has_more_without_last_flag() {
        let json = r#"{"content": [], "totalPages": 2, "totalElements": 3, "number": 1}"#;
        let page: PageEnvelope<u32> = serde_json::from_str(json).unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_request_next_keeps_sort() {
        let req = PageRequest::new(0, 10).sorted("bookingDate,desc");
        let next = req.next();
        assert_eq!(next.page, 1);
        assert_eq!(next.sort.as_deref(), Some("bookingDate,desc"));
    }
}
