/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.page_size)
    }

    /// Whether items remain past this page, given the provider-reported total.
    pub fn has_more(&self, returned: usize, total: u64) -> bool {
        self.offset() + (returned as u64) < total
    }
}

/// Cuts one page out of an in-memory list. Providers backed by static data use this.
pub fn paginate_slice<T: Clone>(items: &[T], pagination: Option<Pagination>) -> Vec<T> {
    let Some(p) = pagination else {
        return items.to_vec();
    };
    let start = usize::try_from(p.offset()).unwrap_or(usize::MAX).min(items.len());
    let end = start.saturating_add(p.page_size as usize).min(items.len());
    items[start..end].to_vec()
}
