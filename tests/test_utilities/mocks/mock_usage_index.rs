use async_trait::async_trait;
use maven_clients::client_discovery::domain::UsagePage;
use maven_clients::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock UsageIndex serving prepared pages per target version
///
/// Pages past the last prepared one are empty.
#[derive(Default, Clone)]
pub struct MockUsageIndex {
    pages: HashMap<String, Vec<UsagePage>>,
    pub requests: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockUsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, target: &str, pages: Vec<UsagePage>) -> Self {
        self.pages.insert(target.to_string(), pages);
        self
    }

    pub fn pages_requested_for(&self, target: &str) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, page)| *page)
            .collect()
    }
}

#[async_trait]
impl UsageIndex for MockUsageIndex {
    async fn fetch_usage_page(&self, target: &ComponentVersion, page: u32) -> Result<UsagePage> {
        self.requests
            .lock()
            .unwrap()
            .push((target.canonical(), page));

        Ok(self
            .pages
            .get(&target.canonical())
            .and_then(|pages| pages.get(page as usize - 1))
            .cloned()
            .unwrap_or_default())
    }
}
