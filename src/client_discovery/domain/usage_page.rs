/// One listing row of a usage page: the texts of the links it carries.
///
/// A well-formed row has exactly two links, the group id and the artifact id
/// of a consumer. Anything else is noise left for the scraper to skip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageRow {
    links: Vec<String>,
}

impl UsageRow {
    pub fn new(links: Vec<String>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }
}

/// Rows extracted from a single page of the usage index.
///
/// An empty page marks the end of pagination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsagePage {
    rows: Vec<UsageRow>,
}

impl UsagePage {
    pub fn new(rows: Vec<UsageRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[UsageRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
