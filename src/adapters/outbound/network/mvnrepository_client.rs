use crate::client_discovery::domain::{ComponentVersion, UsagePage, UsageRow};
use crate::ports::outbound::UsageIndex;
use crate::shared::error::CollectorError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use std::time::Duration;

/// mvnrepository.com, the default usage index
pub const DEFAULT_USAGE_INDEX_URL: &str = "https://mvnrepository.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One usage entry per subtitle paragraph: group link, then artifact link
const ROW_SELECTOR: &str = "p.im-subtitle";
const LINK_SELECTOR: &str = "a";

/// MvnRepositoryClient adapter scraping the "usages" pages of mvnrepository.com
///
/// The site has no API; pages are HTML and may change without notice, so
/// anything that does not look like a usage row is ignored.
pub struct MvnRepositoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl MvnRepositoryClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_USAGE_INDEX_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("maven-clients/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn usages_url(&self, target: &ComponentVersion, page: u32) -> String {
        format!(
            "{}/artifact/{}/{}/{}/usages?p={}",
            self.base_url,
            urlencoding::encode(target.group()),
            urlencoding::encode(target.artifact()),
            urlencoding::encode(target.version()),
            page
        )
    }
}

#[async_trait]
impl UsageIndex for MvnRepositoryClient {
    async fn fetch_usage_page(&self, target: &ComponentVersion, page: u32) -> Result<UsagePage> {
        let url = self.usages_url(target, page);
        let fetch_error = |e: reqwest::Error| CollectorError::Fetch {
            url: url.clone(),
            details: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(fetch_error)?;
        let status = response.status();

        // Unknown to the index: nothing uses it as far as the index knows
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%target, page, "usage index has no page for target");
            return Ok(UsagePage::default());
        }
        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                service: "mvnrepository.com",
                status: status.as_u16(),
                url: url.clone(),
            }
            .into());
        }

        let body = response.text().await.map_err(fetch_error)?;
        parse_usage_page(&body)
    }
}

/// Extracts the usage rows of a usages page
///
/// Each row keeps the text of every link it contains; rows are not
/// validated here.
pub fn parse_usage_page(html: &str) -> Result<UsagePage> {
    let rows = selector(ROW_SELECTOR)?;
    let links = selector(LINK_SELECTOR)?;
    let document = Html::parse_document(html);

    let rows = document
        .select(&rows)
        .map(|row| {
            UsageRow::new(
                row.select(&links)
                    .map(|link| link.text().collect::<String>())
                    .collect(),
            )
        })
        .collect();

    Ok(UsagePage::new(rows))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {:?}: {}", css, e))
}
