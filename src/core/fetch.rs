//! Raw page fetching of a repository README.
//!
//! The repository page is downloaded first, the README link is located in its
//! HTML and the `raw` variant of that link is fetched.

use crate::domain::model::{RawReadme, RepositoryReference};
use crate::utils::error::{Result, RoverError};
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("readme-rover/", env!("CARGO_PKG_VERSION"));

pub struct GithubFetcher {
    client: Client,
    base_url: Url,
}

impl GithubFetcher {
    pub fn new(base_url: &str, user_agent: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // 確保 join 時不會覆蓋最後一段路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn repository_url(&self, reference: &RepositoryReference) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("{}/{}", reference.owner(), reference.name()))?)
    }

    pub async fn fetch(&self, reference: &RepositoryReference) -> Result<RawReadme> {
        let page_url = self.repository_url(reference)?;
        tracing::debug!("Fetching repository page: {}", page_url);

        let response = self.client.get(page_url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Repository page status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(RoverError::RepositoryNotFound {
                reference: reference.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RoverError::HttpStatusError {
                url: page_url.to_string(),
                status: status.as_u16(),
            });
        }

        let page = response.text().await?;
        let readme_url = find_readme_link(&page, &page_url).ok_or_else(|| {
            tracing::info!("No README link found on {}", page_url);
            RoverError::ReadmeNotFound {
                reference: reference.to_string(),
            }
        })?;

        tracing::debug!("Fetching README: {}", readme_url);
        let response = self.client.get(readme_url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RoverError::ReadmeNotFound {
                reference: reference.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RoverError::HttpStatusError {
                url: readme_url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::debug!("README fetched ({} bytes)", body.len());
        Ok(RawReadme {
            source_url: readme_url.to_string(),
            content_type,
            body,
        })
    }
}

/// Locate the README link on a repository page and turn it into a raw file URL.
pub fn find_readme_link(page_html: &str, page_url: &Url) -> Option<Url> {
    let document = Html::parse_document(page_html);

    let permalink = Selector::parse("a#readme-permalink[href]").expect("valid selector");
    let anchors = Selector::parse("a[href]").expect("valid selector");

    // `/blob/` 只認倉庫路徑之後的那一段，owner 或 name 本身可能就叫 blob
    let repo_path = page_url.path().trim_end_matches('/');
    let blob_prefix = format!("{}/blob/", repo_path);

    let resolve = |href: &str| page_url.join(href).ok();

    let mut url = document
        .select(&permalink)
        .filter_map(|element| element.value().attr("href"))
        .find_map(resolve)
        .or_else(|| {
            document
                .select(&anchors)
                .filter_map(|element| element.value().attr("href"))
                .filter_map(resolve)
                .find(|url| is_readme_blob_link(url, &blob_prefix))
        })?;

    let raw_path = url
        .path()
        .strip_prefix(&blob_prefix)
        .map(|rest| format!("{}/raw/{}", repo_path, rest));
    if let Some(raw_path) = raw_path {
        url.set_path(&raw_path);
    }
    Some(url)
}

fn is_readme_blob_link(url: &Url, blob_prefix: &str) -> bool {
    url.path().starts_with(blob_prefix)
        && url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|file| file.to_ascii_lowercase().starts_with("readme"))
            .unwrap_or(false)
}
