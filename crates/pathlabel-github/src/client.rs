use crate::error::GitHubError;
use crate::repository::Repository;
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for the pull request files listing (GitHub's maximum).
pub const PER_PAGE: usize = 100;

/// GitHub stops listing pull request files after 3000 entries.
pub const MAX_PAGES: u32 = 30;

const API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: String,
    pub repository: Repository,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, repository: Repository) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            repository,
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct IssueLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking GitHub REST client scoped to one repository.
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
    token: String,
    repository: Repository,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let http = HttpClient::builder()
            .user_agent(concat!("pathlabel/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
            repository: config.repository,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// All file paths touched by a pull request, flattened across pages in API order.
    #[instrument(skip(self), fields(repository = %self.repository))]
    pub fn list_pull_request_files(&self, number: u64) -> Result<Vec<String>, GitHubError> {
        let mut paths = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/repos/{}/{}/pulls/{}/files?per_page={}&page={}",
                self.base_url,
                self.repository.owner,
                self.repository.name,
                number,
                PER_PAGE,
                page
            );
            let response = self.http.get(&url).bearer_auth(&self.token).send()?;
            let batch: Vec<PullRequestFile> = check_status(response)?.json()?;
            let fetched = batch.len();
            debug!(page, fetched, "fetched pull request files page");

            paths.extend(batch.into_iter().map(|f| f.filename));
            if fetched < PER_PAGE {
                break;
            }
        }

        debug!("pull request #{} touches {} files", number, paths.len());
        Ok(paths)
    }

    /// Add labels to a pull request. Labels already present are left alone by GitHub.
    ///
    /// Returns the labels on the pull request after the call.
    #[instrument(skip(self), fields(repository = %self.repository))]
    pub fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>, GitHubError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.base_url, self.repository.owner, self.repository.name, number
        );
        let body = serde_json::json!({ "labels": labels });
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        let current: Vec<IssueLabel> = check_status(response)?.json()?;

        info!("added {} labels to pull request #{}", labels.len(), number);
        Ok(current.into_iter().map(|l| l.name).collect())
    }
}

fn check_status(response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(GitHubError::Api {
        status: status.as_u16(),
        message,
    })
}
