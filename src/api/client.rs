// src/api/client.rs
// =============================================================================
// HTTP calls to the archive service.
//
// Endpoints:
//   POST   /api/archive                     start a capture -> {job_id}
//   GET    /api/archive/{job_id}/status     capture progress
//   GET    /api/sites                       every archived host
//   GET    /api/site/{host}/snapshots       captures of one host
//   DELETE /api/site/{host}/{ts}            remove one capture
//   DELETE /api/site/{host}                 remove a host
//   DELETE /api/sites?confirm=ALL           remove everything
//   GET    /archive/{host}/{ts}/graph.json  the crawl graph of a capture
//
// A capture is polled once a second until it reports success or error.
// Any non-2xx response becomes an error carrying the status and body.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use url::Url;

use super::types::{ArchiveRequest, JobCreated, JobStatus, SiteSummary, SnapshotInfo};
use crate::graph::Graph;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// How long to wait between two status checks
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

// How many snapshot listings to fetch at once
const LISTING_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    base: Url,
}

impl ArchiveClient {
    pub fn new(api_base: &str) -> Result<Self> {
        let base = Url::parse(api_base)
            .map_err(|e| anyhow!("Invalid API base '{}': {}", api_base, e))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("API base cannot hold paths: {}", api_base));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(ArchiveClient { client, base })
    }

    // Builds an endpoint URL under the API base
    //
    // Each segment is percent-encoded on its own, so a job id like
    // "a.com:20240101T000000Z" or a host with odd characters stays one
    // path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base cannot hold paths: {}", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // Address of a capture's rendered landing page
    pub fn page_url(&self, host: &str, ts: &str) -> Result<Url> {
        self.endpoint(&["archive", host, ts, "local", "index.html"])
    }

    // Starts a capture and returns its job id
    pub async fn start_archive(&self, url: &str, depth: u32, max_pages: Option<u32>) -> Result<String> {
        let endpoint = self.endpoint(&["api", "archive"])?;
        let body = ArchiveRequest { url, depth, max_pages };
        let response = self.client.post(endpoint).json(&body).send().await?;
        let created: JobCreated = check(response).await?.json().await?;
        Ok(created.job_id)
    }

    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let endpoint = self.endpoint(&["api", "archive", job_id, "status"])?;
        let response = self.client.get(endpoint).send().await?;
        let status = check(response)
            .await?
            .json()
            .await
            .with_context(|| format!("Unexpected status payload for job {}", job_id))?;
        Ok(status)
    }

    // Polls a job every `interval` until it finishes, reporting each check
    pub async fn wait_for_job<F>(&self, job_id: &str, interval: Duration, on_tick: F) -> Result<JobStatus>
    where
        F: FnMut(&JobStatus),
    {
        poll_until_terminal(move || self.job_status(job_id), interval, on_tick).await
    }

    pub async fn list_sites(&self) -> Result<Vec<SiteSummary>> {
        let endpoint = self.endpoint(&["api", "sites"])?;
        let response = self.client.get(endpoint).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn list_snapshots(&self, host: &str) -> Result<Vec<SnapshotInfo>> {
        let endpoint = self.endpoint(&["api", "site", host, "snapshots"])?;
        let response = self.client.get(endpoint).send().await?;
        let snapshots = check(response)
            .await?
            .json()
            .await
            .with_context(|| format!("Unexpected snapshot listing for {}", host))?;
        Ok(snapshots)
    }

    // Fetches the snapshot listing of every host concurrently
    //
    // Results come back in the same order as `sites`. A failed listing is
    // reported per host instead of failing the whole batch.
    pub async fn list_sites_with_snapshots(
        &self,
        sites: Vec<SiteSummary>,
    ) -> Vec<(SiteSummary, Result<Vec<SnapshotInfo>>)> {
        let futures = sites.into_iter().enumerate().map(|(index, site)| async move {
            let snapshots = self.list_snapshots(&site.host).await;
            (index, site, snapshots)
        });

        let mut results: Vec<_> = stream::iter(futures)
            .buffer_unordered(LISTING_CONCURRENCY)
            .collect()
            .await;
        results.sort_by_key(|(index, _, _)| *index);

        results
            .into_iter()
            .map(|(_, site, snapshots)| (site, snapshots))
            .collect()
    }

    // Downloads the crawl graph recorded for one capture
    pub async fn fetch_graph(&self, host: &str, ts: &str) -> Result<Graph> {
        let endpoint = self.endpoint(&["archive", host, ts, "graph.json"])?;
        let response = self.client.get(endpoint.clone()).send().await?;
        let text = check(response).await?.text().await?;
        Graph::from_json(&text).with_context(|| format!("Bad graph document at {}", endpoint))
    }

    pub async fn delete_snapshot(&self, host: &str, ts: &str) -> Result<()> {
        let endpoint = self.endpoint(&["api", "site", host, ts])?;
        check(self.client.delete(endpoint).send().await?).await?;
        Ok(())
    }

    pub async fn delete_site(&self, host: &str) -> Result<()> {
        let endpoint = self.endpoint(&["api", "site", host])?;
        check(self.client.delete(endpoint).send().await?).await?;
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<()> {
        let mut endpoint = self.endpoint(&["api", "sites"])?;
        endpoint.query_pairs_mut().append_pair("confirm", "ALL");
        check(self.client.delete(endpoint).send().await?).await?;
        Ok(())
    }
}

// Repeats `fetch` until the job reaches a terminal state
//
// `on_tick` sees every status, including the final one. Errors from
// `fetch` end the loop immediately.
pub async fn poll_until_terminal<F, Fut, T>(mut fetch: F, interval: Duration, mut on_tick: T) -> Result<JobStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<JobStatus>>,
    T: FnMut(&JobStatus),
{
    loop {
        let status = fetch().await?;
        on_tick(&status);
        if status.status.is_terminal() {
            return Ok(status);
        }
        tokio::time::sleep(interval).await;
    }
}

// Turns a non-2xx response into an error with the server's message
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        Err(anyhow!("HTTP {} from {}", status, url))
    } else {
        Err(anyhow!("HTTP {} from {}: {}", status, url, body))
    }
}
