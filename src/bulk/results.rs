//! Fetching and parsing bulk result files.
//!
//! Finished operations expose their results as a line-delimited JSON file
//! behind a signed storage URL. Each line is one object: product lines
//! carry `id` and no `title`, variant lines carry `id`, `title`, `sku`,
//! and a `__parentId` back-reference to their product. The fetchers here
//! stream the body instead of buffering the whole file, since result
//! sets can run to millions of lines.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::bulk::client::BulkOperationsClient;
use crate::bulk::documents;
use crate::bulk::errors::BulkError;
use crate::bulk::gid::IdFormat;
use crate::bulk::submit::SubmitOutcome;

/// One product variant parsed from a bulk result line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// The variant's own identifier, rendered per the requested
    /// [`IdFormat`].
    pub variant_id: String,
    /// Variant title.
    pub title: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Identifier of the parent product, rendered per the requested
    /// [`IdFormat`].
    pub product_id: String,
}

/// Outcome of a full product-variants export.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantExport {
    /// Parsed variant records in file order.
    pub records: Vec<VariantRecord>,
    /// Object count reported by the finished operation. Counts every
    /// result object, products included, so it normally exceeds
    /// `records.len()`.
    pub object_count: Option<u64>,
    /// Total query cost observed across the submit call and the final
    /// status poll.
    pub cost: f64,
}

#[derive(Deserialize)]
struct RawLine {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sku: Option<String>,
    #[serde(rename = "__parentId", default)]
    parent_id: Option<String>,
}

/// Incremental parser over result lines.
///
/// Product lines update the parent cursor and yield nothing. Variant
/// lines yield one record bound to their declared `__parentId`, falling
/// back to the cursor only when the back-reference is missing.
#[derive(Debug)]
struct LineParser {
    format: IdFormat,
    current_parent: Option<String>,
}

impl LineParser {
    fn new(format: IdFormat) -> Self {
        Self {
            format,
            current_parent: None,
        }
    }

    fn parse_line(&mut self, line: &[u8]) -> Result<Option<VariantRecord>, BulkError> {
        let text = std::str::from_utf8(line).map_err(|e| BulkError::Download {
            reason: format!("result line is not valid UTF-8: {e}"),
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let raw: RawLine = serde_json::from_str(text).map_err(|e| BulkError::Download {
            reason: format!("invalid JSON result line: {e}"),
        })?;

        let title = match raw.title {
            Some(title) => title,
            None => {
                // Product line: remember it as the open parent.
                self.current_parent = Some(raw.id);
                return Ok(None);
            }
        };
        let parent = match raw.parent_id.or_else(|| self.current_parent.clone()) {
            Some(parent) => parent,
            None => {
                tracing::warn!(id = %raw.id, "variant line without a parent reference, skipping");
                return Ok(None);
            }
        };
        let sku = match raw.sku {
            Some(sku) => sku,
            None => {
                tracing::warn!(id = %raw.id, "variant line without a sku, skipping");
                return Ok(None);
            }
        };

        Ok(Some(VariantRecord {
            variant_id: self.format.apply(&raw.id),
            title,
            sku,
            product_id: self.format.apply(&parent),
        }))
    }
}

impl BulkOperationsClient {
    /// Streams a bulk result file into memory as variant records.
    ///
    /// Lines that do not describe a usable variant (product lines, blank
    /// lines, variants without a sku) are skipped; record order follows
    /// file order.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::Download`] when the request fails, the server
    /// answers with a non-success status, or a line does not parse.
    pub async fn fetch_variants(
        &self,
        url: &str,
        format: IdFormat,
    ) -> Result<Vec<VariantRecord>, BulkError> {
        let response = self.open_download(url).await?;

        let mut parser = LineParser::new(format);
        let mut records = Vec::new();
        let mut buffer: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| BulkError::Download {
                reason: format!("reading result stream failed: {e}"),
            })?;
            buffer.extend_from_slice(&chunk);

            while let Some(newline) = buffer.iter().position(|&byte| byte == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                if let Some(record) = parser.parse_line(&line[..line.len() - 1])? {
                    records.push(record);
                }
            }
        }
        if !buffer.is_empty() {
            if let Some(record) = parser.parse_line(&buffer)? {
                records.push(record);
            }
        }

        tracing::debug!(records = records.len(), "bulk result stream parsed");
        Ok(records)
    }

    /// Downloads a bulk result file to `path`, replacing any existing
    /// file there first.
    ///
    /// The write is verified by checking the file exists once the stream
    /// is drained; the verified path is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::Download`] when the request fails, the server
    /// answers with a non-success status, or the file cannot be written.
    pub async fn fetch_to_file(&self, url: &str, path: &Path) -> Result<PathBuf, BulkError> {
        if tokio::fs::metadata(path).await.is_ok() {
            tracing::warn!(path = %path.display(), "replacing existing result file");
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| BulkError::Download {
                    reason: format!("removing existing file '{}' failed: {e}", path.display()),
                })?;
        }

        let response = self.open_download(url).await?;

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| BulkError::Download {
                reason: format!("creating '{}' failed: {e}", path.display()),
            })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| BulkError::Download {
                reason: format!("reading result stream failed: {e}"),
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| BulkError::Download {
                    reason: format!("writing '{}' failed: {e}", path.display()),
                })?;
        }
        file.flush().await.map_err(|e| BulkError::Download {
            reason: format!("writing '{}' failed: {e}", path.display()),
        })?;
        drop(file);

        if tokio::fs::metadata(path).await.is_err() {
            return Err(BulkError::Download {
                reason: format!(
                    "download from '{url}' left no file at '{}'",
                    path.display()
                ),
            });
        }

        tracing::info!(path = %path.display(), "bulk result downloaded");
        Ok(path.to_path_buf())
    }

    /// Runs the canonical product-variants export end to end: submit the
    /// bulk query, poll the operation, then stream and parse its result
    /// file.
    ///
    /// # Errors
    ///
    /// Propagates submit, poll, and fetch errors; additionally returns
    /// [`BulkError::OperationFailed`] when the operation finishes without
    /// a result URL.
    pub async fn export_product_variants(
        &self,
        format: IdFormat,
    ) -> Result<VariantExport, BulkError> {
        let outcome = self.run_query(documents::PRODUCT_VARIANTS_QUERY).await?;
        let mut cost = outcome.cost().unwrap_or(0.0);

        let id = match outcome {
            SubmitOutcome::Queued { id, .. } => id,
            SubmitOutcome::Immediate { .. } => {
                // A run-query envelope cannot complete synchronously.
                return Err(BulkError::UnexpectedShape {
                    keys: vec!["productVariantsBulkUpdate".to_string()],
                });
            }
        };

        let polled = self.poll_operation(&id).await?;
        cost += polled.cost.unwrap_or(0.0);

        let url = match polled.url {
            Some(url) => url,
            None => {
                return Err(BulkError::OperationFailed {
                    id,
                    status: polled.status,
                    error_code: polled.error_code,
                });
            }
        };

        let records = self.fetch_variants(&url, format).await?;
        Ok(VariantExport {
            records,
            object_count: polled.object_count,
            cost,
        })
    }

    async fn open_download(&self, url: &str) -> Result<reqwest::Response, BulkError> {
        let response = self
            .download_client()
            .get(url)
            .send()
            .await
            .map_err(|e| BulkError::Download {
                reason: format!("request to result URL failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BulkError::Download {
                reason: format!("result URL answered with status {status}"),
            });
        }
        Ok(response)
    }
}
