//! Pipeline orchestration: scrape phase and update phase
//!
//! The scrape phase is strictly sequential over one storefront session and
//! checkpoints after every product. The update phase fans out independent,
//! idempotent WooCommerce calls under a fixed concurrency limit and persists
//! the push flag after each success.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{normalize_ean, StockRecord, StyleEntry};
use crate::infrastructure::catalog;
use crate::infrastructure::checkpoint::CheckpointStore;
use crate::infrastructure::config::{AppConfig, Credentials, StorefrontConfig, WooCredentials};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::session::StorefrontSession;
use crate::infrastructure::stock_parser::StockExtractor;
use crate::infrastructure::woocommerce::WooClient;

/// Outcome of the scrape phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub scraped: usize,
    pub skipped: usize,
    pub available: usize,
    pub unavailable: usize,
}

/// Outcome of the update phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Records pending a push when the phase started
    pub pending: usize,
    /// Records already pushed by an earlier run
    pub already_pushed: usize,
    pub pushed: usize,
    /// Records with no matching variation in the store
    pub missing: usize,
    pub failed: usize,
}

/// Run the scrape phase end to end: catalog, login, per-product loop.
pub async fn scrape_phase(config: &AppConfig, credentials: &Credentials) -> Result<ScrapeSummary> {
    let entries = catalog::read_style_entries(&config.files.input_csv)?;
    if entries.is_empty() {
        anyhow::bail!(
            "No products found in {}",
            config.files.input_csv.display()
        );
    }
    info!(products = entries.len(), "catalog loaded");

    let http = HttpClient::new(config.storefront.http.clone())?;
    let session = StorefrontSession::new(http);
    session
        .login(credentials)
        .await
        .context("Storefront login failed")?;

    let extractor = StockExtractor::new();
    let store = CheckpointStore::new(&config.files.checkpoint);
    let summary = scrape_stock(&session, &extractor, &store, &entries, &config.storefront).await?;

    info!(
        scraped = summary.scraped,
        skipped = summary.skipped,
        available = summary.available,
        unavailable = summary.unavailable,
        "scrape phase complete"
    );
    Ok(summary)
}

/// Sequential scrape loop with per-product checkpointing.
///
/// EANs already present in the checkpoint are skipped, so an interrupted run
/// resumes where it stopped. Every scrape failure degrades to an out-of-stock
/// record; only checkpoint I/O aborts the loop.
pub async fn scrape_stock(
    session: &StorefrontSession,
    extractor: &StockExtractor,
    store: &CheckpointStore,
    entries: &[StyleEntry],
    settings: &StorefrontConfig,
) -> Result<ScrapeSummary> {
    let mut records = store.load().await?;
    let mut processed = CheckpointStore::processed_eans(&records);

    let delay = Duration::from_millis(settings.request_delay_ms);
    let progress_every = settings.progress_every.max(1);
    let total = entries.len();
    let mut summary = ScrapeSummary::default();

    for (position, entry) in entries.iter().enumerate() {
        let ean = normalize_ean(&entry.ean);
        if ean.is_empty() {
            warn!(style_code = %entry.style_code, "catalog row has an all-zero EAN, skipping");
            summary.skipped += 1;
            continue;
        }
        if processed.contains(&ean) {
            debug!(%ean, "already checkpointed, skipping");
            summary.skipped += 1;
            continue;
        }

        let record = match session.fetch_product_page(&entry.style_code).await {
            Ok(html) => extractor.extract(&html, &ean),
            Err(error) => {
                warn!(
                    style_code = %entry.style_code,
                    %error,
                    "product page unavailable, recording out of stock"
                );
                StockRecord::unavailable(ean.clone())
            }
        };

        if record.stock_status.is_available() {
            summary.available += 1;
        } else {
            summary.unavailable += 1;
        }
        summary.scraped += 1;

        records.push(record);
        processed.insert(ean);
        store.save(&records).await?;

        if (position + 1) % progress_every == 0 {
            info!(processed = position + 1, total, "scrape progress");
        }
        tokio::time::sleep(delay).await;
    }

    Ok(summary)
}

/// Run the update phase end to end against the configured WooCommerce store.
pub async fn update_phase(
    config: &AppConfig,
    credentials: &WooCredentials,
    dry_run: bool,
) -> Result<UpdateSummary> {
    let woo = WooClient::new(credentials, &config.woocommerce)?;
    let store = CheckpointStore::new(&config.files.checkpoint);
    let summary = push_updates(
        &woo,
        &store,
        config.woocommerce.max_concurrent_updates,
        dry_run,
    )
    .await?;

    info!(
        pending = summary.pending,
        pushed = summary.pushed,
        missing = summary.missing,
        failed = summary.failed,
        already_pushed = summary.already_pushed,
        "update phase complete"
    );
    Ok(summary)
}

/// Push pending checkpoint records to WooCommerce with bounded concurrency.
///
/// Each success flips the record's push flag and persists the checkpoint, so
/// reruns only retry what actually failed. Lookup misses and errors are
/// logged and left pending.
pub async fn push_updates(
    woo: &WooClient,
    store: &CheckpointStore,
    max_concurrent: usize,
    dry_run: bool,
) -> Result<UpdateSummary> {
    let records = store.load().await?;
    let pending = pending_indices(&records);

    let mut summary = UpdateSummary {
        pending: pending.len(),
        already_pushed: records.len() - pending.len(),
        ..UpdateSummary::default()
    };

    if pending.is_empty() {
        info!("no pending stock updates");
        return Ok(summary);
    }
    if dry_run {
        info!(pending = pending.len(), "dry run, skipping WooCommerce push");
        return Ok(summary);
    }

    let pushed = AtomicUsize::new(0);
    let missing = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let shared = Arc::new(Mutex::new(records));

    futures::stream::iter(pending)
        .for_each_concurrent(max_concurrent.max(1), |index| {
            let shared = Arc::clone(&shared);
            let pushed = &pushed;
            let missing = &missing;
            let failed = &failed;
            async move {
                let (ean, status) = {
                    let records = shared.lock().await;
                    let record = &records[index];
                    (record.ean.clone(), record.stock_status)
                };

                match woo.find_variation(&ean).await {
                    Ok(Some(variation)) => match woo.update_stock(variation, status).await {
                        Ok(()) => {
                            let mut records = shared.lock().await;
                            records[index].updated = true;
                            if let Err(error) = store.save(&records).await {
                                warn!(%ean, %error, "checkpoint save failed after push");
                            }
                            drop(records);
                            pushed.fetch_add(1, Ordering::Relaxed);
                            info!(%ean, "variation stock updated");
                        }
                        Err(error) => {
                            warn!(%ean, %error, "stock update failed");
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    Ok(None) => {
                        debug!(%ean, "no matching variation in store");
                        missing.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(error) => {
                        warn!(%ean, %error, "variation lookup failed");
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        })
        .await;

    summary.pushed = pushed.load(Ordering::Relaxed);
    summary.missing = missing.load(Ordering::Relaxed);
    summary.failed = failed.load(Ordering::Relaxed);
    Ok(summary)
}

fn pending_indices(records: &[StockRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.updated)
        .map(|(index, _)| index)
        .collect()
}
