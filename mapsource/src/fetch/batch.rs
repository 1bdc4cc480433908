//! Parallel batch fetching.
//!
//! Tiles are independent, so a batch is spread over the rayon thread pool
//! with one fetch per address. Jobs sharing a destination path are collapsed
//! to the first occurrence so no two fetches write the same file.

use std::collections::HashSet;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info};

use super::types::{FetchResult, TileFetcher};
use crate::source::MapSource;
use crate::tile::TileAddress;

/// One tile to fetch and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub address: TileAddress,
    pub dest: PathBuf,
}

impl FetchJob {
    pub fn new(address: TileAddress, dest: impl Into<PathBuf>) -> Self {
        Self {
            address,
            dest: dest.into(),
        }
    }
}

/// Outcome of one job in a batch.
#[derive(Debug)]
pub struct FetchReport {
    pub job: FetchJob,
    pub result: FetchResult,
}

/// Fetches every job in parallel through `source` and `fetcher`.
///
/// Reports are returned in the order of the de-duplicated job list.
pub fn fetch_batch(
    source: &dyn MapSource,
    fetcher: &dyn TileFetcher,
    jobs: Vec<FetchJob>,
) -> Vec<FetchReport> {
    let total = jobs.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<FetchJob> = jobs
        .into_iter()
        .filter(|job| {
            let fresh = seen.insert(job.dest.clone());
            if !fresh {
                debug!(dest = %job.dest.display(), tile = %job.address, "Skipping duplicate destination");
            }
            fresh
        })
        .collect();

    let reports: Vec<FetchReport> = unique
        .into_par_iter()
        .map(|job| {
            let result = source.fetch_tile(&job.address, &job.dest, fetcher);
            FetchReport { job, result }
        })
        .collect();

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    info!(
        source = source.info().name.as_str(),
        requested = total,
        fetched = reports.len(),
        failed,
        "Batch fetch complete"
    );

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::http::tests::MockHttpClient;
    use crate::fetch::{FetchOutcome, HttpTileFetcher};
    use crate::scale::{ProviderType, ScaleLevel};
    use crate::source::TerraserverMapSource;
    use crate::validity::tests::jpeg_bytes;
    use tempfile::TempDir;

    fn addr(x: i32, y: i32) -> TileAddress {
        TileAddress::new(ScaleLevel::new(10).unwrap(), x, y, 33)
    }

    #[test]
    fn test_batch_fetches_each_tile() {
        let temp = TempDir::new().unwrap();
        let source = TerraserverMapSource::new(4, ProviderType::URBAN);
        let fetcher = HttpTileFetcher::new(MockHttpClient::ok(jpeg_bytes()));
        let jobs: Vec<FetchJob> = (0..8)
            .map(|i| FetchJob::new(addr(i, i), temp.path().join(format!("tile-{}", i))))
            .collect();

        let reports = fetch_batch(&source, &fetcher, jobs);

        assert_eq!(reports.len(), 8);
        assert!(reports
            .iter()
            .all(|r| matches!(r.result, Ok(FetchOutcome::Downloaded { .. }))));
        assert_eq!(fetcher.client().call_count(), 8);
    }

    #[test]
    fn test_batch_collapses_duplicate_destinations() {
        let temp = TempDir::new().unwrap();
        let source = TerraserverMapSource::new(4, ProviderType::URBAN);
        let fetcher = HttpTileFetcher::new(MockHttpClient::ok(jpeg_bytes()));
        let shared = temp.path().join("shared");
        let jobs = vec![
            FetchJob::new(addr(1, 1), &shared),
            FetchJob::new(addr(2, 2), temp.path().join("other")),
            FetchJob::new(addr(3, 3), &shared),
        ];

        let reports = fetch_batch(&source, &fetcher, jobs);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].job.address, addr(1, 1));
        assert_eq!(reports[1].job.address, addr(2, 2));
        assert_eq!(fetcher.client().call_count(), 2);
    }

    #[test]
    fn test_batch_reports_failures_individually() {
        let temp = TempDir::new().unwrap();
        let source = TerraserverMapSource::new(4, ProviderType::URBAN);
        let fetcher = HttpTileFetcher::new(MockHttpClient::failing("timeout"));
        let jobs = vec![
            FetchJob::new(addr(1, 1), temp.path().join("a")),
            FetchJob::new(addr(2, 2), temp.path().join("b")),
        ];

        let reports = fetch_batch(&source, &fetcher, jobs);

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.result.is_err()));
    }

    #[test]
    fn test_empty_batch() {
        let source = TerraserverMapSource::new(4, ProviderType::URBAN);
        let fetcher = HttpTileFetcher::new(MockHttpClient::ok(jpeg_bytes()));
        assert!(fetch_batch(&source, &fetcher, Vec::new()).is_empty());
    }
}
