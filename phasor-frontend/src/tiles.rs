//! Tile Aggregator
//!
//! Per `/tiles` request: clamp the requested count, fetch that many snapshots,
//! color them through a request-scoped [`ColorTracker`], sort by hostname then
//! version (both descending) and renumber positions 1..N.
//!
//! A failed fetch becomes a placeholder tile and never aborts its siblings.
//! Dropping the returned future cancels the fetches still in flight; no partial
//! tile list ever escapes.

use crate::colors::ColorTracker;
use crate::models::{InstanceSnapshot, TileRecord};
use crate::source::{FetchError, InstanceSource};
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_TILE_COUNT: usize = 3;
pub const MAX_TILE_COUNT: usize = 20;

/// Number of tiles for one request, always in [1, MAX_TILE_COUNT]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCount(usize);

impl TileCount {
    /// Anything unparsable or out of range silently becomes the default (3)
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse::<i64>().ok())
            .filter(|n| (1..=MAX_TILE_COUNT as i64).contains(n))
            .map(|n| Self(n as usize))
            .unwrap_or_default()
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TileCount {
    fn default() -> Self {
        Self(DEFAULT_TILE_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One fetch after the other
    #[default]
    Sequential,
    /// All fetches in flight at once, joined before sorting
    Concurrent,
}

pub async fn aggregate<S>(
    source: &S,
    count: TileCount,
    palette: &[String],
    mode: FetchMode,
) -> Vec<TileRecord>
where
    S: InstanceSource,
{
    let n = count.get();
    let mut tracker = ColorTracker::new(palette);
    let mut tiles = Vec::with_capacity(n);

    match mode {
        FetchMode::Sequential => {
            for position in 1..=n {
                let outcome = source.fetch().await;
                tiles.push(build_tile(position, outcome, &mut tracker));
            }
        }
        FetchMode::Concurrent => {
            let outcomes = join_all((0..n).map(|_| source.fetch())).await;
            for (i, outcome) in outcomes.into_iter().enumerate() {
                tiles.push(build_tile(i + 1, outcome, &mut tracker));
            }
        }
    }

    sort_tiles(&mut tiles);
    renumber(&mut tiles);
    debug!(tiles = tiles.len(), colors = tracker.assigned_count(), "tiles aggregated");
    tiles
}

fn build_tile(
    position: usize,
    outcome: Result<InstanceSnapshot, FetchError>,
    tracker: &mut ColorTracker<'_>,
) -> TileRecord {
    let snapshot = outcome.unwrap_or_else(|e| {
        warn!(tile = position, error = %e, "instance fetch failed, showing placeholder");
        InstanceSnapshot::fetch_failed()
    });
    let color = tracker.color_for(&snapshot.color_key()).to_owned();

    TileRecord {
        position,
        label_color: color.clone(),
        color,
        snapshot,
    }
}

/// Hostname desc, then version desc. Stable, so full ties keep fetch order.
pub fn sort_tiles(tiles: &mut [TileRecord]) {
    tiles.sort_by(|a, b| {
        b.snapshot
            .hostname
            .cmp(&a.snapshot.hostname)
            .then_with(|| b.snapshot.version.cmp(&a.snapshot.version))
    });
}

pub fn renumber(tiles: &mut [TileRecord]) {
    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.position = i + 1;
    }
}
