//! Phasor Frontend - instance dashboard
//!
//! Each `/tiles` request fetches N instance snapshots from the backend, gives
//! every distinct `hostname|version` a color from the configured palette, sorts
//! the tiles and renders them as an HTML fragment.

pub mod colors;
pub mod config;
pub mod http;
pub mod models;
pub mod render;
pub mod source;
pub mod tiles;

pub use colors::{ColorTracker, FALLBACK_COLOR};
pub use http::{build_router, AppOptions};
pub use models::{InstanceSnapshot, TileRecord};
pub use source::{FetchError, HttpInstanceSource, InstanceSource};
pub use tiles::{aggregate, FetchMode, TileCount};
