//! Tile image sources.
//!
//! The compositor never reads tiles itself; it asks a [`TileSource`] for the
//! decoded pixels of each [`TileCoord`](crate::coord::TileCoord). This keeps
//! storage concerns (directory on disk, in-memory store, a remote service)
//! out of the rastering core.
//!
//! ```text
//! ┌────────────────┐      ┌────────────────────┐
//! │   Compositor   │─────►│ Arc<dyn TileSource>│
//! └────────────────┘      └─────────┬──────────┘
//!                              ┌────┴─────┐
//!                              ▼          ▼
//!                     ┌──────────────┐ ┌──────────────┐
//!                     │DirectoryTile │ │ MemoryTile   │
//!                     │   Source     │ │   Source     │
//!                     └──────────────┘ └──────────────┘
//! ```

mod directory;
mod memory;
mod source;

pub use directory::DirectoryTileSource;
pub use memory::MemoryTileSource;
pub use source::{TileSource, TileSourceError};
