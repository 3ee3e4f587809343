//! Built-in record source implementations
//!
//! - [`SnapshotSource`]: Replays a previously committed JSON snapshot
//! - [`FixedSource`]: Serves a fixed in-memory list
//!
//! Sources that discover fresh addresses from real infrastructure are
//! deliberately not part of this crate; they plug in through
//! [`RecordSource`](crate::traits::RecordSource).

pub mod fixed;
pub mod snapshot;

pub use fixed::{FixedFactory, FixedSource};
pub use snapshot::{SnapshotFactory, SnapshotSource};
