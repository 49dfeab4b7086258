pub mod snapshot;

pub use snapshot::{SnapshotWriter, HEADER, UTF8_BOM};
