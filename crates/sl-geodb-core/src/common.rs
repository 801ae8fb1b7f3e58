// crates/sl-geodb-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the database.
///
/// Returned by [`GeoDb::stats`](crate::GeoDb::stats). Level counts are
/// distinct normalized names per kind; `towns` counts tree leaves, so
/// repeated rows are counted each time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub records: usize,
    pub regions: usize,
    pub districts: usize,
    pub councils: usize,
    pub chiefdoms: usize,
    pub sections: usize,
    pub towns: usize,
}
