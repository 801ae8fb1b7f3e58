// crates/sl-geodb-core/src/model/mod.rs
pub mod convert;
pub mod db;
pub mod flat;
pub mod kind;
pub mod nested;

pub use convert::build_hierarchy;
pub use db::GeoDb;
pub use flat::{FlatRecord, PATH_SEPARATOR};
pub use kind::{LocationKind, MAX_CODE_LEN};
pub use nested::{Chiefdom, District, NodeRef, Region, Town};
