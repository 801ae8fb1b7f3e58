//! sl-geodb-cli
//! ============
//!
//! Command-line interface for the `sl-geodb-core` location database.
//!
//! This crate primarily provides a binary (`sl-geodb`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! ```text
//! sl-geodb --help
//! sl-geodb stats
//! sl-geodb search "magbass" --kind town
//! sl-geodb validate --region southern --district bo --chiefdom kakua
//! sl-geodb --json autocomplete ken
//! ```
//!
//! For programmatic access to the data structures and APIs, use the
//! [`sl-geodb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
