//! Census queries over the hospital store.
//!
//! Every function issues one statement and lets SQLite do the joins,
//! grouping and correlated "latest examination" lookups. Mapping-style
//! answers come back as vectors ordered by the id of their key entity;
//! hospitals and departments without matching rows are still listed.

mod hospitals;
mod patients;
mod persons;
mod predicate;
mod report;
mod types;
mod workers;

pub use hospitals::*;
pub use patients::*;
pub use persons::*;
pub use report::*;
pub use types::*;
pub use workers::*;

// ── Tests ──────────────────────────────────────────────────────────────────
