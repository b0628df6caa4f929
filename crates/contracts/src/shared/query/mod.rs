//! Client-side query over an already-fetched collection.
//!
//! Data flows one way:
//!
//! ```text
//! CollectionSource -> FilterSet -> Comparator -> Pagination -> projection -> view
//! ```
//!
//! Everything here is synchronous and pure; the source collection is never
//! mutated, surviving records are borrowed until the final projection.

pub mod filter;
pub mod list_query;
pub mod paginate;
pub mod sort;
pub mod source;

pub use filter::{FilterSet, NumericRange, Searchable, SetFilter, TextQuery, Threshold};
pub use list_query::{ListQuery, QueryOutcome};
pub use paginate::{page_count, paginate, Pagination};
pub use sort::{sort_stable, Comparator};
pub use source::{CollectionSource, Record};
