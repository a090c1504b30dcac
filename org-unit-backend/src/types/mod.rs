pub mod query;

pub use query::{PageRequest, SortField, SortOrder, Sorting};
