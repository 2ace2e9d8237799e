pub mod aggregate;
pub mod filter;
pub mod query;

pub use aggregate::{ProjectId, ProjectStatus, ProjectSummary, PropertyType};
pub use filter::{AreaRange, FilterCriteria, PriceRange, RangeError, ValueRange};
pub use query::{PageRequest, ProjectListQuery};
