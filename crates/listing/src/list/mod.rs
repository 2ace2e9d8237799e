pub mod controller;
pub mod error;
pub mod state;

pub use controller::{ListingConfig, ListingController, LoadOutcome, RefreshPolicy};
pub use error::ListingError;
pub use state::ListingState;
