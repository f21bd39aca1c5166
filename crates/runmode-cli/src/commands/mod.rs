//! Command implementations for runmode-cli

pub mod list;
pub mod matches;
pub mod properties;
pub mod status;

pub use list::run_list;
pub use matches::run_match;
pub use properties::run_properties;
pub use status::run_status;
