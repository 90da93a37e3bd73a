pub mod assignment;
pub mod availability;
pub mod conflicts;
pub mod notify;
pub mod settlement;
pub mod stores;

#[cfg(test)]
pub mod testing;

pub use assignment::{AssignRequest, AssignmentEngine};
pub use availability::is_available;
pub use conflicts::check_assignable;
pub use notify::LogNotifier;
pub use stores::{NotificationSink, Stores};
