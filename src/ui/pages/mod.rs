pub mod sourcing;
pub mod staging;

pub use sourcing::SourcingPage;
pub use staging::StagingPage;
