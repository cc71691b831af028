pub mod session;
pub mod snapshot;

pub use session::PmuSession;
pub use snapshot::Snapshot;
