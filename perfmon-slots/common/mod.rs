pub mod bank;
pub mod capability;

pub use bank::CounterBank;
pub use capability::Capabilities;
