//! Participant invokers

mod process;

pub use process::ProcessInvoker;
