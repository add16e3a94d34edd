pub mod log;

pub use log::LogEmailNotifier;
