pub mod cancellation;

pub use cancellation::run_cancellable;
