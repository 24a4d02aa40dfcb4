pub mod console;
pub mod cost;
pub mod debug;
pub mod dispatcher;
pub mod report;
pub mod request_log;
pub mod scheduler;

pub use dispatcher::Dispatcher;
pub use report::{LogSink, StatusSink};
