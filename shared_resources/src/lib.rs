pub mod config;
pub mod direction;
pub mod error;
pub mod request;
pub mod service_queue;
pub mod unit_status;

pub type Floor = u8;
pub type UnitId = usize;
