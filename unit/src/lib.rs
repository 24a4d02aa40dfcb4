pub mod elevator;
pub mod handle;

pub use elevator::{Motion, Unit};
pub use handle::UnitHandle;
