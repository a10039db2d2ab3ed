pub mod flight;
pub mod report;
pub mod schedule;
pub mod time;

pub use flight::*;
pub use report::*;
pub use schedule::*;
pub use time::*;
