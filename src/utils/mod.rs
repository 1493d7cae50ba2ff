pub mod date;
pub mod duration;
pub mod path;
pub mod table;

pub use date::{format_timestamp, now, parse_timestamp};
pub use duration::{format_duration, parse_duration};
