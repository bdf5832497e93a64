pub mod format;
pub mod io;

pub use format::{format_amount, format_axis_value, format_cell, format_percentage};
pub use io::atomic_write;
