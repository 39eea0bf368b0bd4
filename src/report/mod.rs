pub mod export;
pub mod generator;
pub mod stats;

pub use export::{default_filename, to_csv};
pub use generator::{generate_report, render_report};
pub use stats::{summary, DateRange};
