pub mod error;
pub mod report_reader;
pub mod report_writer;

pub use error::ReportError;
pub use report_reader::{ParsedReport, ReportRecord, read_report};
pub use report_writer::{report_file_name, write_report};
