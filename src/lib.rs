// Car Sales Report - Core Library
// Exposes all modules for use in the CLI and tests

pub mod aggregator;
pub mod currency;
pub mod error;
pub mod mail;
pub mod records;
pub mod report;

// Re-export commonly used types
pub use aggregator::{compute_summary, format_summary, to_table, RevenueLeader, Summary};
pub use currency::PriceFormat;
pub use error::ReportError;
pub use mail::{guess_mime_type, MailTransport, Message, SmtpRelay};
pub use records::{load_records, CarInfo, SalesRecord};
pub use report::{render_document, DocumentFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
