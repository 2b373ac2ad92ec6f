//! Printable daily journals laid out as A5 cells on A4 sheets.
//!
//! [`pagination`] holds the pure day/page arithmetic and sheet layout,
//! [`config`] validates raw input into a [`config::JournalConfig`], and
//! [`render`] draws the result as a PDF.

pub mod config;
pub mod error;
pub mod locale;
pub mod logging;
pub mod pagination;
pub mod render;

pub use config::{CategoryList, DateRange, JournalConfig, JournalMode};
pub use error::AppError;
pub use locale::{Catalog, Locale};
pub use pagination::{
    days_between, days_for_pages, generate_date_sequence, journal_days, pages_for_days, paginate,
    JournalDay, Sheet, SheetKind, Slot,
};
