//! Export file naming.

use chrono::{DateTime, Local, TimeZone};

/// `edited_<yyyyMMdd_HHmmss>.png` for the given instant, in that instant's
/// own time zone.
pub fn build_export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("edited_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// Export file name for the current local time.
pub fn export_file_name() -> String {
    build_export_file_name(&Local::now())
}
