/// CSV export of report rows.
pub mod export;
