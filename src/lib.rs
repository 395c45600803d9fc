//! xlsxschedule - Bus timetable extraction from hand-authored spreadsheets
//!
//! This crate reads loosely-structured shuttle timetables (multiple sheets, merged
//! cells, mixed time notations, free-text driver/plate fields) and extracts a
//! normalized schedule: per-stop departures, per-destination departures, and one
//! combined timetable ordered by operating day (05:00 through 04:59).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxschedule::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create an extractor with default settings
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     // Open the timetable workbook
//!     let input = File::open("timetable.xlsx")?;
//!
//!     // Write "Hotel Departures", "WCH Departures" and "Combined Schedule"
//!     let output = File::create("schedule.xlsx")?;
//!     extractor.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Extracting from decoded sheets
//!
//! The extraction core works on an already decoded [`Workbook`], so it can be
//! fed from any source:
//!
//! ```rust
//! use xlsxschedule::{ExtractorBuilder, Sheet, Workbook};
//!
//! # fn main() -> Result<(), xlsxschedule::ScheduleError> {
//! let sheet = Sheet::new(
//!     "Day 1",
//!     vec![
//!         vec!["Bus No", "Bus Details", "Hotel A (Pick up only)", "WCH"],
//!         vec!["101", "John Tan\nSBA1234X", "7:00", "0.3333"],
//!     ],
//! );
//!
//! let extractor = ExtractorBuilder::new().build()?;
//! let bundle = extractor.extract(&Workbook::new(vec![sheet]))?;
//!
//! let departure = &bundle.stop_departures[0];
//! assert_eq!(departure.time_text(), "07:00");
//! assert_eq!(departure.location, "Hotel A");
//! assert_eq!(departure.driver, "John Tan");
//! assert_eq!(departure.license_plate, "SBA1234X");
//!
//! assert_eq!(bundle.destination_departures[0].time_text(), "08:00");
//! assert_eq!(bundle.combined.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxschedule::{ExtractorBuilder, OutputFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_sheet_selector(SheetSelector::Names(vec!["Day 1".into(), "Day 2".into()]))
//!         .with_extra_stop_keywords(["marina"])  // recognize "Marina Bay" as a stop
//!         .with_output_format(OutputFormat::Markdown)  // operator preview
//!         .build()?;
//!
//!     let input = File::open("timetable.xlsx")?;
//!     println!("{}", extractor.convert_to_string(input)?);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod extract;
mod header;
mod label;
mod output;
mod parser;
mod report;
mod schedule;
mod security;
mod time;
mod types;

// 公開API
pub use api::{DepartureType, OutputFormat, SheetSelector, SheetStatus};
pub use builder::{Extractor, ExtractorBuilder, DEFAULT_MIN_SHEET_ROWS};
pub use error::ScheduleError;
pub use extract::{BusContext, RowExtractor, SheetBatch, DEFAULT_DAY_START_HOUR, DEFAULT_LOOKBACK_ROWS};
pub use header::{
    locate_header, ColumnRole, ColumnRule, HeaderLocator, HeaderRules, DEFAULT_HEADER_SCAN_ROWS,
};
pub use label::{clean_route_name, clean_stop_name, parse_driver_and_license, DriverDetails};
pub use report::SheetSummary;
pub use schedule::{minutes_since_5am, sort_by_operating_day};
pub use time::{parse_time, parse_time_text};
pub use types::{
    DepartureRecord, HeaderLayout, RawCell, ScheduleBundle, Sheet, StopColumn, Workbook,
};
