//! The `temporal_format` crate is a composable printer-parser engine for
//! formatting and parsing date-time values in Rust.
//!
//! ```rust
//! use temporal_format::{DateTimeField, DateTimeFormatter};
//! use temporal_format::iso::{IsoDate, IsoDateTime, IsoTime};
//!
//! // Print a date-time with a pattern
//! let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd HH:mm[:ss]").unwrap();
//! let value = IsoDateTime::new(
//!     IsoDate::new(2011, 6, 30).unwrap(),
//!     IsoTime::new(13, 5, 0, 0).unwrap(),
//! );
//! assert_eq!(formatter.format(&value).unwrap(), "2011-06-30 13:05:00");
//!
//! // Parse text back into its field values
//! let parsed = formatter.parse("2011-06-30 13:05").unwrap();
//! assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(13));
//! assert_eq!(parsed.get(DateTimeField::SecondOfMinute), None);
//! ```
//!
//! Formatters are assembled from printer-parser nodes by a
//! [`DateTimeFormatterBuilder`], either one node at a time or by compiling a
//! pattern. Parsing produces an unresolved [`Parsed`] set of field values;
//! combining those fields into a date or time is left to the caller.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in benchmarks.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,

    // Add temporarily - Needs addressing
    clippy::missing_panics_doc,
)]

extern crate alloc;

#[doc(hidden)]
#[macro_export]
macro_rules! format_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::FormatError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::FormatError::assert());
        }
    };
}

pub mod chronology;
pub mod error;
pub mod fields;
pub mod format;
pub mod iso;
pub mod options;
pub mod parsed;
pub mod provider;
pub mod timezone;

#[doc(inline)]
pub use error::{ErrorKind, FormatError};

/// The `temporal_format` result type
pub type FormatResult<T> = Result<T, FormatError>;

pub use crate::{
    chronology::Chronology,
    fields::{DateTimeField, TemporalAccessor, ValueRange},
    format::{DateTimeFormatter, DateTimeFormatterBuilder, FormatSymbols, ParsePosition},
    options::{FormatStyle, OffsetPattern, SignStyle, TextStyle},
    parsed::Parsed,
    timezone::{UtcOffset, ZoneId},
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait FormatUnwrap {
    type Output;

    /// `temporal_format` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn format_unwrap(self) -> FormatResult<Self::Output>;
}

impl<T> FormatUnwrap for Option<T> {
    type Output = T;

    fn format_unwrap(self) -> FormatResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(FormatError::assert())
    }
}
