//! Printing and parsing of date-time values.
//!
//! A [`DateTimeFormatter`] is an immutable tree of printer-parsers assembled by
//! a [`DateTimeFormatterBuilder`], either node by node or from a pattern. Each
//! node prints part of a value and parses the same part back into a
//! [`Parsed`][crate::parsed::Parsed] set of field values.

mod builder;
mod chrono;
mod context;
mod formatter;
mod instant;
mod number;
mod offset;
mod pattern;
mod predefined;
mod printer_parser;
mod text;
mod zone;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use builder::DateTimeFormatterBuilder;
#[doc(inline)]
pub use context::FormatSymbols;
#[doc(inline)]
pub use formatter::{DateTimeFormatter, ParsePosition};
