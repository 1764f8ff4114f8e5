//! The calendar systems a formatter can print, parse and localize against.

use core::fmt;
use core::str::FromStr;

use tinystr::{tinystr, TinyAsciiStr};

use crate::fields::{DateTimeField, ValueRange};

/// A calendar system, identified by its id and its CLDR calendar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chronology {
    id: TinyAsciiStr<16>,
    calendar_type: TinyAsciiStr<16>,
    year_offset: i64,
}

impl Default for Chronology {
    fn default() -> Self {
        Self::ISO
    }
}

impl Chronology {
    /// The ISO-8601 calendar system.
    pub const ISO: Self = Self::new(tinystr!(16, "ISO"), tinystr!(16, "iso8601"), 0);
    /// The Minguo calendar, used in Taiwan, offset from ISO by 1911 years.
    pub const MINGUO: Self = Self::new(tinystr!(16, "Minguo"), tinystr!(16, "roc"), 1911);
    /// The Japanese imperial calendar.
    pub const JAPANESE: Self = Self::new(tinystr!(16, "Japanese"), tinystr!(16, "japanese"), 0);
    /// The Thai Buddhist calendar, offset from ISO by -543 years.
    pub const THAI_BUDDHIST: Self =
        Self::new(tinystr!(16, "ThaiBuddhist"), tinystr!(16, "buddhist"), -543);
    /// The Hijrah calendar.
    pub const HIJRAH: Self = Self::new(
        tinystr!(16, "Hijrah-umalqura"),
        tinystr!(16, "islamic-umalqura"),
        0,
    );

    /// All chronologies built into this crate.
    pub const BUILTIN: [Self; 5] = [
        Self::ISO,
        Self::MINGUO,
        Self::JAPANESE,
        Self::THAI_BUDDHIST,
        Self::HIJRAH,
    ];

    /// Creates a chronology that shares the ISO field ranges shifted by `year_offset`.
    pub const fn new(
        id: TinyAsciiStr<16>,
        calendar_type: TinyAsciiStr<16>,
        year_offset: i64,
    ) -> Self {
        Self {
            id,
            calendar_type,
            year_offset,
        }
    }

    /// Returns the chronology id, such as `ISO` or `Minguo`.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the CLDR calendar type, such as `iso8601` or `roc`.
    pub fn calendar_type(&self) -> &str {
        self.calendar_type.as_str()
    }

    /// Returns the range of `field` in this calendar system.
    pub fn range(&self, field: DateTimeField) -> ValueRange {
        let iso = field.range();
        if self.year_offset == 0 {
            return iso;
        }
        let offset = self.year_offset;
        match field {
            DateTimeField::Year => ValueRange::of(iso.minimum() - offset, iso.maximum() - offset),
            DateTimeField::ProlepticMonth => ValueRange::of(
                iso.minimum() - offset * 12,
                iso.maximum() - offset * 12,
            ),
            DateTimeField::YearOfEra => {
                let year = DateTimeField::Year.range();
                ValueRange::of_variable_max(
                    1,
                    year.maximum() - offset,
                    -year.minimum() + 1 + offset,
                )
            }
            _ => iso,
        }
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A parsing error for `Chronology`.
#[derive(Debug, Clone, Copy)]
pub struct ParseChronologyError;

impl fmt::Display for ParseChronologyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a known chronology id or calendar type")
    }
}

impl FromStr for Chronology {
    type Err = ParseChronologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::BUILTIN
            .iter()
            .copied()
            .find(|chrono| chrono.id() == s || chrono.calendar_type() == s)
            .ok_or(ParseChronologyError)
    }
}
