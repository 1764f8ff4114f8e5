//! This module implements the date-time fields that printer-parsers read and write.

use core::fmt;
use core::str::FromStr;

use crate::{chronology::Chronology, timezone::ZoneId, FormatError, FormatResult};

const YEAR_MIN: i64 = -999_999_999;
const YEAR_MAX: i64 = 999_999_999;
const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// The range of valid values for a date-time field.
///
/// A range is described by four values: the smallest minimum, the largest
/// minimum, the smallest maximum and the largest maximum. For a field such as
/// day-of-month the range is `1 - 28/31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min: i64,
    largest_min: i64,
    smallest_max: i64,
    max: i64,
}

impl ValueRange {
    /// Creates a fixed range where the minimum and maximum never vary.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min,
            largest_min: min,
            smallest_max: max,
            max,
        }
    }

    /// Creates a range where only the maximum varies.
    pub const fn of_variable_max(min: i64, smallest_max: i64, max: i64) -> Self {
        Self {
            min,
            largest_min: min,
            smallest_max,
            max,
        }
    }

    /// Returns the smallest possible minimum value.
    pub const fn minimum(&self) -> i64 {
        self.min
    }

    /// Returns the largest possible maximum value.
    pub const fn maximum(&self) -> i64 {
        self.max
    }

    /// Returns the largest possible minimum value.
    pub const fn largest_minimum(&self) -> i64 {
        self.largest_min
    }

    /// Returns the smallest possible maximum value.
    pub const fn smallest_maximum(&self) -> i64 {
        self.smallest_max
    }

    /// Returns whether the minimum and maximum are both fixed.
    pub const fn is_fixed(&self) -> bool {
        self.min == self.largest_min && self.max == self.smallest_max
    }

    /// Returns whether `value` lies within the outer bounds of this range.
    pub const fn is_valid_value(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Checks that `value` is valid for `field`, returning it on success.
    pub fn check_valid_value(&self, value: i64, field: DateTimeField) -> FormatResult<i64> {
        if !self.is_valid_value(value) {
            return Err(FormatError::print().with_message(alloc::format!(
                "Invalid value for {field} (valid values {self}): {value}"
            )));
        }
        Ok(value)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min)?;
        if self.min != self.largest_min {
            write!(f, "/{}", self.largest_min)?;
        }
        write!(f, " - {}", self.smallest_max)?;
        if self.smallest_max != self.max {
            write!(f, "/{}", self.max)?;
        }
        Ok(())
    }
}

/// A field of date-time, such as month-of-year or hour-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeField {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
    QuarterOfYear,
}

impl DateTimeField {
    /// Returns the range of valid values for this field in the ISO calendar.
    pub const fn range(self) -> ValueRange {
        use DateTimeField::*;
        match self {
            NanoOfSecond => ValueRange::of(0, 999_999_999),
            NanoOfDay => ValueRange::of(0, NANOS_PER_DAY - 1),
            MicroOfSecond => ValueRange::of(0, 999_999),
            MicroOfDay => ValueRange::of(0, NANOS_PER_DAY / 1000 - 1),
            MilliOfSecond => ValueRange::of(0, 999),
            MilliOfDay => ValueRange::of(0, NANOS_PER_DAY / 1_000_000 - 1),
            SecondOfMinute => ValueRange::of(0, 59),
            SecondOfDay => ValueRange::of(0, 86_400 - 1),
            MinuteOfHour => ValueRange::of(0, 59),
            MinuteOfDay => ValueRange::of(0, 24 * 60 - 1),
            HourOfAmPm => ValueRange::of(0, 11),
            ClockHourOfAmPm => ValueRange::of(1, 12),
            HourOfDay => ValueRange::of(0, 23),
            ClockHourOfDay => ValueRange::of(1, 24),
            AmPmOfDay => ValueRange::of(0, 1),
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            DayOfMonth => ValueRange::of_variable_max(1, 28, 31),
            DayOfYear => ValueRange::of_variable_max(1, 365, 366),
            EpochDay => ValueRange::of(-365_243_219_162, 365_241_780_471),
            AlignedWeekOfMonth => ValueRange::of_variable_max(1, 4, 5),
            AlignedWeekOfYear => ValueRange::of(1, 53),
            MonthOfYear => ValueRange::of(1, 12),
            ProlepticMonth => ValueRange::of(YEAR_MIN * 12, YEAR_MAX * 12 + 11),
            YearOfEra => ValueRange::of_variable_max(1, YEAR_MAX, YEAR_MAX + 1),
            Year => ValueRange::of(YEAR_MIN, YEAR_MAX),
            Era => ValueRange::of(0, 1),
            InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            OffsetSeconds => ValueRange::of(-18 * 3600, 18 * 3600),
            QuarterOfYear => ValueRange::of(1, 4),
        }
    }

    /// Returns the display name of the field.
    pub const fn name(self) -> &'static str {
        use DateTimeField::*;
        match self {
            NanoOfSecond => "NanoOfSecond",
            NanoOfDay => "NanoOfDay",
            MicroOfSecond => "MicroOfSecond",
            MicroOfDay => "MicroOfDay",
            MilliOfSecond => "MilliOfSecond",
            MilliOfDay => "MilliOfDay",
            SecondOfMinute => "SecondOfMinute",
            SecondOfDay => "SecondOfDay",
            MinuteOfHour => "MinuteOfHour",
            MinuteOfDay => "MinuteOfDay",
            HourOfAmPm => "HourOfAmPm",
            ClockHourOfAmPm => "ClockHourOfAmPm",
            HourOfDay => "HourOfDay",
            ClockHourOfDay => "ClockHourOfDay",
            AmPmOfDay => "AmPmOfDay",
            DayOfWeek => "DayOfWeek",
            AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            DayOfMonth => "DayOfMonth",
            DayOfYear => "DayOfYear",
            EpochDay => "EpochDay",
            AlignedWeekOfMonth => "AlignedWeekOfMonth",
            AlignedWeekOfYear => "AlignedWeekOfYear",
            MonthOfYear => "MonthOfYear",
            ProlepticMonth => "ProlepticMonth",
            YearOfEra => "YearOfEra",
            Year => "Year",
            Era => "Era",
            InstantSeconds => "InstantSeconds",
            OffsetSeconds => "OffsetSeconds",
            QuarterOfYear => "QuarterOfYear",
        }
    }

    /// Returns the field that a pattern letter maps to, if any.
    ///
    /// Zone and offset letters (`z`, `V`, `Z`, `X`, `x`) and the pad prefix `p`
    /// are handled separately by the pattern compiler.
    pub const fn from_pattern_letter(letter: char) -> Option<Self> {
        use DateTimeField::*;
        let field = match letter {
            'G' => Era,
            'y' => Year,
            'Q' => QuarterOfYear,
            'M' => MonthOfYear,
            'D' => DayOfYear,
            'd' => DayOfMonth,
            'F' => AlignedWeekOfMonth,
            'E' => DayOfWeek,
            'a' => AmPmOfDay,
            'H' => HourOfDay,
            'k' => ClockHourOfDay,
            'K' => HourOfAmPm,
            'h' => ClockHourOfAmPm,
            'm' => MinuteOfHour,
            's' => SecondOfMinute,
            'S' | 'n' => NanoOfSecond,
            'A' => MilliOfDay,
            'N' => NanoOfDay,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsing error for `DateTimeField`.
#[derive(Debug, Clone, Copy)]
pub struct ParseDateTimeFieldError;

impl fmt::Display for ParseDateTimeFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid DateTimeField")
    }
}

impl FromStr for DateTimeField {
    type Err = ParseDateTimeFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FIELDS
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or(ParseDateTimeFieldError)
    }
}

const ALL_FIELDS: [DateTimeField; 31] = {
    use DateTimeField::*;
    [
        NanoOfSecond,
        NanoOfDay,
        MicroOfSecond,
        MicroOfDay,
        MilliOfSecond,
        MilliOfDay,
        SecondOfMinute,
        SecondOfDay,
        MinuteOfHour,
        MinuteOfDay,
        HourOfAmPm,
        ClockHourOfAmPm,
        HourOfDay,
        ClockHourOfDay,
        AmPmOfDay,
        DayOfWeek,
        AlignedDayOfWeekInMonth,
        AlignedDayOfWeekInYear,
        DayOfMonth,
        DayOfYear,
        EpochDay,
        AlignedWeekOfMonth,
        AlignedWeekOfYear,
        MonthOfYear,
        ProlepticMonth,
        YearOfEra,
        Year,
        Era,
        InstantSeconds,
        OffsetSeconds,
        QuarterOfYear,
    ]
};

/// Read-only access to the values a formatter prints.
///
/// Any missing value is reported as `None`, which makes the enclosing optional
/// section vanish or, outside an optional section, fails the print.
pub trait TemporalAccessor {
    /// Returns the value of `field`, if this accessor supports it.
    fn field(&self, field: DateTimeField) -> Option<i64>;

    /// Returns the time zone of this accessor, if any.
    fn zone(&self) -> Option<ZoneId> {
        None
    }

    /// Returns the chronology of this accessor, if any.
    fn chronology(&self) -> Option<Chronology> {
        None
    }
}
