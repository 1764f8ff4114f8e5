//! This module implements the ISO values that a formatter can print.
//!
//! The main types are:
//!   - `IsoDate`
//!   - `IsoTime`
//!   - `IsoDateTime`
//!   - `Instant`
//!
//! Each implements `TemporalAccessor`, deriving every field it can from its
//! stored components.

use crate::{
    chronology::Chronology,
    fields::{DateTimeField, TemporalAccessor},
    FormatError, FormatResult,
};

pub(crate) const DAYS_0000_TO_1970: i64 = 146_097 * 5 - (30 * 365 + 7);
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;
const DAYS_PER_CYCLE: i64 = 146_097;

// ==== `IsoDate` section ====

/// A date in the ISO-8601 calendar system.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new validated `IsoDate`.
    pub fn new(year: i32, month: u8, day: u8) -> FormatResult<Self> {
        if !DateTimeField::Year.range().is_valid_value(year.into()) {
            return Err(FormatError::configuration().with_message("Year is out of range."));
        }
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(FormatError::configuration().with_message("not a valid ISO date."));
        }
        Ok(Self { year, month, day })
    }

    /// Creates the date that is `epoch_day` days after 1970-01-01.
    pub fn from_epoch_days(epoch_day: i64) -> FormatResult<Self> {
        DateTimeField::EpochDay
            .range()
            .check_valid_value(epoch_day, DateTimeField::EpochDay)?;
        let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
        let mut adjust = 0;
        if zero_day < 0 {
            let cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
            adjust = cycles * 400;
            zero_day -= cycles * DAYS_PER_CYCLE;
        }
        let mut year = (400 * zero_day + 591) / DAYS_PER_CYCLE;
        let mut day_of_year = zero_day - days_before_march_year(year);
        if day_of_year < 0 {
            year -= 1;
            day_of_year = zero_day - days_before_march_year(year);
        }
        year += adjust;

        let march_month = (day_of_year * 5 + 2) / 153;
        let month = (march_month + 2) % 12 + 1;
        let day = day_of_year - (march_month * 306 + 5) / 10 + 1;
        year += march_month / 10;
        // Epoch day range validation keeps all three values within their types.
        Ok(Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
        })
    }

    /// Returns the number of days since 1970-01-01.
    pub fn to_epoch_days(self) -> i64 {
        let year = i64::from(self.year);
        let month = i64::from(self.month);
        let mut total = 365 * year;
        if year >= 0 {
            total += (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400;
        } else {
            total -= year / -4 - year / -100 + year / -400;
        }
        total += (367 * month - 362) / 12;
        total += i64::from(self.day) - 1;
        if month > 2 {
            total -= 1;
            if !is_leap_year(self.year) {
                total -= 1;
            }
        }
        total - DAYS_0000_TO_1970
    }

    /// Returns the ISO day-of-week, from 1 (Monday) to 7 (Sunday).
    pub fn day_of_week(self) -> u8 {
        ((self.to_epoch_days() + 3).rem_euclid(7) + 1) as u8
    }

    /// Returns the day-of-year, from 1 to 366.
    pub fn day_of_year(self) -> u16 {
        let before: u16 = (1..self.month)
            .map(|m| u16::from(days_in_month(self.year, m)))
            .sum();
        before + u16::from(self.day)
    }
}

impl TemporalAccessor for IsoDate {
    fn field(&self, field: DateTimeField) -> Option<i64> {
        let year = i64::from(self.year);
        let month = i64::from(self.month);
        let day = i64::from(self.day);
        let value = match field {
            DateTimeField::DayOfWeek => self.day_of_week().into(),
            DateTimeField::AlignedDayOfWeekInMonth => (day - 1) % 7 + 1,
            DateTimeField::AlignedDayOfWeekInYear => (i64::from(self.day_of_year()) - 1) % 7 + 1,
            DateTimeField::DayOfMonth => day,
            DateTimeField::DayOfYear => self.day_of_year().into(),
            DateTimeField::EpochDay => self.to_epoch_days(),
            DateTimeField::AlignedWeekOfMonth => (day - 1) / 7 + 1,
            DateTimeField::AlignedWeekOfYear => (i64::from(self.day_of_year()) - 1) / 7 + 1,
            DateTimeField::MonthOfYear => month,
            DateTimeField::ProlepticMonth => year * 12 + month - 1,
            DateTimeField::YearOfEra if year >= 1 => year,
            DateTimeField::YearOfEra => 1 - year,
            DateTimeField::Year => year,
            DateTimeField::Era => i64::from(year >= 1),
            DateTimeField::QuarterOfYear => (month - 1) / 3 + 1,
            _ => return None,
        };
        Some(value)
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(Chronology::ISO)
    }
}

// ==== `IsoTime` section ====

/// A wall clock time without a date or zone.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,        // 0..=23
    pub minute: u8,      // 0..=59
    pub second: u8,      // 0..=59
    pub nanosecond: u32, // 0..=999_999_999
}

impl IsoTime {
    /// Creates a new validated `IsoTime`.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> FormatResult<Self> {
        if hour > 23 || minute > 59 || second > 59 || nanosecond > 999_999_999 {
            return Err(FormatError::configuration().with_message("IsoTime is not valid"));
        }
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
        })
    }

    /// Creates a time from the nanosecond of the day.
    pub fn from_nano_of_day(nano_of_day: i64) -> FormatResult<Self> {
        DateTimeField::NanoOfDay
            .range()
            .check_valid_value(nano_of_day, DateTimeField::NanoOfDay)?;
        let seconds = nano_of_day / NANOS_PER_SECOND;
        Ok(Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
            nanosecond: (nano_of_day % NANOS_PER_SECOND) as u32,
        })
    }

    /// Returns the second of the day.
    pub fn to_second_of_day(self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second)
    }

    /// Returns the nanosecond of the day.
    pub fn to_nano_of_day(self) -> i64 {
        self.to_second_of_day() * NANOS_PER_SECOND + i64::from(self.nanosecond)
    }
}

impl TemporalAccessor for IsoTime {
    fn field(&self, field: DateTimeField) -> Option<i64> {
        let hour = i64::from(self.hour);
        let nano = i64::from(self.nanosecond);
        let value = match field {
            DateTimeField::NanoOfSecond => nano,
            DateTimeField::NanoOfDay => self.to_nano_of_day(),
            DateTimeField::MicroOfSecond => nano / 1000,
            DateTimeField::MicroOfDay => self.to_nano_of_day() / 1000,
            DateTimeField::MilliOfSecond => nano / 1_000_000,
            DateTimeField::MilliOfDay => self.to_nano_of_day() / 1_000_000,
            DateTimeField::SecondOfMinute => self.second.into(),
            DateTimeField::SecondOfDay => self.to_second_of_day(),
            DateTimeField::MinuteOfHour => self.minute.into(),
            DateTimeField::MinuteOfDay => hour * 60 + i64::from(self.minute),
            DateTimeField::HourOfAmPm => hour % 12,
            DateTimeField::ClockHourOfAmPm if hour % 12 == 0 => 12,
            DateTimeField::ClockHourOfAmPm => hour % 12,
            DateTimeField::HourOfDay => hour,
            DateTimeField::ClockHourOfDay if hour == 0 => 24,
            DateTimeField::ClockHourOfDay => hour,
            DateTimeField::AmPmOfDay => hour / 12,
            _ => return None,
        };
        Some(value)
    }
}

// ==== `IsoDateTime` section ====

/// A date and time without a zone.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime`.
    pub const fn new(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates the local date-time of an epoch second and nanosecond at the given offset.
    pub fn from_epoch_seconds(
        seconds: i64,
        nanosecond: u32,
        offset_seconds: i32,
    ) -> FormatResult<Self> {
        let local = seconds
            .checked_add(offset_seconds.into())
            .ok_or(FormatError::print().with_message("Instant exceeds supported range"))?;
        let date = IsoDate::from_epoch_days(local.div_euclid(SECONDS_PER_DAY))?;
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY);
        let time = IsoTime::from_nano_of_day(
            second_of_day * NANOS_PER_SECOND + i64::from(nanosecond % 1_000_000_000),
        )?;
        Ok(Self { date, time })
    }

    /// Returns the epoch second of this date-time at the given offset.
    pub fn to_epoch_seconds(self, offset_seconds: i32) -> i64 {
        self.date.to_epoch_days() * SECONDS_PER_DAY + self.time.to_second_of_day()
            - i64::from(offset_seconds)
    }
}

impl TemporalAccessor for IsoDateTime {
    fn field(&self, field: DateTimeField) -> Option<i64> {
        self.date.field(field).or_else(|| self.time.field(field))
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(Chronology::ISO)
    }
}

// ==== `Instant` section ====

/// An instantaneous point on the time-line, as seconds and nanoseconds from 1970-01-01T00:00Z.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    seconds: i64,
    nanos: u32,
}

impl Instant {
    /// Creates an instant from an epoch second and a nanosecond adjustment below one second.
    pub fn new(seconds: i64, nanos: u32) -> FormatResult<Self> {
        if i64::from(nanos) >= NANOS_PER_SECOND {
            return Err(FormatError::configuration()
                .with_message("Nanosecond adjustment must be below one second"));
        }
        Ok(Self { seconds, nanos })
    }

    /// Returns the epoch second.
    pub const fn epoch_seconds(self) -> i64 {
        self.seconds
    }

    /// Returns the nanosecond of the second.
    pub const fn nanos(self) -> u32 {
        self.nanos
    }
}

impl TemporalAccessor for Instant {
    fn field(&self, field: DateTimeField) -> Option<i64> {
        let nanos = i64::from(self.nanos);
        match field {
            DateTimeField::InstantSeconds => Some(self.seconds),
            DateTimeField::NanoOfSecond => Some(nanos),
            DateTimeField::MicroOfSecond => Some(nanos / 1000),
            DateTimeField::MilliOfSecond => Some(nanos / 1_000_000),
            _ => None,
        }
    }
}

// ==== Utilities ====

#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days from 0000-03-01 to the March 1st of `year`, counting from a March based year.
#[inline]
fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}

#[cfg(test)]
mod tests {
    use super::{Instant, IsoDate, IsoDateTime, IsoTime, NANOS_PER_DAY};
    use crate::fields::{DateTimeField, TemporalAccessor};

    #[test]
    fn epoch_days_round_trip() {
        for epoch_day in [-719_528, -1, 0, 1, 10_957, 15_340, 2_932_896, -12_687_794] {
            let date = IsoDate::from_epoch_days(epoch_day).unwrap();
            assert_eq!(date.to_epoch_days(), epoch_day, "{date:?}");
        }
        let date = IsoDate::from_epoch_days(0).unwrap();
        assert_eq!((date.year, date.month, date.day), (1970, 1, 1));
        let date = IsoDate::from_epoch_days(-719_528).unwrap();
        assert_eq!((date.year, date.month, date.day), (0, 1, 1));
        let date = IsoDate::from_epoch_days(11_016).unwrap();
        assert_eq!((date.year, date.month, date.day), (2000, 2, 29));
    }

    #[test]
    fn date_validation() {
        assert!(IsoDate::new(2023, 2, 29).is_err());
        assert!(IsoDate::new(2024, 2, 29).is_ok());
        assert!(IsoDate::new(2024, 13, 1).is_err());
        assert!(IsoDate::new(2024, 4, 0).is_err());
    }

    #[test]
    fn date_fields() {
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(date.field(DateTimeField::DayOfWeek), Some(6));
        assert_eq!(date.field(DateTimeField::DayOfYear), Some(337));
        assert_eq!(date.field(DateTimeField::QuarterOfYear), Some(4));
        assert_eq!(date.field(DateTimeField::ProlepticMonth), Some(2011 * 12 + 11));
        assert_eq!(date.field(DateTimeField::Era), Some(1));
        assert_eq!(date.field(DateTimeField::HourOfDay), None);

        let bce = IsoDate::new(-5, 1, 1).unwrap();
        assert_eq!(bce.field(DateTimeField::YearOfEra), Some(6));
        assert_eq!(bce.field(DateTimeField::Era), Some(0));
    }

    #[test]
    fn time_fields() {
        let midnight = IsoTime::new(0, 0, 0, 0).unwrap();
        assert_eq!(midnight.field(DateTimeField::ClockHourOfDay), Some(24));
        assert_eq!(midnight.field(DateTimeField::ClockHourOfAmPm), Some(12));

        let time = IsoTime::new(13, 45, 30, 123_456_789).unwrap();
        assert_eq!(time.field(DateTimeField::HourOfAmPm), Some(1));
        assert_eq!(time.field(DateTimeField::AmPmOfDay), Some(1));
        assert_eq!(time.field(DateTimeField::MilliOfSecond), Some(123));
        assert_eq!(time.field(DateTimeField::MinuteOfDay), Some(13 * 60 + 45));
        assert_eq!(
            IsoTime::from_nano_of_day(time.to_nano_of_day()).unwrap(),
            time
        );
        assert!(IsoTime::from_nano_of_day(NANOS_PER_DAY).is_err());
    }

    #[test]
    fn epoch_second_conversion() {
        let dt = IsoDateTime::from_epoch_seconds(-1, 5, 0).unwrap();
        assert_eq!((dt.date.year, dt.date.month, dt.date.day), (1969, 12, 31));
        assert_eq!((dt.time.hour, dt.time.minute, dt.time.second), (23, 59, 59));
        assert_eq!(dt.to_epoch_seconds(0), -1);

        let instant = Instant::new(1_000, 500_000_000).unwrap();
        assert_eq!(instant.field(DateTimeField::MilliOfSecond), Some(500));
        assert!(Instant::new(0, 1_000_000_000).is_err());
    }
}
