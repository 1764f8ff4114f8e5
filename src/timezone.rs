//! This module implements the zone and offset values produced and consumed by
//! the zone printer-parsers.

use alloc::string::String;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{FormatError, FormatResult};

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A fixed offset from UTC, stored in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The offset of UTC itself.
    pub const UTC: Self = Self(0);

    /// Creates an offset from a total number of seconds within ±18 hours.
    pub fn from_seconds(seconds: i32) -> FormatResult<Self> {
        if !(-MAX_OFFSET_SECONDS..=MAX_OFFSET_SECONDS).contains(&seconds) {
            return Err(FormatError::configuration()
                .with_message("Zone offset not in valid range: -18:00 to +18:00"));
        }
        Ok(Self(seconds))
    }

    /// Creates an offset from hours, minutes and seconds, which must share a sign.
    pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> FormatResult<Self> {
        let positive = hours > 0 || minutes > 0 || seconds > 0;
        let negative = hours < 0 || minutes < 0 || seconds < 0;
        if positive && negative {
            return Err(FormatError::configuration()
                .with_message("Zone offset hours, minutes and seconds must have the same sign"));
        }
        if minutes.abs() > 59 || seconds.abs() > 59 {
            return Err(FormatError::configuration()
                .with_message("Zone offset minutes and seconds must be in the range 0 to 59"));
        }
        Self::from_seconds(hours * 3600 + minutes * 60 + seconds)
    }

    /// Returns the total offset in seconds.
    pub const fn total_seconds(self) -> i32 {
        self.0
    }

    /// Returns the canonical identifier: `Z`, `+HH:MM` or `+HH:MM:SS`.
    pub fn id(self) -> String {
        self.write_to_string().into_owned()
    }
}

impl Writeable for UtcOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.0 == 0 {
            return sink.write_char('Z');
        }
        let abs = self.0.unsigned_abs();
        sink.write_char(if self.0 < 0 { '-' } else { '+' })?;
        write_padded_u8((abs / 3600) as u8, sink)?;
        sink.write_char(':')?;
        write_padded_u8((abs / 60 % 60) as u8, sink)?;
        let seconds = (abs % 60) as u8;
        if seconds != 0 {
            sink.write_char(':')?;
            write_padded_u8(seconds, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.0 == 0 {
            LengthHint::exact(1)
        } else if self.0 % 60 == 0 {
            LengthHint::exact(6)
        } else {
            LengthHint::exact(9)
        }
    }
}

impl_display_with_writeable!(UtcOffset);

/// The identifier of a time zone, either a region or a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoneId {
    /// A region identifier such as `Europe/Paris`.
    Region(String),
    /// A fixed offset from UTC.
    Offset(UtcOffset),
}

impl ZoneId {
    /// Creates a region zone.
    pub fn region(id: impl Into<String>) -> Self {
        Self::Region(id.into())
    }

    /// Returns the zone offset if this zone is a fixed offset.
    pub const fn as_offset(&self) -> Option<UtcOffset> {
        match self {
            Self::Offset(offset) => Some(*offset),
            Self::Region(_) => None,
        }
    }

    /// Returns the identifier of this zone.
    pub fn id(&self) -> String {
        self.write_to_string().into_owned()
    }
}

impl From<UtcOffset> for ZoneId {
    fn from(value: UtcOffset) -> Self {
        Self::Offset(value)
    }
}

impl Writeable for ZoneId {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::Region(id) => sink.write_str(id),
            Self::Offset(offset) => offset.write_to(sink),
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::Region(id) => LengthHint::exact(id.len()),
            Self::Offset(offset) => offset.writeable_length_hint(),
        }
    }
}

impl_display_with_writeable!(ZoneId);

/// Which zone a zone printer-parser queries from the accessor being printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneQuery {
    /// Any zone, region or offset.
    Zone,
    /// Only region zones; a pure offset counts as unavailable.
    RegionOnly,
    /// The zone if present, else the `OffsetSeconds` field as an offset.
    ZoneOrOffset,
}

impl ZoneQuery {
    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Zone => "ZoneId()",
            Self::RegionOnly => "ZoneRegionId()",
            Self::ZoneOrOffset => "ZoneOrOffsetId()",
        }
    }
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}
