//! Options that configure how individual printer-parsers render and read text.

use core::{fmt, str::FromStr};

/// Controls when a sign is printed and accepted for a numeric field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// Print a sign only for negative values.
    #[default]
    Normal,
    /// Always print a sign.
    Always,
    /// Never print a sign, printing the absolute value.
    Never,
    /// Reject negative values when printing.
    NotNegative,
    /// Print a sign only when the value exceeds the pad width.
    ExceedsPad,
}

impl SignStyle {
    /// Returns whether a sign may be parsed under this style.
    pub(crate) const fn parse(self, positive: bool, strict: bool, fixed_width: bool) -> bool {
        match self {
            Self::Normal => !positive || !strict,
            Self::Always | Self::ExceedsPad => true,
            Self::Never | Self::NotNegative => !strict && !fixed_width,
        }
    }
}

/// A parsing error for `SignStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseSignStyleError;

impl fmt::Display for ParseSignStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid SignStyle")
    }
}

impl FromStr for SignStyle {
    type Err = ParseSignStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(Self::Normal),
            "ALWAYS" => Ok(Self::Always),
            "NEVER" => Ok(Self::Never),
            "NOT_NEGATIVE" => Ok(Self::NotNegative),
            "EXCEEDS_PAD" => Ok(Self::ExceedsPad),
            _ => Err(ParseSignStyleError),
        }
    }
}

impl fmt::Display for SignStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => "NORMAL",
            Self::Always => "ALWAYS",
            Self::Never => "NEVER",
            Self::NotNegative => "NOT_NEGATIVE",
            Self::ExceedsPad => "EXCEEDS_PAD",
        }
        .fmt(f)
    }
}

/// The size of text used when printing or parsing a field, zone or chronology.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextStyle {
    /// Full text, typically the full description, e.g. "Monday".
    #[default]
    Full,
    /// Short text, typically an abbreviation, e.g. "Mon".
    Short,
    /// Narrow text, typically a single letter, e.g. "M".
    Narrow,
}

impl TextStyle {
    /// All text styles, in the order they are searched when parsing leniently.
    pub const ALL: [Self; 3] = [Self::Full, Self::Short, Self::Narrow];
}

/// A parsing error for `TextStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseTextStyleError;

impl fmt::Display for ParseTextStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid TextStyle")
    }
}

impl FromStr for TextStyle {
    type Err = ParseTextStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL" => Ok(Self::Full),
            "SHORT" => Ok(Self::Short),
            "NARROW" => Ok(Self::Narrow),
            _ => Err(ParseTextStyleError),
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => "FULL",
            Self::Short => "SHORT",
            Self::Narrow => "NARROW",
        }
        .fmt(f)
    }
}

/// The style of a localized date or time format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatStyle {
    /// Full text style, with the most detail.
    Full,
    /// Long text style, with lots of detail.
    Long,
    /// Medium text style, with some detail.
    Medium,
    /// Short text style, typically numeric.
    Short,
}

/// A parsing error for `FormatStyle`.
#[derive(Debug, Clone, Copy)]
pub struct ParseFormatStyleError;

impl fmt::Display for ParseFormatStyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid FormatStyle")
    }
}

impl FromStr for FormatStyle {
    type Err = ParseFormatStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL" => Ok(Self::Full),
            "LONG" => Ok(Self::Long),
            "MEDIUM" => Ok(Self::Medium),
            "SHORT" => Ok(Self::Short),
            _ => Err(ParseFormatStyleError),
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => "FULL",
            Self::Long => "LONG",
            Self::Medium => "MEDIUM",
            Self::Short => "SHORT",
        }
        .fmt(f)
    }
}

/// One of the canonical forms of a zone offset.
///
/// Upper case letters are mandatory components, lower case letters are
/// printed only when non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OffsetPattern {
    /// `+HH`, hour only, ignoring minutes and seconds.
    Hours,
    /// `+HHmm`, hour with minute if non-zero.
    HoursOptionalMinutes,
    /// `+HH:mm`, hour with colon and minute if non-zero.
    HoursColonOptionalMinutes,
    /// `+HHMM`, hour and minute.
    HoursMinutes,
    /// `+HH:MM`, hour and minute with colon.
    HoursColonMinutes,
    /// `+HHMMss`, hour and minute, with second if non-zero.
    HoursMinutesOptionalSeconds,
    /// `+HH:MM:ss`, hour and minute with colon, with second if non-zero.
    HoursColonMinutesOptionalSeconds,
    /// `+HHMMSS`, hour, minute and second.
    HoursMinutesSeconds,
    /// `+HH:MM:SS`, hour, minute and second with colons.
    HoursColonMinutesSeconds,
}

impl OffsetPattern {
    const ALL: [Self; 9] = [
        Self::Hours,
        Self::HoursOptionalMinutes,
        Self::HoursColonOptionalMinutes,
        Self::HoursMinutes,
        Self::HoursColonMinutes,
        Self::HoursMinutesOptionalSeconds,
        Self::HoursColonMinutesOptionalSeconds,
        Self::HoursMinutesSeconds,
        Self::HoursColonMinutesSeconds,
    ];

    /// Returns the pattern at `index` in canonical order.
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the position of this pattern in canonical order.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Returns whether the components of this pattern are colon separated.
    pub(crate) const fn uses_colon(self) -> bool {
        self.index() % 2 == 0
    }

    /// Returns the pattern text, e.g. `+HH:MM:ss`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "+HH",
            Self::HoursOptionalMinutes => "+HHmm",
            Self::HoursColonOptionalMinutes => "+HH:mm",
            Self::HoursMinutes => "+HHMM",
            Self::HoursColonMinutes => "+HH:MM",
            Self::HoursMinutesOptionalSeconds => "+HHMMss",
            Self::HoursColonMinutesOptionalSeconds => "+HH:MM:ss",
            Self::HoursMinutesSeconds => "+HHMMSS",
            Self::HoursColonMinutesSeconds => "+HH:MM:SS",
        }
    }
}

/// A parsing error for `OffsetPattern`.
#[derive(Debug, Clone, Copy)]
pub struct ParseOffsetPatternError;

impl fmt::Display for ParseOffsetPatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid offset pattern")
    }
}

impl FromStr for OffsetPattern {
    type Err = ParseOffsetPatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|pattern| pattern.as_str() == s)
            .ok_or(ParseOffsetPatternError)
    }
}

impl fmt::Display for OffsetPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.as_str().fmt(f)
    }
}
