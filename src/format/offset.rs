use alloc::string::String;

use writeable::{impl_display_with_writeable, Writeable};

use super::{
    context::{ParseContext, PrintContext},
    printer_parser::ParseResult,
};
use crate::{fields::DateTimeField, options::OffsetPattern, FormatError, FormatResult};

/// Prints and parses an offset such as `+01:30`, with text for a zero offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OffsetIdPrinterParser {
    no_offset_text: String,
    pattern: OffsetPattern,
}

impl OffsetIdPrinterParser {
    pub(crate) fn new(no_offset_text: impl Into<String>, pattern: OffsetPattern) -> Self {
        Self {
            no_offset_text: no_offset_text.into(),
            pattern,
        }
    }

    /// The offset form used by instants and zone ids: `Z` or `+HH:MM:ss`.
    pub(crate) fn instance_id() -> Self {
        Self::new("Z", OffsetPattern::HoursColonMinutesOptionalSeconds)
    }

    fn kind(&self) -> usize {
        self.pattern.index()
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(offset) = context.value(DateTimeField::OffsetSeconds) else {
            return Ok(false);
        };
        let total = i32::try_from(offset).map_err(|_| {
            FormatError::print().with_message("Offset seconds exceed the capacity of an int")
        })?;
        if total == 0 {
            buf.push_str(&self.no_offset_text);
            return Ok(true);
        }
        // Hours beyond 99 are silently dropped.
        let hours = ((total / 3600) % 100).unsigned_abs();
        let minutes = ((total / 60) % 60).unsigned_abs();
        let seconds = (total % 60).unsigned_abs();
        let kind = self.kind();
        let separator = if self.pattern.uses_colon() { ":" } else { "" };

        let start = buf.len();
        let mut output = hours;
        buf.push(if total < 0 { '-' } else { '+' });
        push_two_digits(buf, hours);
        if kind >= 3 || (kind >= 1 && minutes > 0) {
            buf.push_str(separator);
            push_two_digits(buf, minutes);
            output += minutes;
            if kind >= 7 || (kind >= 5 && seconds > 0) {
                buf.push_str(separator);
                push_two_digits(buf, seconds);
                output += seconds;
            }
        }
        if output == 0 {
            buf.truncate(start);
            buf.push_str(&self.no_offset_text);
        }
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let rest = text.get(position..).unwrap_or_default();
        if self.no_offset_text.is_empty() {
            if rest.is_empty() {
                return context.set_parsed_field(DateTimeField::OffsetSeconds, 0, position, position);
            }
        } else {
            if rest.is_empty() {
                return Err(position);
            }
            if let Some(end) = context.match_text(text, position, &self.no_offset_text) {
                return context.set_parsed_field(DateTimeField::OffsetSeconds, 0, position, end);
            }
        }

        let sign = match rest.as_bytes().first() {
            Some(b'+') => Some(1),
            Some(b'-') => Some(-1),
            _ => None,
        };
        if let Some(sign) = sign {
            let mut parts = [0_i64; 3];
            let mut pos = position + 1;
            let failed = self.parse_part(text, &mut pos, &mut parts, 0, true)
                || self.parse_part(text, &mut pos, &mut parts, 1, self.kind() >= 3)
                || self.parse_part(text, &mut pos, &mut parts, 2, false);
            if !failed {
                let offset = sign * (parts[0] * 3600 + parts[1] * 60 + parts[2]);
                return context.set_parsed_field(DateTimeField::OffsetSeconds, offset, position, pos);
            }
        }
        if self.no_offset_text.is_empty() {
            return context.set_parsed_field(DateTimeField::OffsetSeconds, 0, position, position);
        }
        Err(position)
    }

    /// Parses the hours, minutes or seconds part, returning whether parsing failed.
    ///
    /// A part that is absent or malformed only fails the parse when `required`.
    fn parse_part(
        &self,
        text: &str,
        pos: &mut usize,
        parts: &mut [i64; 3],
        index: usize,
        required: bool,
    ) -> bool {
        if (self.kind() + 3) / 2 < index + 1 {
            return false;
        }
        let bytes = text.as_bytes();
        let mut cursor = *pos;
        if self.pattern.uses_colon() && index > 0 {
            if bytes.get(cursor) != Some(&b':') {
                return required;
            }
            cursor += 1;
        }
        let value = match (bytes.get(cursor), bytes.get(cursor + 1)) {
            (Some(tens @ b'0'..=b'9'), Some(ones @ b'0'..=b'9')) => {
                i64::from(tens - b'0') * 10 + i64::from(ones - b'0')
            }
            _ => return required,
        };
        if value > 59 {
            return required;
        }
        parts[index] = value;
        *pos = cursor + 2;
        false
    }
}

fn push_two_digits(buf: &mut String, value: u32) {
    buf.push(char::from(b'0' + (value / 10) as u8));
    buf.push(char::from(b'0' + (value % 10) as u8));
}

impl Writeable for OffsetIdPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write!(
            sink,
            "Offset('{}',{})",
            self.no_offset_text.replace('\'', "''"),
            self.pattern.as_str()
        )
    }
}

impl_display_with_writeable!(OffsetIdPrinterParser);
