//! Prints and parses an instant in the ISO-8601 `Z` form.
//!
//! Years beyond 9999 are printed with a `+` sign, which allows every
//! `InstantSeconds` value to be printed rather than only those within the
//! range of an ISO date.

use alloc::format;
use alloc::string::{String, ToString};
use std::sync::LazyLock;

use writeable::{impl_display_with_writeable, Writeable};

use super::{
    context::{ParseContext, PrintContext},
    predefined,
    printer_parser::{CompositePrinterParser, ParseResult, PrinterParser, SettingsParser},
};
use crate::{
    fields::DateTimeField,
    iso::{IsoDate, IsoDateTime, IsoTime, DAYS_0000_TO_1970, SECONDS_PER_DAY},
    FormatResult,
};

const SECONDS_PER_10000_YEARS: i64 = 146_097 * 25 * SECONDS_PER_DAY;
const SECONDS_0000_TO_1970: i64 = DAYS_0000_TO_1970 * SECONDS_PER_DAY;

static PARSER: LazyLock<CompositePrinterParser> = LazyLock::new(|| {
    let mut nodes = alloc::vec![PrinterParser::Settings(SettingsParser::CaseInsensitive)];
    nodes.extend(predefined::local_date_nodes());
    nodes.push(PrinterParser::CharLiteral('T'));
    nodes.extend(predefined::local_time_nodes());
    nodes.push(PrinterParser::CharLiteral('Z'));
    CompositePrinterParser::new(nodes, false)
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InstantPrinterParser;

impl InstantPrinterParser {
    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let (Some(seconds), Some(nanos)) = (
            context.value(DateTimeField::InstantSeconds),
            context.value(DateTimeField::NanoOfSecond),
        ) else {
            return Ok(false);
        };
        let nano = DateTimeField::NanoOfSecond
            .range()
            .check_valid_value(nanos, DateTimeField::NanoOfSecond)? as u32;
        if seconds >= -SECONDS_0000_TO_1970 {
            // Current era
            let zero_secs = seconds - SECONDS_PER_10000_YEARS + SECONDS_0000_TO_1970;
            let hi = zero_secs.div_euclid(SECONDS_PER_10000_YEARS) + 1;
            let lo = zero_secs.rem_euclid(SECONDS_PER_10000_YEARS);
            let ldt = IsoDateTime::from_epoch_seconds(lo - SECONDS_0000_TO_1970, nano, 0)?;
            if hi > 0 {
                buf.push('+');
                buf.push_str(&hi.to_string());
            }
            write_local_date_time(&ldt, buf);
            buf.push('Z');
        } else {
            // Before the current era
            let zero_secs = seconds + SECONDS_0000_TO_1970;
            let hi = zero_secs / SECONDS_PER_10000_YEARS;
            let lo = zero_secs % SECONDS_PER_10000_YEARS;
            let ldt = IsoDateTime::from_epoch_seconds(lo - SECONDS_0000_TO_1970, nano, 0)?;
            let pos = buf.len();
            write_local_date_time(&ldt, buf);
            buf.push('Z');
            if hi < 0 {
                if ldt.date.year == -10_000 {
                    buf.replace_range(pos..pos + 2, &(hi - 1).to_string());
                } else if lo == 0 {
                    buf.insert_str(pos, &hi.to_string());
                } else {
                    buf.insert_str(pos + 1, &hi.unsigned_abs().to_string());
                }
            }
        }
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        // A separate context keeps the date and time fields out of the result.
        let mut sub_context = context.copy();
        let end = PARSER.parse(&mut sub_context, text, position)?;
        let parsed = sub_context.into_parsed();
        let (Some(year_parsed), Some(month), Some(day), Some(hour), Some(minute)) = (
            parsed.get(DateTimeField::Year),
            parsed.get(DateTimeField::MonthOfYear),
            parsed.get(DateTimeField::DayOfMonth),
            parsed.get(DateTimeField::HourOfDay),
            parsed.get(DateTimeField::MinuteOfHour),
        ) else {
            return Err(position);
        };
        let second = parsed.get(DateTimeField::SecondOfMinute).unwrap_or(0);
        let nano = parsed.get(DateTimeField::NanoOfSecond).unwrap_or(0);

        // The sub-parser limits every field but the year to two digits.
        let year = (year_parsed % 10_000) as i32;
        let date = IsoDate::new(year, month as u8, day as u8).map_err(|_| position)?;
        let time = IsoTime::new(hour as u8, minute as u8, second as u8, 0).map_err(|_| position)?;
        let instant_secs = (year_parsed / 10_000)
            .checked_mul(SECONDS_PER_10000_YEARS)
            .and_then(|era| era.checked_add(IsoDateTime::new(date, time).to_epoch_seconds(0)))
            .ok_or(position)?;
        let end = context.set_parsed_field(DateTimeField::InstantSeconds, instant_secs, position, end)?;
        context.set_parsed_field(DateTimeField::NanoOfSecond, nano, position, end)
    }
}

impl Writeable for InstantPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_str("Instant()")
    }
}

impl_display_with_writeable!(InstantPrinterParser);

/// Writes `ldt` as `yyyy-MM-ddTHH:mm:ss` with a fraction in groups of three digits.
fn write_local_date_time(ldt: &IsoDateTime, buf: &mut String) {
    let year = ldt.date.year;
    if year.unsigned_abs() < 1000 {
        if year < 0 {
            buf.push('-');
        }
        buf.push_str(&format!("{:04}", year.unsigned_abs()));
    } else {
        if year > 9999 {
            buf.push('+');
        }
        buf.push_str(&year.to_string());
    }
    let time = ldt.time;
    buf.push_str(&format!(
        "-{:02}-{:02}T{:02}:{:02}:{:02}",
        ldt.date.month, ldt.date.day, time.hour, time.minute, time.second
    ));
    let nano = time.nanosecond;
    if nano == 0 {
        return;
    }
    let fraction = if nano % 1_000_000 == 0 {
        format!(".{:03}", nano / 1_000_000)
    } else if nano % 1000 == 0 {
        format!(".{:06}", nano / 1000)
    } else {
        format!(".{nano:09}")
    };
    buf.push_str(&fraction);
}
