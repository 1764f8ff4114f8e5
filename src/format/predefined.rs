//! The predefined ISO-8601 formatters.

use alloc::vec;
use alloc::vec::Vec;
use std::sync::LazyLock;

use icu_locale::locale;

use super::{
    formatter::DateTimeFormatter,
    instant::InstantPrinterParser,
    number::{FractionPrinterParser, NumberPrinterParser},
    offset::OffsetIdPrinterParser,
    printer_parser::{CompositePrinterParser, PrinterParser, SettingsParser},
};
use crate::{
    fields::DateTimeField,
    options::{OffsetPattern, SignStyle},
};

const fn two_digits(field: DateTimeField) -> PrinterParser {
    PrinterParser::Number(NumberPrinterParser::new(field, 2, 2, SignStyle::NotNegative))
}

/// `yyyy-MM-dd`, with years outside 0000 to 9999 signed.
pub(crate) fn local_date_nodes() -> Vec<PrinterParser> {
    vec![
        PrinterParser::Number(NumberPrinterParser::new(
            DateTimeField::Year,
            4,
            10,
            SignStyle::ExceedsPad,
        )),
        PrinterParser::CharLiteral('-'),
        two_digits(DateTimeField::MonthOfYear),
        PrinterParser::CharLiteral('-'),
        two_digits(DateTimeField::DayOfMonth),
    ]
}

/// `HH:mm[:ss[.SSSSSSSSS]]`
pub(crate) fn local_time_nodes() -> Vec<PrinterParser> {
    let fraction = CompositePrinterParser::new(
        vec![PrinterParser::Fraction(FractionPrinterParser::iso_nano_of_second())],
        true,
    );
    let seconds = CompositePrinterParser::new(
        vec![
            PrinterParser::CharLiteral(':'),
            two_digits(DateTimeField::SecondOfMinute),
            PrinterParser::Composite(fraction),
        ],
        true,
    );
    vec![
        two_digits(DateTimeField::HourOfDay),
        PrinterParser::CharLiteral(':'),
        two_digits(DateTimeField::MinuteOfHour),
        PrinterParser::Composite(seconds),
    ]
}

fn local_date_time_nodes() -> Vec<PrinterParser> {
    vec![
        PrinterParser::Settings(SettingsParser::CaseInsensitive),
        PrinterParser::Composite(CompositePrinterParser::new(local_date_nodes(), false)),
        PrinterParser::CharLiteral('T'),
        PrinterParser::Composite(CompositePrinterParser::new(local_time_nodes(), false)),
    ]
}

fn iso_formatter(nodes: Vec<PrinterParser>) -> DateTimeFormatter {
    DateTimeFormatter::new(CompositePrinterParser::new(nodes, false), locale!("und"))
}

static ISO_LOCAL_DATE: LazyLock<DateTimeFormatter> =
    LazyLock::new(|| iso_formatter(local_date_nodes()));

static ISO_LOCAL_TIME: LazyLock<DateTimeFormatter> =
    LazyLock::new(|| iso_formatter(local_time_nodes()));

static ISO_LOCAL_DATE_TIME: LazyLock<DateTimeFormatter> =
    LazyLock::new(|| iso_formatter(local_date_time_nodes()));

static ISO_OFFSET_DATE_TIME: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    iso_formatter(vec![
        PrinterParser::Settings(SettingsParser::CaseInsensitive),
        PrinterParser::Composite(CompositePrinterParser::new(local_date_time_nodes(), false)),
        PrinterParser::Offset(OffsetIdPrinterParser::instance_id()),
    ])
});

static ISO_INSTANT: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    iso_formatter(vec![
        PrinterParser::Settings(SettingsParser::CaseInsensitive),
        PrinterParser::Instant(InstantPrinterParser),
    ])
});

static BASIC_ISO_DATE: LazyLock<DateTimeFormatter> = LazyLock::new(|| {
    let offset = CompositePrinterParser::new(
        vec![
            PrinterParser::Settings(SettingsParser::Lenient),
            PrinterParser::Offset(OffsetIdPrinterParser::new(
                "Z",
                OffsetPattern::HoursMinutesOptionalSeconds,
            )),
            PrinterParser::Settings(SettingsParser::Strict),
        ],
        true,
    );
    iso_formatter(vec![
        PrinterParser::Settings(SettingsParser::CaseInsensitive),
        PrinterParser::Number(NumberPrinterParser::new(
            DateTimeField::Year,
            4,
            4,
            SignStyle::NotNegative,
        )),
        two_digits(DateTimeField::MonthOfYear),
        two_digits(DateTimeField::DayOfMonth),
        PrinterParser::Composite(offset),
    ])
});

impl DateTimeFormatter {
    /// The ISO local date format, such as `2011-12-03`.
    pub fn iso_local_date() -> Self {
        ISO_LOCAL_DATE.clone()
    }

    /// The ISO local time format, such as `10:15` or `10:15:30.5`.
    pub fn iso_local_time() -> Self {
        ISO_LOCAL_TIME.clone()
    }

    /// The ISO local date-time format, such as `2011-12-03T10:15:30`.
    pub fn iso_local_date_time() -> Self {
        ISO_LOCAL_DATE_TIME.clone()
    }

    /// The ISO date-time format with an offset, such as `2011-12-03T10:15:30+01:00`.
    pub fn iso_offset_date_time() -> Self {
        ISO_OFFSET_DATE_TIME.clone()
    }

    /// The ISO instant format in UTC, such as `2011-12-03T10:15:30Z`.
    pub fn iso_instant() -> Self {
        ISO_INSTANT.clone()
    }

    /// The basic ISO date format, such as `20111203` or `20111203+0100`.
    pub fn basic_iso_date() -> Self {
        BASIC_ISO_DATE.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::fields::DateTimeField;
    use crate::format::DateTimeFormatter;
    use crate::iso::{Instant, IsoDate, IsoDateTime, IsoTime};
    use crate::parsed::Parsed;
    use writeable::assert_writeable_eq;

    fn date_time(nanos: u32) -> IsoDateTime {
        IsoDateTime::new(
            IsoDate::new(2011, 12, 3).unwrap(),
            IsoTime::new(10, 15, 30, nanos).unwrap(),
        )
    }

    #[test]
    fn local_date() {
        let formatter = DateTimeFormatter::iso_local_date();
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "2011-12-03");
        assert_eq!(
            formatter.format(&IsoDate::new(12345, 1, 1).unwrap()).unwrap(),
            "+12345-01-01"
        );

        let parsed = formatter.parse("2011-12-03").unwrap();
        assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
        assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(3));
        assert_writeable_eq!(
            formatter,
            "Value(Year,4,10,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)"
        );
    }

    #[test]
    fn local_date_time() {
        let formatter = DateTimeFormatter::iso_local_date_time();
        assert_eq!(formatter.format(&date_time(0)).unwrap(), "2011-12-03T10:15:30");
        assert_eq!(
            formatter.format(&date_time(500_000_000)).unwrap(),
            "2011-12-03T10:15:30.5"
        );

        let parsed = formatter.parse("2011-12-03t10:15").unwrap();
        assert_eq!(parsed.get(DateTimeField::MinuteOfHour), Some(15));
        assert_eq!(parsed.get(DateTimeField::SecondOfMinute), None);

        let parsed = formatter.parse("2011-12-03T10:15:30.123").unwrap();
        assert_eq!(parsed.get(DateTimeField::NanoOfSecond), Some(123_000_000));
    }

    #[test]
    fn offset_date_time() {
        let formatter = DateTimeFormatter::iso_offset_date_time();
        let value = Parsed::new()
            .with_field(DateTimeField::Year, 2011)
            .with_field(DateTimeField::MonthOfYear, 12)
            .with_field(DateTimeField::DayOfMonth, 3)
            .with_field(DateTimeField::HourOfDay, 10)
            .with_field(DateTimeField::MinuteOfHour, 15)
            .with_field(DateTimeField::OffsetSeconds, 3600);
        assert_eq!(formatter.format(&value).unwrap(), "2011-12-03T10:15+01:00");

        let parsed = formatter.parse("2011-12-03T10:15:30Z").unwrap();
        assert_eq!(parsed.get(DateTimeField::OffsetSeconds), Some(0));
        assert!(formatter.parse("2011-12-03T10:15:30").is_err());
    }

    #[test]
    fn instant() {
        let formatter = DateTimeFormatter::iso_instant();
        let instant = Instant::new(1_322_907_330, 0).unwrap();
        assert_eq!(formatter.format(&instant).unwrap(), "2011-12-03T10:15:30Z");
        let parsed = formatter.parse("2011-12-03T10:15:30Z").unwrap();
        assert_eq!(parsed.get(DateTimeField::InstantSeconds), Some(1_322_907_330));
        assert_writeable_eq!(formatter, "ParseCaseSensitive(false)Instant()");
    }

    #[test]
    fn basic_date() {
        let formatter = DateTimeFormatter::basic_iso_date();
        let date = IsoDate::new(2011, 12, 3).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "20111203");

        let parsed = formatter.parse("20111203+0100").unwrap();
        assert_eq!(parsed.get(DateTimeField::OffsetSeconds), Some(3600));
        let parsed = formatter.parse("20111203").unwrap();
        assert_eq!(parsed.get(DateTimeField::OffsetSeconds), None);
        assert!(formatter.parse("2011123").is_err());
    }
}
