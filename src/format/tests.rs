use alloc::string::{String, ToString};
use alloc::sync::Arc;

use writeable::assert_writeable_eq;

use super::{DateTimeFormatter, DateTimeFormatterBuilder, FormatSymbols, ParsePosition};
use crate::{
    fields::DateTimeField,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{FormatStyle, TextStyle},
    provider::FixedZoneIds,
    timezone::ZoneId,
    ErrorKind,
};

fn date() -> IsoDate {
    IsoDate::new(2011, 6, 30).unwrap()
}

fn date_time(nanos: u32) -> IsoDateTime {
    IsoDateTime::new(date(), IsoTime::new(13, 5, 0, nanos).unwrap())
}

fn parse_error(formatter: &DateTimeFormatter, text: &str) -> (String, Option<usize>) {
    let err = formatter.parse(text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    (err.message().into(), err.error_index())
}

#[test]
fn adjacent_value_parsing() {
    let formatter = DateTimeFormatter::of_pattern("yyyyMMddHH").unwrap();
    let parsed = formatter.parse("2011063013").unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
    assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(6));
    assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(30));
    assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(13));

    let parsed = formatter.parse("+12011063013").unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(12011));
    assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(30));

    // Wide years must carry a sign when parsing strictly.
    assert!(formatter.parse("12011063013").is_err());

    assert_eq!(formatter.format(&date_time(0)).unwrap(), "2011063013");
}

#[test]
fn optional_sections() {
    let formatter = DateTimeFormatter::of_pattern("HH:mm[:ss]").unwrap();
    assert_eq!(formatter.format(&date_time(0)).unwrap(), "13:05:00");

    let parsed = formatter.parse("13:05").unwrap();
    assert_eq!(parsed.get(DateTimeField::MinuteOfHour), Some(5));
    assert_eq!(parsed.get(DateTimeField::SecondOfMinute), None);

    let parsed = formatter.parse("13:05:30").unwrap();
    assert_eq!(parsed.get(DateTimeField::SecondOfMinute), Some(30));

    // A partially matching section is rolled back, leaving the rest unparsed.
    let (message, index) = parse_error(&formatter, "13:05:3");
    assert_eq!(
        message,
        "Text '13:05:3' could not be parsed, unparsed text found at index 5"
    );
    assert_eq!(index, Some(5));
}

#[test]
fn missing_values_fail_to_print() {
    let formatter = DateTimeFormatter::iso_local_date();
    let time = IsoTime::new(13, 5, 0, 0).unwrap();
    let mut buf = String::from("prefix:");
    let err = formatter.format_to(&time, &mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Print);
    assert_eq!(err.message(), "Unable to extract value");
    assert_eq!(buf, "prefix:");

    let optional = DateTimeFormatter::of_pattern("yyyy[ HH:mm]").unwrap();
    assert_eq!(optional.format(&date()).unwrap(), "2011");
}

#[test]
fn case_and_strictness_settings() {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_text(DateTimeField::MonthOfYear)
        .append_literal(' ')
        .parse_case_insensitive()
        .append_text(DateTimeField::MonthOfYear);
    let formatter = builder.to_formatter();
    assert!(formatter.parse("June JUNE").is_ok());
    assert!(formatter.parse("JUNE June").is_err());

    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .parse_lenient()
        .append_value_fixed(DateTimeField::HourOfDay, 2)
        .unwrap();
    let parsed = builder.to_formatter().parse("7").unwrap();
    assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(7));

    let strict = DateTimeFormatter::of_pattern("HH").unwrap();
    let (message, _) = parse_error(&strict, "7");
    assert_eq!(message, "Text '7' could not be parsed at index 0");
}

#[test]
fn conflicting_values() {
    let formatter = DateTimeFormatter::of_pattern("HH 'at' H").unwrap();
    let parsed = formatter.parse("10 at 10").unwrap();
    assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(10));

    let (message, index) = parse_error(&formatter, "10 at 11");
    assert_eq!(message, "Text '10 at 11' could not be parsed at index 6");
    assert_eq!(index, Some(6));
}

#[test]
fn parse_error_indices() {
    let formatter = DateTimeFormatter::iso_local_date();
    let (message, index) = parse_error(&formatter, "2011-06-3x");
    assert_eq!(message, "Text '2011-06-3x' could not be parsed at index 8");
    assert_eq!(index, Some(8));

    let (message, index) = parse_error(&formatter, "2011-06-30X");
    assert_eq!(
        message,
        "Text '2011-06-30X' could not be parsed, unparsed text found at index 10"
    );
    assert_eq!(index, Some(10));

    let long = "2011-06-30".to_string() + &"x".repeat(70);
    let (message, _) = parse_error(&formatter, &long);
    let abbreviated = long[..64].to_string() + "...";
    assert_eq!(
        message,
        alloc::format!("Text '{abbreviated}' could not be parsed, unparsed text found at index 10")
    );

    // Indices count characters rather than bytes.
    let formatter = DateTimeFormatter::of_pattern("'é'HH").unwrap();
    let (message, index) = parse_error(&formatter, "éxx");
    assert_eq!(message, "Text 'éxx' could not be parsed at index 1");
    assert_eq!(index, Some(1));
}

#[test]
fn parse_unresolved_positions() {
    let formatter = DateTimeFormatter::iso_local_date();
    let mut position = ParsePosition::new(2);
    let parsed = formatter
        .parse_unresolved("xx2011-06-30yy", &mut position)
        .unwrap();
    assert_eq!(position.index, 12);
    assert_eq!(position.error_index, None);
    assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(30));

    let mut position = ParsePosition::new(0);
    assert!(formatter.parse_unresolved("2011-0x", &mut position).is_none());
    assert_eq!(position.index, 0);
    assert_eq!(position.error_index, Some(5));
}

#[test]
fn padding() {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .pad_next(4)
        .unwrap()
        .append_value(DateTimeField::DayOfMonth)
        .append_literal('|');
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&IsoDate::new(2011, 6, 3).unwrap()).unwrap(), "   3|");
    let parsed = formatter.parse("  30|").unwrap();
    assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(30));

    let mut builder = DateTimeFormatterBuilder::new();
    builder.pad_next(2).unwrap().append_value(DateTimeField::Year);
    let err = builder.to_formatter().format(&date()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Print);
    assert_eq!(
        err.message(),
        "Cannot print as output of 4 characters exceeds pad width of 2"
    );
}

#[test]
fn reduced_years_and_fractions() {
    let formatter = DateTimeFormatter::of_pattern("yy HH:mm:ss.SSS").unwrap();
    assert_eq!(
        formatter.format(&date_time(123_456_789)).unwrap(),
        "11 13:05:00.123"
    );
    let parsed = formatter.parse("99 13:05:00.120").unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(2099));
    assert_eq!(parsed.get(DateTimeField::NanoOfSecond), Some(120_000_000));
}

#[test]
fn text_fields() {
    let formatter = DateTimeFormatter::of_pattern("EEEE, d MMMM yyyy").unwrap();
    assert_eq!(
        formatter.format(&date()).unwrap(),
        "Thursday, 30 June 2011"
    );
    let parsed = formatter.parse("Thursday, 30 June 2011").unwrap();
    assert_eq!(parsed.get(DateTimeField::DayOfWeek), Some(4));
    assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(6));

    let mut table = alloc::collections::BTreeMap::new();
    table.insert(1, "first".to_string());
    table.insert(2, "second".to_string());
    let mut builder = DateTimeFormatterBuilder::new();
    builder.append_text_lookup(DateTimeField::AlignedWeekOfMonth, table);
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&IsoDate::new(2011, 6, 9).unwrap()).unwrap(), "second");
    assert_eq!(formatter.format(&date()).unwrap(), "5");
    let parsed = formatter.parse("first").unwrap();
    assert_eq!(parsed.get(DateTimeField::AlignedWeekOfMonth), Some(1));
}

#[test]
fn composed_formatters() {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append(&DateTimeFormatter::iso_local_date())
        .append_optional(&DateTimeFormatter::of_pattern("'T'HH:mm").unwrap());
    let formatter = builder.to_formatter();
    assert_writeable_eq!(
        formatter,
        "(Value(Year,4,10,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2))['T'Value(HourOfDay,2)':'Value(MinuteOfHour,2)]"
    );
    assert_eq!(formatter.format(&date_time(0)).unwrap(), "2011-06-30T13:05");
    assert_eq!(formatter.format(&date()).unwrap(), "2011-06-30");

    let parsed = formatter.parse("2011-06-30").unwrap();
    assert_eq!(parsed.get(DateTimeField::HourOfDay), None);
    let parsed = formatter.parse("2011-06-30T10:15").unwrap();
    assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(10));
}

#[test]
fn pattern_descriptions() {
    let formatter = DateTimeFormatter::of_pattern("yyyy-MM-dd'T'HH[:mm]VV").unwrap();
    assert_eq!(
        formatter.to_string(),
        "Value(Year,4,19,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)'T'Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]ZoneId()"
    );
}

#[test]
fn hash_is_a_literal() {
    let formatter = DateTimeFormatter::of_pattern("HH#mm").unwrap();
    let time = IsoTime::new(10, 15, 0, 0).unwrap();
    assert_eq!(formatter.format(&time).unwrap(), "10#15");
    let parsed = formatter.parse("10#15").unwrap();
    assert_eq!(parsed.get(DateTimeField::HourOfDay), Some(10));
    assert_eq!(parsed.get(DateTimeField::MinuteOfHour), Some(15));
}

#[test]
fn zone_ids() {
    let formatter = DateTimeFormatter::of_pattern("HH:mm VV")
        .unwrap()
        .with_zone_provider(Arc::new(FixedZoneIds::new(["Europe/London", "Europe/Paris"])));
    let parsed = formatter.parse("13:05 Europe/Paris").unwrap();
    assert_eq!(parsed.zone_id(), Some(&ZoneId::region("Europe/Paris")));

    let parsed = formatter.parse("13:05 +01:00").unwrap();
    assert!(parsed.zone_id().is_some());

    assert!(formatter.parse("13:05 Europe/Berlin").is_err());
}

#[test]
fn localized_styles() {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_localized(Some(FormatStyle::Medium), None)
        .unwrap();
    let formatter = builder.to_formatter();
    assert_writeable_eq!(formatter, "Localized(MEDIUM,)");
    assert_eq!(formatter.format(&date()).unwrap(), "Jun 30, 2011");
    let parsed = formatter.parse("Jun 30, 2011").unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
}

#[test]
fn localized_symbols() {
    let symbols = FormatSymbols::STANDARD.with_zero_digit('\u{660}');
    let formatter = DateTimeFormatter::iso_local_date().with_symbols(symbols);
    let text = formatter.format(&date()).unwrap();
    assert_eq!(text, "\u{662}\u{660}\u{661}\u{661}-\u{660}\u{666}-\u{663}\u{660}");
    let parsed = formatter.parse(&text).unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
    assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(6));
}

#[test]
fn chronology_text() {
    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_chronology_text(TextStyle::Short)
        .append_literal(' ')
        .append_chronology_id();
    let formatter = builder.to_formatter();
    assert_eq!(formatter.format(&date()).unwrap(), "ISO ISO");
    let parsed = formatter.parse("Japanese Japanese").unwrap();
    assert_eq!(
        parsed.parsed_chronology(),
        Some(crate::chronology::Chronology::JAPANESE)
    );
}

#[test]
fn chronology_year_ranges() {
    use crate::{chronology::Chronology, options::SignStyle};

    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_value_with(DateTimeField::Year, 1, 10, SignStyle::Normal)
        .unwrap();
    let formatter = builder.to_formatter();
    let parsed = formatter.parse("999999000").unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(999_999_000));

    let minguo = formatter.with_chronology(Some(Chronology::MINGUO));
    let (message, index) = parse_error(&minguo, "999999000");
    assert_eq!(
        message,
        "Text '999999000' could not be parsed: Invalid value for Year (valid values -1000001910 - 999998088): 999999000"
    );
    assert_eq!(index, Some(0));
    assert!(minguo.parse("999998000").is_ok());

    // Raw values are still available without the range check.
    let mut position = ParsePosition::new(0);
    let parsed = minguo.parse_unresolved("999999000", &mut position).unwrap();
    assert_eq!(parsed.get(DateTimeField::Year), Some(999_999_000));

    let mut builder = DateTimeFormatterBuilder::new();
    builder
        .append_chronology_id()
        .append_literal(' ')
        .append_value_with(DateTimeField::Year, 1, 10, SignStyle::Normal)
        .unwrap();
    let formatter = builder.to_formatter();
    assert!(formatter.parse("ISO 999999000").is_ok());
    assert!(formatter.parse("ThaiBuddhist 1000000500").is_ok());
    let (_, index) = parse_error(&formatter, "Minguo 999999000");
    assert_eq!(index, Some(0));

    let (message, _) = parse_error(&DateTimeFormatter::of_pattern("MM").unwrap(), "13");
    assert_eq!(
        message,
        "Text '13' could not be parsed: Invalid value for MonthOfYear (valid values 1 - 12): 13"
    );
}
