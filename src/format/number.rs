//! Numeric printer-parsers: plain values, reduced values and fractions.

use alloc::format;
use alloc::string::{String, ToString};

use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, Writeable};

use super::context::{advance_chars, ParseContext, PrintContext};
use super::printer_parser::ParseResult;
use crate::{fields::DateTimeField, options::SignStyle, FormatError, FormatResult};

/// The maximum number of digits in an `i64`.
pub(crate) const MAX_WIDTH: u8 = 19;

/// A two digit year window, such as 2000 to 2099.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reduction {
    base_value: i32,
    range: i64,
}

/// Prints and parses a field as a run of decimal digits.
///
/// `subsequent_width` is the total fixed width of the adjacent values that
/// follow this one, or `None` once this value has a fixed width of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberPrinterParser {
    field: DateTimeField,
    min_width: u8,
    max_width: u8,
    sign_style: SignStyle,
    subsequent_width: Option<u32>,
    reduction: Option<Reduction>,
}

impl NumberPrinterParser {
    /// Creates a number node; widths are validated by the builder.
    pub(crate) const fn new(
        field: DateTimeField,
        min_width: u8,
        max_width: u8,
        sign_style: SignStyle,
    ) -> Self {
        Self {
            field,
            min_width,
            max_width,
            sign_style,
            subsequent_width: Some(0),
            reduction: None,
        }
    }

    /// Creates a reduced value node printing `width` digits relative to `base_value`.
    pub(crate) fn reduced(field: DateTimeField, width: u8, base_value: i32) -> FormatResult<Self> {
        if !(1..=18).contains(&width) {
            return Err(FormatError::configuration().with_message(format!(
                "The width must be from 1 to 18 inclusive but was {width}"
            )));
        }
        if !field.range().is_valid_value(i64::from(base_value)) {
            return Err(FormatError::configuration()
                .with_message("The base value must be within the range of the field"));
        }
        let range = 10_i64.pow(u32::from(width));
        if i64::from(base_value) + range > i64::from(i32::MAX) {
            return Err(FormatError::configuration().with_message(
                "Unable to add printer-parser as the range exceeds the capacity of an int",
            ));
        }
        Ok(Self {
            reduction: Some(Reduction { base_value, range }),
            ..Self::new(field, width, width, SignStyle::NotNegative)
        })
    }

    pub(crate) fn with_fixed_width(&self) -> Self {
        if self.reduction.is_some() {
            return self.clone();
        }
        Self {
            subsequent_width: None,
            ..self.clone()
        }
    }

    pub(crate) fn with_subsequent_width(&self, width: u32) -> Self {
        Self {
            subsequent_width: self.subsequent_width.map(|w| w + width),
            ..self.clone()
        }
    }

    pub(crate) fn is_fixed_width(&self) -> bool {
        self.reduction.is_some() || self.subsequent_width.is_none()
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(value) = context.value(self.field) else {
            return Ok(false);
        };
        let value = match self.reduction {
            Some(reduction) => (value % reduction.range).abs(),
            None => value,
        };
        let symbols = context.symbols();
        let digits = value.unsigned_abs().to_string();
        if digits.len() > usize::from(self.max_width) {
            return Err(FormatError::print().with_message(format!(
                "Field {} cannot be printed as the value {value} exceeds the maximum print width of {}",
                self.field, self.max_width
            )));
        }
        let digits = symbols.convert_number_to_i18n(&digits);

        if value >= 0 {
            match self.sign_style {
                SignStyle::ExceedsPad
                    if self.min_width < MAX_WIDTH
                        && value >= 10_i64.pow(u32::from(self.min_width)) =>
                {
                    buf.push(symbols.positive_sign());
                }
                SignStyle::Always => buf.push(symbols.positive_sign()),
                _ => {}
            }
        } else {
            match self.sign_style {
                SignStyle::Normal | SignStyle::ExceedsPad | SignStyle::Always => {
                    buf.push(symbols.negative_sign());
                }
                SignStyle::NotNegative => {
                    return Err(FormatError::print().with_message(format!(
                        "Field {} cannot be printed as the value {value} cannot be negative according to the SignStyle",
                        self.field
                    )));
                }
                SignStyle::Never => {}
            }
        }
        let length = digits.chars().count();
        for _ in length..usize::from(self.min_width) {
            buf.push(symbols.zero_digit());
        }
        buf.push_str(&digits);
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let Some(sign) = text.get(position..).and_then(|rest| rest.chars().next()) else {
            return Err(position);
        };
        let strict = context.is_strict();
        let symbols = *context.symbols();
        let same_width = self.min_width == self.max_width;
        let sign_position = position;
        let mut position = position;
        let mut negative = false;
        let mut positive = false;
        if sign == symbols.positive_sign() {
            if !self.sign_style.parse(true, strict, same_width) {
                return Err(position);
            }
            positive = true;
            position += sign.len_utf8();
        } else if sign == symbols.negative_sign() {
            if !self.sign_style.parse(false, strict, same_width) {
                return Err(position);
            }
            negative = true;
            position += sign.len_utf8();
        } else if self.sign_style == SignStyle::Always && strict {
            return Err(position);
        }

        let effective_min = if strict || self.is_fixed_width() {
            usize::from(self.min_width)
        } else {
            1
        };
        if advance_chars(text, position, effective_min).is_none() {
            return Err(position);
        }
        let subsequent = self.subsequent_width.unwrap_or(0) as usize;
        let mut effective_max = usize::from(self.max_width) + subsequent;

        let mut total: i128 = 0;
        let mut digits = 0;
        let mut pos = position;
        let mut last_len = 0;
        for pass in 0..2 {
            total = 0;
            digits = 0;
            pos = position;
            for ch in text[position..].chars().take(effective_max) {
                let Some(digit) = symbols.convert_to_digit(ch) else {
                    break;
                };
                total = total.saturating_mul(10).saturating_add(i128::from(digit));
                digits += 1;
                last_len = ch.len_utf8();
                pos += last_len;
            }
            if digits < effective_min {
                return Err(position);
            }
            if subsequent > 0 && pass == 0 {
                // Re-parse now the width left for this value is known.
                effective_max = effective_min.max(digits.saturating_sub(subsequent));
            } else {
                break;
            }
        }

        if negative {
            if total == 0 && strict {
                // Minus zero is not allowed.
                return Err(sign_position);
            }
            total = -total;
        } else if self.sign_style == SignStyle::ExceedsPad && strict {
            if positive {
                if digits <= usize::from(self.min_width) {
                    return Err(sign_position);
                }
            } else if digits > usize::from(self.min_width) {
                return Err(position);
            }
        }
        if total > i128::from(i64::MAX) || total < i128::from(i64::MIN) {
            // Overflow, so parse one less digit.
            total /= 10;
            pos -= last_len;
        }
        let Some(value) = total.to_i64() else {
            return Err(position);
        };
        self.set_value(context, value, position, pos)
    }

    fn set_value(
        &self,
        context: &mut ParseContext<'_>,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> ParseResult {
        let value = match self.reduction {
            Some(Reduction { base_value, range }) => {
                let base = i64::from(base_value);
                let last_part = base % range;
                let value = if base > 0 {
                    base - last_part + value
                } else {
                    base - last_part - value
                };
                if value < base {
                    value + range
                } else {
                    value
                }
            }
            None => value,
        };
        context.set_parsed_field(self.field, value, error_pos, success_pos)
    }
}

impl Writeable for NumberPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if let Some(reduction) = self.reduction {
            return write!(
                sink,
                "ReducedValue({},{},{})",
                self.field, self.min_width, reduction.base_value
            );
        }
        if self.min_width == 1 && self.max_width == MAX_WIDTH && self.sign_style == SignStyle::Normal
        {
            return write!(sink, "Value({})", self.field);
        }
        if self.min_width == self.max_width && self.sign_style == SignStyle::NotNegative {
            return write!(sink, "Value({},{})", self.field, self.min_width);
        }
        write!(
            sink,
            "Value({},{},{},{})",
            self.field, self.min_width, self.max_width, self.sign_style
        )
    }
}

impl_display_with_writeable!(NumberPrinterParser);

// ==== Fraction ====

const NANOS_SCALE: i128 = 1_000_000_000;

/// Prints and parses a fixed range field as a decimal fraction of its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FractionPrinterParser {
    field: DateTimeField,
    min_width: u8,
    max_width: u8,
    decimal_point: bool,
}

impl FractionPrinterParser {
    pub(crate) fn new(
        field: DateTimeField,
        min_width: u8,
        max_width: u8,
        decimal_point: bool,
    ) -> FormatResult<Self> {
        if !field.range().is_fixed() {
            return Err(FormatError::configuration().with_message(format!(
                "Field must have a fixed set of values: {field}"
            )));
        }
        if min_width > 9 {
            return Err(FormatError::configuration().with_message(format!(
                "Minimum width must be from 0 to 9 inclusive but was {min_width}"
            )));
        }
        if !(1..=9).contains(&max_width) {
            return Err(FormatError::configuration().with_message(format!(
                "Maximum width must be from 1 to 9 inclusive but was {max_width}"
            )));
        }
        if max_width < min_width {
            return Err(FormatError::configuration().with_message(format!(
                "Maximum width must exceed or equal the minimum width but {max_width} < {min_width}"
            )));
        }
        Ok(Self {
            field,
            min_width,
            max_width,
            decimal_point,
        })
    }

    /// The ISO nano-of-second fraction: up to nine digits after a decimal point.
    pub(crate) const fn iso_nano_of_second() -> Self {
        Self {
            field: DateTimeField::NanoOfSecond,
            min_width: 0,
            max_width: 9,
            decimal_point: true,
        }
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(value) = context.value(self.field) else {
            return Ok(false);
        };
        let symbols = context.symbols();
        let range = self.field.range();
        range.check_valid_value(value, self.field)?;
        let span = i128::from(range.maximum()) - i128::from(range.minimum()) + 1;
        let nines = (i128::from(value) - i128::from(range.minimum())) * NANOS_SCALE / span;

        if nines == 0 {
            if self.min_width > 0 {
                if self.decimal_point {
                    buf.push(symbols.decimal_separator());
                }
                for _ in 0..self.min_width {
                    buf.push(symbols.zero_digit());
                }
            }
            return Ok(true);
        }
        let padded = format!("{nines:09}");
        format_assert!(padded.len() == 9, "Fraction of {value} exceeds nine digits");
        let significant = padded.trim_end_matches('0').len();
        let scale = significant
            .max(usize::from(self.min_width))
            .min(usize::from(self.max_width));
        if self.decimal_point {
            buf.push(symbols.decimal_separator());
        }
        buf.push_str(&symbols.convert_number_to_i18n(&padded[..scale]));
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let strict = context.is_strict();
        let (effective_min, effective_max) = if strict {
            (usize::from(self.min_width), usize::from(self.max_width))
        } else {
            (0, 9)
        };
        let symbols = *context.symbols();
        let Some(first) = text.get(position..).and_then(|rest| rest.chars().next()) else {
            return if effective_min > 0 {
                Err(position)
            } else {
                Ok(position)
            };
        };
        let mut position = position;
        if self.decimal_point {
            if first != symbols.decimal_separator() {
                return if effective_min > 0 {
                    Err(position)
                } else {
                    Ok(position)
                };
            }
            position += first.len_utf8();
        }
        if advance_chars(text, position, effective_min).is_none() {
            return Err(position);
        }
        let mut total: i128 = 0;
        let mut digits: u32 = 0;
        let mut pos = position;
        for ch in text[position..].chars().take(effective_max) {
            let Some(digit) = symbols.convert_to_digit(ch) else {
                break;
            };
            total = total * 10 + i128::from(digit);
            digits += 1;
            pos += ch.len_utf8();
        }
        if (digits as usize) < effective_min {
            return Err(position);
        }
        let range = self.field.range();
        let span = i128::from(range.maximum()) - i128::from(range.minimum()) + 1;
        let value = total * span / 10_i128.pow(digits) + i128::from(range.minimum());
        let Some(value) = value.to_i64() else {
            return Err(position);
        };
        context.set_parsed_field(self.field, value, position, pos)
    }
}

impl Writeable for FractionPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write!(
            sink,
            "Fraction({},{},{}",
            self.field, self.min_width, self.max_width
        )?;
        if self.decimal_point {
            sink.write_str(",DecimalPoint")?;
        }
        sink.write_char(')')
    }
}

impl_display_with_writeable!(FractionPrinterParser);

#[cfg(test)]
mod tests {
    use super::{FractionPrinterParser, NumberPrinterParser};
    use crate::fields::DateTimeField;
    use crate::format::context::{FormatSettings, ParseContext, PrintContext};
    use crate::options::SignStyle;
    use crate::parsed::Parsed;
    use alloc::string::String;
    use icu_locale::locale;
    use writeable::assert_writeable_eq;

    fn settings() -> FormatSettings {
        FormatSettings::new(locale!("en"))
    }

    fn print(node: &NumberPrinterParser, field: DateTimeField, value: i64) -> Option<String> {
        let settings = settings();
        let accessor = Parsed::new().with_field(field, value);
        let context = PrintContext::new(&accessor, &settings);
        let mut buf = String::new();
        node.print(&context, &mut buf).ok()?;
        Some(buf)
    }

    fn parse(node: &NumberPrinterParser, text: &str, strict: bool) -> (Result<usize, usize>, Option<i64>) {
        let settings = settings();
        let mut context = ParseContext::new(&settings);
        context.set_strict(strict);
        let result = node.parse(&mut context, text, 0);
        (result, context.into_parsed().get(node.field))
    }

    #[test]
    fn print_sign_styles() {
        let year = DateTimeField::Year;
        let normal = NumberPrinterParser::new(year, 2, 19, SignStyle::Normal);
        assert_eq!(print(&normal, year, 5).as_deref(), Some("05"));
        assert_eq!(print(&normal, year, -5).as_deref(), Some("-05"));

        let not_negative = NumberPrinterParser::new(year, 2, 19, SignStyle::NotNegative);
        assert_eq!(print(&not_negative, year, -5), None);

        let exceeds = NumberPrinterParser::new(year, 2, 19, SignStyle::ExceedsPad);
        assert_eq!(print(&exceeds, year, 99).as_deref(), Some("99"));
        assert_eq!(print(&exceeds, year, 100).as_deref(), Some("+100"));

        let never = NumberPrinterParser::new(year, 1, 19, SignStyle::Never);
        assert_eq!(print(&never, year, -12).as_deref(), Some("12"));

        let always = NumberPrinterParser::new(year, 1, 19, SignStyle::Always);
        assert_eq!(print(&always, year, 0).as_deref(), Some("+0"));

        let narrow = NumberPrinterParser::new(year, 1, 2, SignStyle::Normal);
        assert_eq!(print(&narrow, year, 123), None);

        let wide = NumberPrinterParser::new(DateTimeField::InstantSeconds, 1, 19, SignStyle::Normal);
        assert_eq!(
            print(&wide, DateTimeField::InstantSeconds, i64::MIN).as_deref(),
            Some("-9223372036854775808")
        );
    }

    #[test]
    fn parse_sign_styles() {
        let year = DateTimeField::Year;
        let exceeds = NumberPrinterParser::new(year, 2, 19, SignStyle::ExceedsPad);
        assert_eq!(parse(&exceeds, "+100", true), (Ok(4), Some(100)));
        assert_eq!(parse(&exceeds, "+99", true).0, Err(0));
        assert_eq!(parse(&exceeds, "100", true).0, Err(0));
        assert_eq!(parse(&exceeds, "+99", false), (Ok(3), Some(99)));

        let normal = NumberPrinterParser::new(year, 1, 19, SignStyle::Normal);
        assert_eq!(parse(&normal, "-0", true).0, Err(0));
        assert_eq!(parse(&normal, "-0", false), (Ok(2), Some(0)));
        assert_eq!(parse(&normal, "-12x", true), (Ok(3), Some(-12)));
        assert_eq!(parse(&normal, "x", true).0, Err(0));
        assert_eq!(parse(&normal, "", true).0, Err(0));

        let always = NumberPrinterParser::new(year, 1, 19, SignStyle::Always);
        assert_eq!(parse(&always, "12", true).0, Err(0));
        assert_eq!(parse(&always, "12", false), (Ok(2), Some(12)));
    }

    #[test]
    fn parse_min_width() {
        let hour = NumberPrinterParser::new(DateTimeField::HourOfDay, 2, 2, SignStyle::NotNegative);
        assert_eq!(parse(&hour, "9:", true).0, Err(0));
        assert_eq!(parse(&hour, "123", true), (Ok(2), Some(12)));

        let lenient = NumberPrinterParser::new(DateTimeField::HourOfDay, 2, 19, SignStyle::Normal);
        assert_eq!(parse(&lenient, "9:", false), (Ok(1), Some(9)));
    }

    #[test]
    fn parse_overflow_drops_a_digit() {
        let node = NumberPrinterParser::new(DateTimeField::InstantSeconds, 1, 19, SignStyle::Normal);
        assert_eq!(
            parse(&node, "9223372036854775807", true),
            (Ok(19), Some(i64::MAX))
        );
        let (result, value) = parse(&node, "9223372036854775808", true);
        assert_eq!(result, Ok(18));
        assert_eq!(value, Some(922_337_203_685_477_580));
    }

    #[test]
    fn adjacent_widths() {
        let year = NumberPrinterParser::new(DateTimeField::Year, 1, 19, SignStyle::Normal)
            .with_subsequent_width(2);
        assert!(!year.is_fixed_width());
        assert_eq!(parse(&year, "201106", true), (Ok(4), Some(2011)));
        assert!(year.with_fixed_width().is_fixed_width());
    }

    #[test]
    fn reduced_values() {
        let year = DateTimeField::Year;
        let node = NumberPrinterParser::reduced(year, 2, 1980).unwrap();
        assert_eq!(print(&node, year, 2012).as_deref(), Some("12"));
        assert_eq!(print(&node, year, 1905).as_deref(), Some("05"));
        assert_eq!(parse(&node, "12", true), (Ok(2), Some(2012)));
        assert_eq!(parse(&node, "79", true), (Ok(2), Some(2079)));
        assert_eq!(parse(&node, "80", true), (Ok(2), Some(1980)));
        assert!(node.is_fixed_width());
        assert_eq!(node.with_fixed_width(), node);

        assert!(NumberPrinterParser::reduced(year, 0, 2000).is_err());
        assert!(NumberPrinterParser::reduced(year, 19, 2000).is_err());
        assert!(NumberPrinterParser::reduced(DateTimeField::MonthOfYear, 2, 13).is_err());
        assert!(NumberPrinterParser::reduced(year, 10, 2000).is_err());
    }

    #[test]
    fn number_descriptions() {
        let year = DateTimeField::Year;
        assert_writeable_eq!(
            NumberPrinterParser::new(year, 1, 19, SignStyle::Normal),
            "Value(Year)"
        );
        assert_writeable_eq!(
            NumberPrinterParser::new(year, 4, 4, SignStyle::NotNegative),
            "Value(Year,4)"
        );
        assert_writeable_eq!(
            NumberPrinterParser::new(year, 4, 10, SignStyle::ExceedsPad),
            "Value(Year,4,10,EXCEEDS_PAD)"
        );
        assert_writeable_eq!(
            NumberPrinterParser::reduced(year, 2, 2000).unwrap(),
            "ReducedValue(Year,2,2000)"
        );
    }

    #[test]
    fn fraction_print() {
        let field = DateTimeField::SecondOfMinute;
        let settings = settings();
        let print = |node: &FractionPrinterParser, value: i64| {
            let accessor = Parsed::new().with_field(field, value);
            let context = PrintContext::new(&accessor, &settings);
            let mut buf = String::new();
            node.print(&context, &mut buf).map(|_| buf)
        };
        let node = FractionPrinterParser::new(field, 0, 9, true).unwrap();
        assert_eq!(print(&node, 15).unwrap(), ".25");
        assert_eq!(print(&node, 0).unwrap(), "");
        assert!(print(&node, 60).is_err());

        let fixed = FractionPrinterParser::new(field, 3, 3, false).unwrap();
        assert_eq!(print(&fixed, 0).unwrap(), "000");
        assert_eq!(print(&fixed, 1).unwrap(), "016");
    }

    #[test]
    fn fraction_parse() {
        let field = DateTimeField::SecondOfMinute;
        let settings = settings();
        let node = FractionPrinterParser::new(field, 0, 9, true).unwrap();

        let mut context = ParseContext::new(&settings);
        assert_eq!(node.parse(&mut context, ".25", 0), Ok(3));
        assert_eq!(context.into_parsed().get(field), Some(15));

        let mut context = ParseContext::new(&settings);
        assert_eq!(node.parse(&mut context, "x", 0), Ok(0));
        assert_eq!(node.parse(&mut context, "", 0), Ok(0));

        let fixed = FractionPrinterParser::new(DateTimeField::NanoOfSecond, 3, 3, true).unwrap();
        let mut context = ParseContext::new(&settings);
        assert_eq!(fixed.parse(&mut context, ".12", 0), Err(1));
        assert_eq!(fixed.parse(&mut context, "12", 0), Err(0));
        assert_eq!(fixed.parse(&mut context, ".1234", 0), Ok(4));
        assert_eq!(context.into_parsed().get(DateTimeField::NanoOfSecond), Some(123_000_000));
    }

    #[test]
    fn fraction_validation() {
        let nano = DateTimeField::NanoOfSecond;
        assert!(FractionPrinterParser::new(DateTimeField::DayOfMonth, 0, 9, true).is_err());
        assert!(FractionPrinterParser::new(nano, 10, 9, true).is_err());
        assert!(FractionPrinterParser::new(nano, 0, 0, true).is_err());
        assert!(FractionPrinterParser::new(nano, 5, 4, true).is_err());
        assert_writeable_eq!(
            FractionPrinterParser::new(nano, 0, 9, true).unwrap(),
            "Fraction(NanoOfSecond,0,9,DecimalPoint)"
        );
    }
}
