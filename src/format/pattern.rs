//! Compiles pattern letters such as `yyyy-MM-dd HH:mm` into builder calls.
//!
//! | Letter | Meaning           | Letter | Meaning              |
//! |--------|-------------------|--------|----------------------|
//! | `G`    | era               | `H`    | hour of day          |
//! | `y`    | year              | `k`    | clock hour of day    |
//! | `Q`    | quarter of year   | `K`    | hour of am-pm        |
//! | `M`    | month of year     | `h`    | clock hour of am-pm  |
//! | `D`    | day of year       | `m`    | minute of hour       |
//! | `d`    | day of month      | `s`    | second of minute     |
//! | `F`    | week of month     | `S`    | fraction of second   |
//! | `E`    | day of week       | `n`    | nano of second       |
//! | `a`    | am-pm of day      | `A`    | milli of day         |
//! | `N`    | nano of day       | `V`    | zone id              |
//! | `z`    | zone name         | `Z`    | offset `+HHMM`       |
//! | `X`    | offset, `Z` zero  | `x`    | offset, digits zero  |
//! | `p`    | pad next          | `'`    | literal text         |
//! | `[`    | optional start    | `]`    | optional end         |

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::builder::DateTimeFormatterBuilder;
use crate::{
    fields::DateTimeField,
    options::{OffsetPattern, SignStyle, TextStyle},
    FormatError, FormatResult,
};

/// A single instruction compiled from a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternItem {
    /// A run of `count` identical letters.
    Letters { letter: char, count: usize },
    /// `p` letters padding the item that follows to `width`.
    Pad { width: usize },
    Literal(String),
    OptionalStart,
    OptionalEnd,
}

impl PatternItem {
    /// Splits `pattern` into items, rejecting malformed literals and reserved characters.
    ///
    /// Letters are validated when applied.
    pub(crate) fn parse_all(pattern: &str) -> FormatResult<Vec<Self>> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut items = Vec::new();
        let mut pos = 0;
        while let Some(&cur) = chars.get(pos) {
            if cur.is_ascii_alphabetic() {
                let mut letter = cur;
                let mut count = run_length(&chars, pos);
                pos += count;
                if letter == 'p' {
                    let next = chars.get(pos).copied().filter(char::is_ascii_alphabetic);
                    let Some(next) = next else {
                        return Err(FormatError::configuration().with_message(format!(
                            "Pad letter 'p' must be followed by valid pad pattern: {pattern}"
                        )));
                    };
                    items.push(Self::Pad { width: count });
                    letter = next;
                    count = run_length(&chars, pos);
                    pos += count;
                }
                items.push(Self::Letters { letter, count });
            } else if cur == '\'' {
                let start = pos + 1;
                pos = start;
                let mut literal = String::new();
                loop {
                    match (chars.get(pos), chars.get(pos + 1)) {
                        (None, _) => {
                            return Err(FormatError::configuration().with_message(format!(
                                "Pattern ends with an incomplete string literal: {pattern}"
                            )));
                        }
                        (Some('\''), Some('\'')) => {
                            literal.push('\'');
                            pos += 2;
                        }
                        (Some('\''), _) => break,
                        (Some(&ch), _) => {
                            literal.push(ch);
                            pos += 1;
                        }
                    }
                }
                pos += 1;
                if literal.is_empty() {
                    literal.push('\'');
                }
                items.push(Self::Literal(literal));
            } else {
                pos += 1;
                let item = match cur {
                    '[' => Self::OptionalStart,
                    ']' => Self::OptionalEnd,
                    '{' | '}' => {
                        return Err(FormatError::configuration().with_message(format!(
                            "Pattern includes reserved character: '{cur}'"
                        )));
                    }
                    _ => Self::Literal(cur.into()),
                };
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Applies this item to `builder`.
    pub(crate) fn apply(self, builder: &mut DateTimeFormatterBuilder) -> FormatResult<()> {
        match self {
            Self::Letters { letter, count } => apply_letters(builder, letter, count)?,
            Self::Pad { width } => {
                builder.pad_next(width)?;
            }
            Self::Literal(literal) => {
                builder.append_literal_str(&literal);
            }
            Self::OptionalStart => {
                builder.optional_start();
            }
            Self::OptionalEnd => {
                builder.optional_end().map_err(|_| {
                    FormatError::configuration()
                        .with_message("Pattern invalid as it contains ] without previous [")
                })?;
            }
        }
        Ok(())
    }
}

fn run_length(chars: &[char], start: usize) -> usize {
    let Some(&first) = chars.get(start) else {
        return 0;
    };
    chars[start..].iter().take_while(|&&ch| ch == first).count()
}

fn too_many(letter: char) -> FormatError {
    FormatError::configuration().with_message(format!("Too many pattern letters: {letter}"))
}

fn width(count: usize) -> FormatResult<u8> {
    u8::try_from(count).map_err(|_| {
        FormatError::configuration().with_message(format!(
            "The width must be from 1 to 19 inclusive but was {count}"
        ))
    })
}

fn apply_letters(
    builder: &mut DateTimeFormatterBuilder,
    letter: char,
    count: usize,
) -> FormatResult<()> {
    if let Some(field) = DateTimeField::from_pattern_letter(letter) {
        return apply_field(builder, letter, count, field);
    }
    match letter {
        'z' => {
            if count > 4 {
                return Err(too_many(letter));
            }
            let style = if count == 4 { TextStyle::Full } else { TextStyle::Short };
            builder.append_zone_text(style);
        }
        'V' => {
            if count != 2 {
                return Err(FormatError::configuration()
                    .with_message(format!("Pattern letter count must be 2: {letter}")));
            }
            builder.append_zone_id();
        }
        'Z' => {
            if count > 3 {
                return Err(too_many(letter));
            }
            builder.append_offset(OffsetPattern::HoursMinutes, "+0000");
        }
        'X' | 'x' => {
            if count > 5 {
                return Err(too_many(letter));
            }
            let index = count + usize::from(count != 1);
            let pattern = OffsetPattern::from_index(index).ok_or_else(|| too_many(letter))?;
            let no_offset_text = match (letter, count) {
                ('X', _) => "Z",
                (_, 1) => "+00",
                (_, count) if count % 2 == 0 => "+0000",
                _ => "+00:00",
            };
            builder.append_offset(pattern, no_offset_text);
        }
        _ => {
            return Err(FormatError::configuration()
                .with_message(format!("Unknown pattern letter: {letter}")));
        }
    }
    Ok(())
}

fn apply_field(
    builder: &mut DateTimeFormatterBuilder,
    letter: char,
    count: usize,
    field: DateTimeField,
) -> FormatResult<()> {
    match letter {
        'y' => match count {
            2 => {
                builder.append_value_reduced(field, 2, 2000)?;
            }
            1..=3 => {
                builder.append_value_with(field, width(count)?, 19, SignStyle::Normal)?;
            }
            _ => {
                builder.append_value_with(field, width(count)?, 19, SignStyle::ExceedsPad)?;
            }
        },
        'G' | 'M' | 'Q' | 'E' => match count {
            1 => {
                builder.append_value(field);
            }
            2 => {
                builder.append_value_fixed(field, 2)?;
            }
            3 => {
                builder.append_text_with(field, TextStyle::Short);
            }
            4 => {
                builder.append_text_with(field, TextStyle::Full);
            }
            5 => {
                builder.append_text_with(field, TextStyle::Narrow);
            }
            _ => return Err(too_many(letter)),
        },
        'a' => match count {
            1..=3 => {
                builder.append_text_with(field, TextStyle::Short);
            }
            4 => {
                builder.append_text_with(field, TextStyle::Full);
            }
            5 => {
                builder.append_text_with(field, TextStyle::Narrow);
            }
            _ => return Err(too_many(letter)),
        },
        'S' => {
            builder.append_fraction(field, width(count)?, width(count)?, false)?;
        }
        _ => {
            if count == 1 {
                builder.append_value(field);
            } else {
                builder.append_value_fixed(field, width(count)?)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::PatternItem;
    use crate::format::builder::DateTimeFormatterBuilder;
    use crate::ErrorKind;
    use alloc::string::String;
    use writeable::assert_writeable_eq;

    fn compile(pattern: &str) -> String {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_pattern(pattern).unwrap();
        builder.to_formatter().to_string()
    }

    fn error(pattern: &str) -> String {
        let mut builder = DateTimeFormatterBuilder::new();
        let err = builder.append_pattern(pattern).map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_writeable_eq!(builder.to_formatter(), "");
        err.message().into()
    }

    #[test]
    fn literals() {
        assert_eq!(
            PatternItem::parse_all("'o''clock'''").unwrap(),
            [PatternItem::Literal("o'clock'".into())]
        );
        assert_eq!(compile("''"), "''");
        assert_eq!(compile("'hello'-"), "'hello''-'");
        assert_eq!(compile("'it''s'"), "'it''s'");
    }

    #[test]
    fn field_letters() {
        assert_eq!(
            compile("yyyy-MM-dd"),
            "Value(Year,4,19,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)"
        );
        assert_eq!(compile("yy"), "ReducedValue(Year,2,2000)");
        assert_eq!(compile("y"), "Value(Year)");
        assert_eq!(compile("yyy"), "Value(Year,3,19,NORMAL)");
        assert_eq!(compile("MMM EEEE"), "Text(MonthOfYear,SHORT)' 'Text(DayOfWeek)");
        assert_eq!(compile("a"), "Text(AmPmOfDay,SHORT)");
        assert_eq!(compile("H:mm"), "Value(HourOfDay)':'Value(MinuteOfHour,2)");
        assert_eq!(compile("SSS"), "Fraction(NanoOfSecond,3,3)");
    }

    #[test]
    fn zone_and_offset_letters() {
        assert_eq!(compile("VV"), "ZoneId()");
        assert_eq!(compile("zzzz"), "ZoneText(FULL)");
        assert_eq!(compile("z"), "ZoneText(SHORT)");
        assert_eq!(compile("Z"), "Offset('+0000',+HHMM)");
        assert_eq!(compile("X"), "Offset('Z',+HHmm)");
        assert_eq!(compile("XX"), "Offset('Z',+HHMM)");
        assert_eq!(compile("XXX"), "Offset('Z',+HH:MM)");
        assert_eq!(compile("x"), "Offset('+00',+HHmm)");
        assert_eq!(compile("xxxx"), "Offset('+0000',+HHMMss)");
        assert_eq!(compile("xxxxx"), "Offset('+00:00',+HH:MM:ss)");
    }

    #[test]
    fn optional_and_pad() {
        assert_eq!(
            compile("HH[:mm]"),
            "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]"
        );
        assert_eq!(compile("ppH"), "Pad(Value(HourOfDay),2)");
        assert_eq!(compile("HH[:mm"), "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]");
        assert_eq!(compile("HH#mm"), "Value(HourOfDay,2)'#'Value(MinuteOfHour,2)");
    }

    #[test]
    fn invalid_patterns() {
        assert_eq!(error("yyyy]"), "Pattern invalid as it contains ] without previous [");
        assert_eq!(error("'abc"), "Pattern ends with an incomplete string literal: 'abc");
        assert_eq!(error("{"), "Pattern includes reserved character: '{'");
        assert_eq!(error("}"), "Pattern includes reserved character: '}'");
        assert_eq!(error("MMMMMM"), "Too many pattern letters: M");
        assert_eq!(error("aaaaaa"), "Too many pattern letters: a");
        assert_eq!(error("zzzzz"), "Too many pattern letters: z");
        assert_eq!(error("V"), "Pattern letter count must be 2: V");
        assert_eq!(error("ZZZZ"), "Too many pattern letters: Z");
        assert_eq!(error("XXXXXX"), "Too many pattern letters: X");
        assert_eq!(error("B"), "Unknown pattern letter: B");
        assert_eq!(error("p"), "Pad letter 'p' must be followed by valid pad pattern: p");
        assert_eq!(error("p-"), "Pad letter 'p' must be followed by valid pad pattern: p-");
        assert_eq!(error("yyyy-MM-dd HHHHHHHHHHHHHHHHHHHH"), "The width must be from 1 to 19 inclusive but was 20");
        assert_eq!(
            error("SSSSSSSSSS"),
            "Minimum width must be from 0 to 9 inclusive but was 10"
        );
    }
}
