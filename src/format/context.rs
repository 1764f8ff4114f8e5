//! The per-call state threaded through printer-parsers.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use icu_locale::Locale;

use crate::{
    chronology::Chronology,
    fields::{DateTimeField, TemporalAccessor},
    parsed::Parsed,
    provider::{ChronologyProvider, FormatStyleProvider, ZoneIdProvider},
    timezone::ZoneId,
};

/// The localized symbols used when printing and parsing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatSymbols {
    zero_digit: char,
    positive_sign: char,
    negative_sign: char,
    decimal_separator: char,
}

impl Default for FormatSymbols {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl FormatSymbols {
    /// ASCII digits, `+`, `-` and `.`.
    pub const STANDARD: Self = Self::new('0', '+', '-', '.');

    /// Creates a new set of symbols.
    pub const fn new(
        zero_digit: char,
        positive_sign: char,
        negative_sign: char,
        decimal_separator: char,
    ) -> Self {
        Self {
            zero_digit,
            positive_sign,
            negative_sign,
            decimal_separator,
        }
    }

    /// Returns these symbols with a different zero digit.
    #[must_use]
    pub const fn with_zero_digit(mut self, zero_digit: char) -> Self {
        self.zero_digit = zero_digit;
        self
    }

    /// Returns these symbols with a different positive sign.
    #[must_use]
    pub const fn with_positive_sign(mut self, positive_sign: char) -> Self {
        self.positive_sign = positive_sign;
        self
    }

    /// Returns these symbols with a different negative sign.
    #[must_use]
    pub const fn with_negative_sign(mut self, negative_sign: char) -> Self {
        self.negative_sign = negative_sign;
        self
    }

    /// Returns these symbols with a different decimal separator.
    #[must_use]
    pub const fn with_decimal_separator(mut self, decimal_separator: char) -> Self {
        self.decimal_separator = decimal_separator;
        self
    }

    pub const fn zero_digit(&self) -> char {
        self.zero_digit
    }

    pub const fn positive_sign(&self) -> char {
        self.positive_sign
    }

    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Returns the digit value of `ch`, or `None` if it is not a digit in these symbols.
    pub fn convert_to_digit(&self, ch: char) -> Option<u32> {
        (ch as u32)
            .checked_sub(self.zero_digit as u32)
            .filter(|digit| *digit <= 9)
    }

    /// Converts ASCII digits in `text` to the digits of these symbols.
    pub fn convert_number_to_i18n<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.zero_digit == '0' {
            return Cow::Borrowed(text);
        }
        let offset = self.zero_digit as u32 - '0' as u32;
        Cow::Owned(
            text.chars()
                .map(|ch| match ch {
                    '0'..='9' => char::from_u32(ch as u32 + offset).unwrap_or(ch),
                    _ => ch,
                })
                .collect(),
        )
    }
}

/// Formatter-wide settings shared by print and parse calls.
#[derive(Debug, Clone)]
pub(crate) struct FormatSettings {
    pub(crate) locale: Locale,
    pub(crate) symbols: FormatSymbols,
    pub(crate) chronology: Option<Chronology>,
    pub(crate) zone_provider: Arc<dyn ZoneIdProvider>,
    pub(crate) chronology_provider: Arc<dyn ChronologyProvider>,
    pub(crate) format_styles: Arc<dyn FormatStyleProvider>,
}

impl FormatSettings {
    pub(crate) fn new(locale: Locale) -> Self {
        Self {
            locale,
            symbols: FormatSymbols::STANDARD,
            chronology: None,
            zone_provider: crate::provider::default_zone_provider(),
            chronology_provider: crate::provider::default_chronology_provider(),
            format_styles: crate::provider::default_format_style_provider(),
        }
    }
}

// ==== Printing ====

/// The state of a single print call.
pub(crate) struct PrintContext<'a> {
    accessor: &'a dyn TemporalAccessor,
    settings: &'a FormatSettings,
}

impl<'a> PrintContext<'a> {
    pub(crate) fn new(accessor: &'a dyn TemporalAccessor, settings: &'a FormatSettings) -> Self {
        Self { accessor, settings }
    }

    pub(crate) fn value(&self, field: DateTimeField) -> Option<i64> {
        self.accessor.field(field)
    }

    pub(crate) fn zone(&self) -> Option<ZoneId> {
        self.accessor.zone()
    }

    /// The formatter's override chronology, else the accessor's own.
    pub(crate) fn chronology(&self) -> Option<Chronology> {
        self.settings.chronology.or_else(|| self.accessor.chronology())
    }

    pub(crate) fn settings(&self) -> &'a FormatSettings {
        self.settings
    }

    pub(crate) fn locale(&self) -> &'a Locale {
        &self.settings.locale
    }

    pub(crate) fn symbols(&self) -> &'a FormatSymbols {
        &self.settings.symbols
    }
}

// ==== Parsing ====

/// The state of a single parse call.
///
/// Parsed values are held in a stack of snapshots, one per open optional
/// section plus the base entry.
#[derive(Debug)]
pub(crate) struct ParseContext<'a> {
    settings: &'a FormatSettings,
    case_sensitive: bool,
    strict: bool,
    parsed: Vec<Parsed>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(settings: &'a FormatSettings) -> Self {
        Self {
            settings,
            case_sensitive: true,
            strict: true,
            parsed: vec![Parsed::new()],
        }
    }

    /// Creates an independent context with default flags and no parsed values.
    pub(crate) fn copy(&self) -> Self {
        Self::new(self.settings)
    }

    pub(crate) fn settings(&self) -> &'a FormatSettings {
        self.settings
    }

    pub(crate) fn locale(&self) -> &'a Locale {
        &self.settings.locale
    }

    pub(crate) fn symbols(&self) -> &'a FormatSymbols {
        &self.settings.symbols
    }

    /// Returns the parsed chronology, else the formatter's, else ISO.
    pub(crate) fn effective_chronology(&self) -> Chronology {
        self.current()
            .parsed_chronology()
            .or(self.settings.chronology)
            .unwrap_or_default()
    }

    pub(crate) fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub(crate) fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Compares two characters, honouring case sensitivity.
    pub(crate) fn char_equals(&self, a: char, b: char) -> bool {
        if self.case_sensitive {
            return a == b;
        }
        char_equals_ignore_case(a, b)
    }

    /// Matches `expected` against `text` at `position`, returning the end position.
    pub(crate) fn match_text(&self, text: &str, position: usize, expected: &str) -> Option<usize> {
        let rest = text.get(position..)?;
        let mut chars = rest.char_indices();
        for want in expected.chars() {
            let (_, got) = chars.next()?;
            if !self.char_equals(want, got) {
                return None;
            }
        }
        Some(position + chars.next().map_or(rest.len(), |(i, _)| i))
    }

    pub(crate) fn start_optional(&mut self) {
        let snapshot = self.current().clone();
        self.parsed.push(snapshot);
    }

    /// Closes an optional section, keeping its values only if it was successful.
    pub(crate) fn end_optional(&mut self, successful: bool) {
        if successful {
            let index = self.parsed.len() - 2;
            self.parsed.remove(index);
        } else {
            self.parsed.pop();
        }
    }

    fn current(&self) -> &Parsed {
        // The stack always keeps its base entry.
        &self.parsed[self.parsed.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Parsed {
        let index = self.parsed.len() - 1;
        &mut self.parsed[index]
    }

    pub(crate) fn parsed_field(&self, field: DateTimeField) -> Option<i64> {
        self.current().get(field)
    }

    /// Stores a parsed value, failing at `error_pos` if it conflicts with an earlier one.
    pub(crate) fn set_parsed_field(
        &mut self,
        field: DateTimeField,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        match self.current_mut().insert_field(field, value) {
            Some(_) => Err(error_pos),
            None => Ok(success_pos),
        }
    }

    pub(crate) fn set_parsed_zone(&mut self, zone: ZoneId) {
        self.current_mut().set_zone(zone);
    }

    pub(crate) fn set_parsed_chronology(&mut self, chronology: Chronology) {
        self.current_mut().set_chronology(chronology);
    }

    pub(crate) fn into_parsed(mut self) -> Parsed {
        self.parsed.pop().unwrap_or_default()
    }
}

pub(crate) fn char_equals_ignore_case(a: char, b: char) -> bool {
    a == b
        || a.to_uppercase().eq(b.to_uppercase())
        || a.to_lowercase().eq(b.to_lowercase())
}

/// Returns the byte position `count` characters after `position`, if the text is long enough.
pub(crate) fn advance_chars(text: &str, position: usize, count: usize) -> Option<usize> {
    let rest = text.get(position..)?;
    if count == 0 {
        return Some(position);
    }
    let mut indices = rest.char_indices().skip(count);
    match indices.next() {
        Some((i, _)) => Some(position + i),
        None if rest.chars().count() == count => Some(text.len()),
        None => None,
    }
}

/// Converts a byte position to a character index, for error reporting.
pub(crate) fn char_index(text: &str, position: usize) -> usize {
    text.get(..position)
        .map_or(position, |prefix| prefix.chars().count())
}

pub(crate) fn abbreviate(text: &str) -> String {
    if text.chars().count() > 64 {
        let mut abbr: String = text.chars().take(64).collect();
        abbr.push_str("...");
        abbr
    } else {
        text.into()
    }
}
