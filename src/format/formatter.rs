use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

use icu_locale::Locale;
use writeable::{impl_display_with_writeable, Writeable};

use super::{
    context::{abbreviate, char_index, FormatSettings, FormatSymbols, ParseContext, PrintContext},
    printer_parser::CompositePrinterParser,
};
use crate::{
    chronology::Chronology,
    fields::TemporalAccessor,
    parsed::Parsed,
    provider::{ChronologyProvider, FormatStyleProvider, ZoneIdProvider},
    FormatError, FormatResult,
};

/// The position of a parse within its input text.
///
/// Both indices are byte offsets into the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsePosition {
    /// The index to start parsing at, updated to the end of the parsed text on success.
    pub index: usize,
    /// The index at which parsing failed, if it failed.
    pub error_index: Option<usize>,
}

impl ParsePosition {
    /// Creates a position starting at `index`.
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            error_index: None,
        }
    }
}

/// An immutable formatter for printing and parsing date-time values.
///
/// Formatters are created with a [`DateTimeFormatterBuilder`][super::DateTimeFormatterBuilder]
/// or one of the predefined ISO-8601 constructors, and are cheap to clone.
///
/// ```rust
/// use temporal_format::{DateTimeField, DateTimeFormatter};
/// use temporal_format::iso::IsoDate;
///
/// let formatter = DateTimeFormatter::of_pattern("d MMM yyyy").unwrap();
/// let date = IsoDate::new(2011, 6, 30).unwrap();
/// assert_eq!(formatter.format(&date).unwrap(), "30 Jun 2011");
///
/// let parsed = formatter.parse("3 Dec 2011").unwrap();
/// assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(12));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    printer_parser: CompositePrinterParser,
    settings: FormatSettings,
}

impl DateTimeFormatter {
    pub(crate) fn new(printer_parser: CompositePrinterParser, locale: Locale) -> Self {
        Self {
            printer_parser,
            settings: FormatSettings::new(locale),
        }
    }

    /// Creates a formatter from a pattern such as `yyyy-MM-dd`.
    pub fn of_pattern(pattern: &str) -> FormatResult<Self> {
        let mut builder = super::DateTimeFormatterBuilder::new();
        builder.append_pattern(pattern)?;
        Ok(builder.to_formatter())
    }

    /// Creates a formatter from a pattern for `locale`.
    pub fn of_pattern_with_locale(pattern: &str, locale: Locale) -> FormatResult<Self> {
        let mut builder = super::DateTimeFormatterBuilder::new();
        builder.append_pattern(pattern)?;
        Ok(builder.to_formatter_with_locale(locale))
    }

    pub(crate) fn printer_parser(&self) -> &CompositePrinterParser {
        &self.printer_parser
    }

    // ==== Settings ====

    /// Returns the locale used for text and localized patterns.
    pub fn locale(&self) -> &Locale {
        &self.settings.locale
    }

    /// Returns the symbols used for numbers.
    pub fn symbols(&self) -> FormatSymbols {
        self.settings.symbols
    }

    /// Returns the chronology override, if any.
    pub fn chronology(&self) -> Option<Chronology> {
        self.settings.chronology
    }

    /// Returns a copy of this formatter with a different locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.settings.locale = locale;
        self
    }

    /// Returns a copy of this formatter with different number symbols.
    #[must_use]
    pub fn with_symbols(mut self, symbols: FormatSymbols) -> Self {
        self.settings.symbols = symbols;
        self
    }

    /// Returns a copy of this formatter with a chronology override.
    ///
    /// The override is the chronology assumed by localized patterns when parsing.
    #[must_use]
    pub fn with_chronology(mut self, chronology: Option<Chronology>) -> Self {
        self.settings.chronology = chronology;
        self
    }

    /// Returns a copy of this formatter with a different set of parseable zone ids.
    #[must_use]
    pub fn with_zone_provider(mut self, provider: Arc<dyn ZoneIdProvider>) -> Self {
        self.settings.zone_provider = provider;
        self
    }

    /// Returns a copy of this formatter with a different set of parseable chronologies.
    #[must_use]
    pub fn with_chronology_provider(mut self, provider: Arc<dyn ChronologyProvider>) -> Self {
        self.settings.chronology_provider = provider;
        self
    }

    /// Returns a copy of this formatter with different localized patterns.
    #[must_use]
    pub fn with_format_style_provider(mut self, provider: Arc<dyn FormatStyleProvider>) -> Self {
        self.settings.format_styles = provider;
        self
    }

    // ==== Printing ====

    /// Prints `value` to a new string.
    pub fn format(&self, value: &dyn TemporalAccessor) -> FormatResult<String> {
        let mut buf = String::new();
        self.format_to(value, &mut buf)?;
        Ok(buf)
    }

    /// Appends `value` to `buf`.
    ///
    /// On error `buf` is left as it was.
    pub fn format_to(&self, value: &dyn TemporalAccessor, buf: &mut String) -> FormatResult<()> {
        let context = PrintContext::new(value, &self.settings);
        let length = buf.len();
        match self.printer_parser.print(&context, buf) {
            Ok(true) => Ok(()),
            Ok(false) => {
                buf.truncate(length);
                Err(FormatError::print().with_message("Unable to extract value"))
            }
            Err(e) => {
                buf.truncate(length);
                Err(e)
            }
        }
    }

    // ==== Parsing ====

    /// Parses the whole of `text` into its field values.
    ///
    /// The values are not resolved or cross-checked, but each must lie in its
    /// range for the parsed chronology, else the formatter's. The error index
    /// is the character index where parsing stopped, or zero for a value out
    /// of range.
    pub fn parse(&self, text: &str) -> FormatResult<Parsed> {
        let mut position = ParsePosition::new(0);
        let parsed = self.parse_unresolved(text, &mut position);
        let abbr = abbreviate(text);
        match (parsed, position.error_index) {
            (Some(parsed), None) if position.index >= text.len() => {
                let chronology = parsed
                    .parsed_chronology()
                    .or(self.settings.chronology)
                    .unwrap_or_default();
                match parsed.check_ranges(chronology) {
                    Ok(()) => Ok(parsed),
                    Err(e) => Err(FormatError::parse()
                        .with_message(format!(
                            "Text '{abbr}' could not be parsed: {}",
                            e.message()
                        ))
                        .with_index(0)),
                }
            }
            (Some(_), None) => {
                let index = char_index(text, position.index);
                Err(FormatError::parse()
                    .with_message(format!(
                        "Text '{abbr}' could not be parsed, unparsed text found at index {index}"
                    ))
                    .with_index(index))
            }
            (_, error) => {
                let index = char_index(text, error.unwrap_or(position.index));
                Err(FormatError::parse()
                    .with_message(format!("Text '{abbr}' could not be parsed at index {index}"))
                    .with_index(index))
            }
        }
    }

    /// Parses `text` from `position` without requiring the whole text to be consumed.
    ///
    /// On success the position index is moved past the parsed text. On failure
    /// `None` is returned and the error index is set.
    pub fn parse_unresolved(&self, text: &str, position: &mut ParsePosition) -> Option<Parsed> {
        if !text.is_char_boundary(position.index) {
            position.error_index = Some(position.index);
            return None;
        }
        let mut context = ParseContext::new(&self.settings);
        match self.printer_parser.parse(&mut context, text, position.index) {
            Ok(end) => {
                position.index = end;
                Some(context.into_parsed())
            }
            Err(error) => {
                #[cfg(feature = "log")]
                log::trace!("Parse of {text:?} failed at byte {error}");
                position.error_index = Some(error);
                None
            }
        }
    }
}

impl Writeable for DateTimeFormatter {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        for node in self.printer_parser.nodes() {
            node.write_to(sink)?;
        }
        Ok(())
    }
}

impl_display_with_writeable!(DateTimeFormatter);
