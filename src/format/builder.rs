//! The builder that assembles printer-parsers into a `DateTimeFormatter`.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use icu_locale::{locale, Locale};

use super::{
    chrono::{ChronologyPrinterParser, LocalizedPrinterParser},
    formatter::DateTimeFormatter,
    instant::InstantPrinterParser,
    number::{FractionPrinterParser, NumberPrinterParser, MAX_WIDTH},
    offset::OffsetIdPrinterParser,
    pattern::PatternItem,
    printer_parser::{CompositePrinterParser, PadPrinterParser, PrinterParser, SettingsParser},
    text::TextPrinterParser,
    zone::{ZoneIdPrinterParser, ZoneTextPrinterParser},
};
use crate::{
    fields::DateTimeField,
    options::{FormatStyle, OffsetPattern, SignStyle, TextStyle},
    provider::{default_text_provider, TextProvider, TextStore},
    timezone::ZoneQuery,
    FormatError, FormatResult, FormatUnwrap,
};

/// The nodes of one scope: the root, or an open optional section.
#[derive(Debug, Clone, Default)]
struct Scope {
    nodes: Vec<PrinterParser>,
    /// The index of the variable width value that adjacent fixed width values reserve digits from.
    anchor: Option<usize>,
    pad_next: Option<(usize, char)>,
}

/// Builds a `DateTimeFormatter` from a sequence of printer-parsers.
///
/// Values appended directly after a variable width value, without any
/// other node between them, are parsed in adjacent value mode: the variable
/// width value leaves enough digits for the fixed width values after it.
/// This allows `yyyyMMdd` style text to be parsed.
///
/// ```rust
/// use temporal_format::{DateTimeField, DateTimeFormatterBuilder};
///
/// let mut builder = DateTimeFormatterBuilder::new();
/// builder
///     .append_value(DateTimeField::Year)
///     .append_value_fixed(DateTimeField::MonthOfYear, 2)
///     .unwrap();
/// let formatter = builder.to_formatter();
///
/// let parsed = formatter.parse("201106").unwrap();
/// assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
/// assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatterBuilder {
    scopes: Vec<Scope>,
    text_provider: Arc<dyn TextProvider>,
}

impl Default for DateTimeFormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTimeFormatterBuilder {
    /// Creates an empty builder using the compiled text provider.
    pub fn new() -> Self {
        Self {
            scopes: alloc::vec![Scope::default()],
            text_provider: default_text_provider(),
        }
    }

    /// Sets the provider used by text nodes appended after this call.
    pub fn with_text_provider(&mut self, provider: Arc<dyn TextProvider>) -> &mut Self {
        self.text_provider = provider;
        self
    }

    fn active(&mut self) -> FormatResult<&mut Scope> {
        self.scopes.last_mut().format_unwrap()
    }

    /// Appends `node` to the active scope, applying any pending pad.
    ///
    /// Returns the index of the node if it may act as an adjacent value anchor.
    fn append_internal(&mut self, node: PrinterParser) -> Option<usize> {
        let Some(active) = self.scopes.last_mut() else {
            return None;
        };
        active.anchor = None;
        match active.pad_next.take() {
            Some((width, pad)) => {
                let padded = PadPrinterParser::new(node, width, pad);
                active.nodes.push(PrinterParser::Pad(padded));
                None
            }
            None => {
                active.nodes.push(node);
                Some(active.nodes.len() - 1)
            }
        }
    }

    fn append_anchor(&mut self, node: NumberPrinterParser) {
        let index = self.append_internal(PrinterParser::Number(node));
        if let Some(active) = self.scopes.last_mut() {
            active.anchor = index;
        }
    }

    /// Appends a fixed width value, reserving its width from the active anchor.
    fn append_fixed_width(&mut self, width: u8, node: NumberPrinterParser) -> FormatResult<&mut Self> {
        let active = self.active()?;
        let anchor = active.anchor.filter(|index| {
            matches!(active.nodes.get(*index), Some(PrinterParser::Number(_)))
        });
        let Some(index) = anchor else {
            self.append_internal(PrinterParser::Number(node));
            return Ok(self);
        };
        if let Some(PrinterParser::Number(base)) = active.nodes.get_mut(index) {
            *base = base.with_subsequent_width(u32::from(width));
        }
        self.append_internal(PrinterParser::Number(node.with_fixed_width()));
        self.active()?.anchor = Some(index);
        Ok(self)
    }

    // ==== Settings ====

    /// Makes the remainder of the parse case sensitive, which is the default.
    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Settings(SettingsParser::CaseSensitive));
        self
    }

    /// Makes the remainder of the parse case insensitive.
    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Settings(SettingsParser::CaseInsensitive));
        self
    }

    /// Makes the remainder of the parse strict, which is the default.
    pub fn parse_strict(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Settings(SettingsParser::Strict));
        self
    }

    /// Makes the remainder of the parse lenient.
    pub fn parse_lenient(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Settings(SettingsParser::Lenient));
        self
    }

    // ==== Values ====

    /// Appends a value printed with as many digits as needed, signed only when negative.
    pub fn append_value(&mut self, field: DateTimeField) -> &mut Self {
        self.append_anchor(NumberPrinterParser::new(field, 1, MAX_WIDTH, SignStyle::Normal));
        self
    }

    /// Appends a non-negative value zero padded to `width` digits.
    pub fn append_value_fixed(&mut self, field: DateTimeField, width: u8) -> FormatResult<&mut Self> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(FormatError::configuration().with_message(format!(
                "The width must be from 1 to 19 inclusive but was {width}"
            )));
        }
        let node = NumberPrinterParser::new(field, width, width, SignStyle::NotNegative);
        self.append_fixed_width(width, node)
    }

    /// Appends a value with a width range and sign style.
    pub fn append_value_with(
        &mut self,
        field: DateTimeField,
        min_width: u8,
        max_width: u8,
        sign_style: SignStyle,
    ) -> FormatResult<&mut Self> {
        if min_width == max_width && sign_style == SignStyle::NotNegative {
            return self.append_value_fixed(field, max_width);
        }
        if !(1..=MAX_WIDTH).contains(&min_width) {
            return Err(FormatError::configuration().with_message(format!(
                "The minimum width must be from 1 to 19 inclusive but was {min_width}"
            )));
        }
        if !(1..=MAX_WIDTH).contains(&max_width) {
            return Err(FormatError::configuration().with_message(format!(
                "The maximum width must be from 1 to 19 inclusive but was {max_width}"
            )));
        }
        if max_width < min_width {
            return Err(FormatError::configuration().with_message(format!(
                "The maximum width must exceed or equal the minimum width but {max_width} < {min_width}"
            )));
        }
        let node = NumberPrinterParser::new(field, min_width, max_width, sign_style);
        if min_width == max_width {
            self.append_internal(PrinterParser::Number(node));
        } else {
            self.append_anchor(node);
        }
        Ok(self)
    }

    /// Appends the low order `width` digits of a value, read back relative to `base_value`.
    ///
    /// With a width of 2 and a base of 1980, years 1980 to 2079 round trip.
    pub fn append_value_reduced(
        &mut self,
        field: DateTimeField,
        width: u8,
        base_value: i32,
    ) -> FormatResult<&mut Self> {
        let node = NumberPrinterParser::reduced(field, width, base_value)?;
        self.append_fixed_width(width, node)
    }

    /// Appends a fixed range value as a decimal fraction of its range.
    pub fn append_fraction(
        &mut self,
        field: DateTimeField,
        min_width: u8,
        max_width: u8,
        decimal_point: bool,
    ) -> FormatResult<&mut Self> {
        let node = FractionPrinterParser::new(field, min_width, max_width, decimal_point)?;
        self.append_internal(PrinterParser::Fraction(node));
        Ok(self)
    }

    // ==== Text ====

    /// Appends the full text of a value.
    pub fn append_text(&mut self, field: DateTimeField) -> &mut Self {
        self.append_text_with(field, TextStyle::Full)
    }

    /// Appends the text of a value in `style`.
    pub fn append_text_with(&mut self, field: DateTimeField, style: TextStyle) -> &mut Self {
        let node = TextPrinterParser::new(field, style, self.text_provider.clone());
        self.append_internal(PrinterParser::Text(node));
        self
    }

    /// Appends the text of a value from a fixed table, falling back to the number.
    pub fn append_text_lookup(
        &mut self,
        field: DateTimeField,
        table: BTreeMap<i64, String>,
    ) -> &mut Self {
        let provider = Arc::new(TextStore::from_full_text(table));
        let node = TextPrinterParser::new(field, TextStyle::Full, provider);
        self.append_internal(PrinterParser::Text(node));
        self
    }

    // ==== Instant, offsets, zones and chronologies ====

    /// Appends an instant in the ISO-8601 form, such as `2011-12-03T10:15:30Z`.
    pub fn append_instant(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Instant(InstantPrinterParser));
        self
    }

    /// Appends the offset id, such as `+01:00` or `Z`.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Offset(OffsetIdPrinterParser::instance_id()));
        self
    }

    /// Appends an offset in `pattern`, printing `no_offset_text` for a zero offset.
    pub fn append_offset(&mut self, pattern: OffsetPattern, no_offset_text: &str) -> &mut Self {
        let node = OffsetIdPrinterParser::new(no_offset_text, pattern);
        self.append_internal(PrinterParser::Offset(node));
        self
    }

    /// Appends the zone id, region or offset.
    pub fn append_zone_id(&mut self) -> &mut Self {
        self.append_zone_query(ZoneQuery::Zone)
    }

    /// Appends the zone id, treating a fixed offset zone as unavailable when printing.
    pub fn append_zone_region_id(&mut self) -> &mut Self {
        self.append_zone_query(ZoneQuery::RegionOnly)
    }

    /// Appends the zone id, printing the offset when there is no zone.
    pub fn append_zone_or_offset_id(&mut self) -> &mut Self {
        self.append_zone_query(ZoneQuery::ZoneOrOffset)
    }

    fn append_zone_query(&mut self, query: ZoneQuery) -> &mut Self {
        self.append_internal(PrinterParser::ZoneId(ZoneIdPrinterParser::new(query)));
        self
    }

    /// Appends the zone name; this node can only be printed.
    pub fn append_zone_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_internal(PrinterParser::ZoneText(ZoneTextPrinterParser::new(style)));
        self
    }

    /// Appends the chronology id.
    pub fn append_chronology_id(&mut self) -> &mut Self {
        self.append_internal(PrinterParser::Chronology(ChronologyPrinterParser::new(None)));
        self
    }

    /// Appends the chronology name in `style`.
    pub fn append_chronology_text(&mut self, style: TextStyle) -> &mut Self {
        let node = ChronologyPrinterParser::new(Some(style));
        self.append_internal(PrinterParser::Chronology(node));
        self
    }

    /// Appends the localized pattern for the given date and time styles.
    pub fn append_localized(
        &mut self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    ) -> FormatResult<&mut Self> {
        if date_style.is_none() && time_style.is_none() {
            return Err(FormatError::configuration()
                .with_message("Either the date or time style must be non-null"));
        }
        let node = LocalizedPrinterParser::new(date_style, time_style, self.text_provider.clone());
        self.append_internal(PrinterParser::Localized(node));
        Ok(self)
    }

    // ==== Literals and formatters ====

    /// Appends a character literal.
    pub fn append_literal(&mut self, literal: char) -> &mut Self {
        self.append_internal(PrinterParser::CharLiteral(literal));
        self
    }

    /// Appends a string literal; an empty string appends nothing.
    pub fn append_literal_str(&mut self, literal: &str) -> &mut Self {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(ch), None) => {
                self.append_internal(PrinterParser::CharLiteral(ch));
            }
            _ => {
                self.append_internal(PrinterParser::StringLiteral(literal.into()));
            }
        }
        self
    }

    /// Appends every node of `formatter`.
    pub fn append(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        let node = formatter.printer_parser().with_optional(false);
        self.append_internal(PrinterParser::Composite(node));
        self
    }

    /// Appends every node of `formatter` as an optional section.
    pub fn append_optional(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        let node = formatter.printer_parser().with_optional(true);
        self.append_internal(PrinterParser::Composite(node));
        self
    }

    /// Appends the nodes described by `pattern`.
    ///
    /// Nothing is appended if the pattern is invalid.
    pub fn append_pattern(&mut self, pattern: &str) -> FormatResult<&mut Self> {
        let items = PatternItem::parse_all(pattern)?;
        let mut scratch = self.clone();
        for item in items {
            item.apply(&mut scratch)?;
        }
        *self = scratch;
        Ok(self)
    }

    // ==== Padding and optional sections ====

    /// Pads the next appended node to `width` characters with spaces.
    pub fn pad_next(&mut self, width: usize) -> FormatResult<&mut Self> {
        self.pad_next_with(width, ' ')
    }

    /// Pads the next appended node to `width` characters with `pad`.
    pub fn pad_next_with(&mut self, width: usize, pad: char) -> FormatResult<&mut Self> {
        if width < 1 {
            return Err(FormatError::configuration().with_message(format!(
                "The pad width must be at least one but was {width}"
            )));
        }
        let active = self.active()?;
        active.pad_next = Some((width, pad));
        active.anchor = None;
        Ok(self)
    }

    /// Starts an optional section, which prints only when all its values are
    /// available and parses only when all its nodes match.
    pub fn optional_start(&mut self) -> &mut Self {
        if let Some(active) = self.scopes.last_mut() {
            active.anchor = None;
        }
        self.scopes.push(Scope::default());
        #[cfg(feature = "log")]
        log::debug!("Started optional section at depth {}", self.scopes.len() - 1);
        self
    }

    /// Ends the innermost optional section.
    ///
    /// An empty section is discarded.
    pub fn optional_end(&mut self) -> FormatResult<&mut Self> {
        if self.scopes.len() < 2 {
            return Err(FormatError::configuration().with_message(
                "Cannot call optional_end() as there was no previous call to optional_start()",
            ));
        }
        self.close_optional();
        Ok(self)
    }

    /// Pops the innermost optional scope into its parent. The root scope is never popped.
    fn close_optional(&mut self) {
        if self.scopes.len() < 2 {
            return;
        }
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        #[cfg(feature = "log")]
        log::debug!(
            "Ended optional section at depth {} with {} nodes",
            self.scopes.len(),
            scope.nodes.len()
        );
        if !scope.nodes.is_empty() {
            let node = CompositePrinterParser::new(scope.nodes, true);
            self.append_internal(PrinterParser::Composite(node));
        }
    }

    /// Closes any open optional sections and returns the root composite.
    pub(crate) fn to_composite(&mut self) -> CompositePrinterParser {
        while self.scopes.len() > 1 {
            self.close_optional();
        }
        let nodes = self
            .scopes
            .first()
            .map(|root| root.nodes.clone())
            .unwrap_or_default();
        CompositePrinterParser::new(nodes, false)
    }

    /// Completes the builder into a formatter for the root locale.
    ///
    /// Open optional sections are closed. The builder may continue to be used
    /// without affecting the returned formatter.
    pub fn to_formatter(&mut self) -> DateTimeFormatter {
        self.to_formatter_with_locale(locale!("und"))
    }

    /// Completes the builder into a formatter for `locale`.
    pub fn to_formatter_with_locale(&mut self, locale: Locale) -> DateTimeFormatter {
        DateTimeFormatter::new(self.to_composite(), locale)
    }
}

#[cfg(test)]
mod tests {
    use super::DateTimeFormatterBuilder;
    use crate::fields::DateTimeField;
    use crate::options::SignStyle;
    use crate::{ErrorKind, FormatResult};
    use writeable::assert_writeable_eq;

    fn kind<T>(result: FormatResult<T>) -> ErrorKind {
        result.map(|_| ()).unwrap_err().kind()
    }

    #[test]
    fn adjacent_values_reserve_width() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value(DateTimeField::Year)
            .append_value_fixed(DateTimeField::MonthOfYear, 2)
            .unwrap()
            .append_value_fixed(DateTimeField::DayOfMonth, 2)
            .unwrap();
        let formatter = builder.to_formatter();
        assert_writeable_eq!(
            formatter,
            "Value(Year)Value(MonthOfYear,2)Value(DayOfMonth,2)"
        );
        let parsed = formatter.parse("20110630").unwrap();
        assert_eq!(parsed.get(DateTimeField::Year), Some(2011));
        assert_eq!(parsed.get(DateTimeField::MonthOfYear), Some(6));
        assert_eq!(parsed.get(DateTimeField::DayOfMonth), Some(30));
    }

    #[test]
    fn literal_breaks_adjacency() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value(DateTimeField::Year)
            .append_literal_str("")
            .append_literal('-')
            .append_value_fixed(DateTimeField::MonthOfYear, 2)
            .unwrap();
        assert!(builder.to_formatter().parse("201106").is_err());
    }

    #[test]
    fn width_validation() {
        let mut builder = DateTimeFormatterBuilder::new();
        let year = DateTimeField::Year;
        assert_eq!(kind(builder.append_value_fixed(year, 0)), ErrorKind::Configuration);
        assert_eq!(kind(builder.append_value_fixed(year, 20)), ErrorKind::Configuration);
        assert_eq!(
            kind(builder.append_value_with(year, 3, 2, SignStyle::Normal)),
            ErrorKind::Configuration
        );
        assert_eq!(
            kind(builder.append_value_with(year, 0, 2, SignStyle::Normal)),
            ErrorKind::Configuration
        );
        assert_eq!(kind(builder.pad_next(0)), ErrorKind::Configuration);
        assert_eq!(kind(builder.optional_end()), ErrorKind::Configuration);
        assert_eq!(kind(builder.append_localized(None, None)), ErrorKind::Configuration);
        assert_writeable_eq!(builder.to_formatter(), "");
    }

    #[test]
    fn optional_sections_close_automatically() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .append_value_fixed(DateTimeField::HourOfDay, 2)
            .unwrap()
            .optional_start()
            .append_literal(':')
            .append_value_fixed(DateTimeField::MinuteOfHour, 2)
            .unwrap()
            .optional_start();
        let formatter = builder.to_formatter();
        assert_writeable_eq!(formatter, "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]");
        assert_eq!(kind(builder.optional_end()), ErrorKind::Configuration);

        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .optional_start()
            .append_literal('a')
            .optional_start()
            .append_literal('b');
        assert_writeable_eq!(builder.to_formatter(), "['a'['b']]");
    }

    #[test]
    fn empty_optional_section_is_discarded() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.optional_start().optional_end().unwrap();
        builder.append_literal_str("ab");
        assert_writeable_eq!(builder.to_formatter(), "'ab'");
    }

    #[test]
    fn padded_value_is_not_an_anchor() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .pad_next_with(4, '0')
            .unwrap()
            .append_value(DateTimeField::Year)
            .append_value_fixed(DateTimeField::MonthOfYear, 2)
            .unwrap();
        assert_writeable_eq!(
            builder.to_formatter(),
            "Pad(Value(Year),4,'0')Value(MonthOfYear,2)"
        );
    }

    #[test]
    fn builder_is_reusable_after_to_formatter() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_value(DateTimeField::Year);
        let first = builder.to_formatter();
        builder.append_literal('!');
        assert_writeable_eq!(first, "Value(Year)");
        assert_writeable_eq!(builder.to_formatter(), "Value(Year)'!'");
    }
}
