//! The closed family of printer-parsers and the structural nodes.
//!
//! Every node can print and parse. Printing returns `Ok(false)` when a value
//! is unavailable, which makes an enclosing optional section vanish. Parsing
//! returns `Ok(new_position)` or `Err(error_position)`, where the error
//! position is where the mismatch was detected.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use writeable::{impl_display_with_writeable, Writeable};

use super::{
    chrono::{ChronologyPrinterParser, LocalizedPrinterParser},
    context::{advance_chars, ParseContext, PrintContext},
    instant::InstantPrinterParser,
    number::{FractionPrinterParser, NumberPrinterParser},
    offset::OffsetIdPrinterParser,
    text::TextPrinterParser,
    zone::{ZoneIdPrinterParser, ZoneTextPrinterParser},
};
use crate::{FormatError, FormatResult};

/// The result of a node-level parse: the new position or the error position.
pub(crate) type ParseResult = Result<usize, usize>;

#[derive(Debug, Clone)]
pub(crate) enum PrinterParser {
    Composite(CompositePrinterParser),
    Pad(PadPrinterParser),
    Settings(SettingsParser),
    CharLiteral(char),
    StringLiteral(String),
    Number(NumberPrinterParser),
    Fraction(FractionPrinterParser),
    Text(TextPrinterParser),
    Instant(InstantPrinterParser),
    Offset(OffsetIdPrinterParser),
    ZoneId(ZoneIdPrinterParser),
    ZoneText(ZoneTextPrinterParser),
    Chronology(ChronologyPrinterParser),
    Localized(LocalizedPrinterParser),
}

impl PrinterParser {
    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        match self {
            Self::Composite(node) => node.print(context, buf),
            Self::Pad(node) => node.print(context, buf),
            Self::Settings(_) => Ok(true),
            Self::CharLiteral(literal) => {
                buf.push(*literal);
                Ok(true)
            }
            Self::StringLiteral(literal) => {
                buf.push_str(literal);
                Ok(true)
            }
            Self::Number(node) => node.print(context, buf),
            Self::Fraction(node) => node.print(context, buf),
            Self::Text(node) => node.print(context, buf),
            Self::Instant(node) => node.print(context, buf),
            Self::Offset(node) => node.print(context, buf),
            Self::ZoneId(node) => node.print(context, buf),
            Self::ZoneText(node) => node.print(context, buf),
            Self::Chronology(node) => node.print(context, buf),
            Self::Localized(node) => node.print(context, buf),
        }
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        match self {
            Self::Composite(node) => node.parse(context, text, position),
            Self::Pad(node) => node.parse(context, text, position),
            Self::Settings(setting) => {
                setting.apply(context);
                Ok(position)
            }
            Self::CharLiteral(literal) => {
                let Some(ch) = text.get(position..).and_then(|rest| rest.chars().next()) else {
                    return Err(position);
                };
                if !context.char_equals(*literal, ch) {
                    return Err(position);
                }
                Ok(position + ch.len_utf8())
            }
            Self::StringLiteral(literal) => context
                .match_text(text, position, literal)
                .ok_or(position),
            Self::Number(node) => node.parse(context, text, position),
            Self::Fraction(node) => node.parse(context, text, position),
            Self::Text(node) => node.parse(context, text, position),
            Self::Instant(node) => node.parse(context, text, position),
            Self::Offset(node) => node.parse(context, text, position),
            Self::ZoneId(node) => node.parse(context, text, position),
            Self::ZoneText(_) => Err(position),
            Self::Chronology(node) => node.parse(context, text, position),
            Self::Localized(node) => node.parse(context, text, position),
        }
    }
}

impl Writeable for PrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::Composite(node) => node.write_to(sink),
            Self::Pad(node) => node.write_to(sink),
            Self::Settings(setting) => sink.write_str(setting.description()),
            Self::CharLiteral('\'') => sink.write_str("''"),
            Self::CharLiteral(literal) => {
                sink.write_char('\'')?;
                sink.write_char(*literal)?;
                sink.write_char('\'')
            }
            Self::StringLiteral(literal) => {
                sink.write_char('\'')?;
                sink.write_str(&literal.replace('\'', "''"))?;
                sink.write_char('\'')
            }
            Self::Number(node) => node.write_to(sink),
            Self::Fraction(node) => node.write_to(sink),
            Self::Text(node) => node.write_to(sink),
            Self::Instant(node) => node.write_to(sink),
            Self::Offset(node) => node.write_to(sink),
            Self::ZoneId(node) => node.write_to(sink),
            Self::ZoneText(node) => node.write_to(sink),
            Self::Chronology(node) => node.write_to(sink),
            Self::Localized(node) => node.write_to(sink),
        }
    }
}

impl_display_with_writeable!(PrinterParser);

// ==== Composite ====

/// An ordered list of nodes, optionally forming an optional section.
#[derive(Debug, Clone)]
pub(crate) struct CompositePrinterParser {
    nodes: Arc<[PrinterParser]>,
    optional: bool,
}

impl CompositePrinterParser {
    pub(crate) fn new(nodes: Vec<PrinterParser>, optional: bool) -> Self {
        Self {
            nodes: nodes.into(),
            optional,
        }
    }

    /// Returns a copy sharing the same nodes with the optional flag changed.
    pub(crate) fn with_optional(&self, optional: bool) -> Self {
        Self {
            nodes: self.nodes.clone(),
            optional,
        }
    }

    pub(crate) fn nodes(&self) -> &[PrinterParser] {
        &self.nodes
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let length = buf.len();
        for node in self.nodes.iter() {
            if !node.print(context, buf)? {
                buf.truncate(length);
                return Ok(self.optional);
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
        if !self.optional {
            return self
                .nodes
                .iter()
                .try_fold(position, |pos, node| node.parse(context, text, pos));
        }
        context.start_optional();
        let mut pos = position;
        for node in self.nodes.iter() {
            match node.parse(context, text, pos) {
                Ok(next) => pos = next,
                Err(_) => {
                    context.end_optional(false);
                    return Ok(position);
                }
            }
        }
        context.end_optional(true);
        Ok(pos)
    }
}

impl Writeable for CompositePrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char(if self.optional { '[' } else { '(' })?;
        for node in self.nodes.iter() {
            node.write_to(sink)?;
        }
        sink.write_char(if self.optional { ']' } else { ')' })
    }
}

impl_display_with_writeable!(CompositePrinterParser);

// ==== Pad ====

/// Pads the output of another node to a fixed width.
#[derive(Debug, Clone)]
pub(crate) struct PadPrinterParser {
    inner: Arc<PrinterParser>,
    width: usize,
    pad: char,
}

impl PadPrinterParser {
    pub(crate) fn new(inner: PrinterParser, width: usize, pad: char) -> Self {
        Self {
            inner: Arc::new(inner),
            width,
            pad,
        }
    }

    fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let pre_len = buf.len();
        if !self.inner.print(context, buf)? {
            return Ok(false);
        }
        let len = buf[pre_len..].chars().count();
        if len > self.width {
            return Err(FormatError::print().with_message(alloc::format!(
                "Cannot print as output of {len} characters exceeds pad width of {}",
                self.width
            )));
        }
        let padding: String = core::iter::repeat(self.pad)
            .take(self.width - len)
            .collect();
        buf.insert_str(pre_len, &padding);
        Ok(true)
    }

    fn parse(&self, context: &mut ParseContext<'_>, text: &str, position: usize) -> ParseResult {
        let strict = context.is_strict();
        if position >= text.len() {
            return Err(position);
        }
        let end = match advance_chars(text, position, self.width) {
            Some(end) => end,
            None if strict => return Err(position),
            None => text.len(),
        };
        let mut pos = position;
        while pos < end {
            match text[pos..].chars().next() {
                Some(ch) if context.char_equals(ch, self.pad) => pos += ch.len_utf8(),
                _ => break,
            }
        }
        let result = self.inner.parse(context, &text[..end], pos)?;
        if result != end && strict {
            return Err(pos);
        }
        Ok(result)
    }
}

impl Writeable for PadPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_str("Pad(")?;
        self.inner.write_to(sink)?;
        write!(sink, ",{}", self.width)?;
        if self.pad != ' ' {
            write!(sink, ",'{}'", self.pad)?;
        }
        sink.write_char(')')
    }
}

impl_display_with_writeable!(PadPrinterParser);

// ==== Settings ====

/// Switches a parse setting when reached during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsParser {
    CaseSensitive,
    CaseInsensitive,
    Strict,
    Lenient,
}

impl SettingsParser {
    fn apply(self, context: &mut ParseContext<'_>) {
        match self {
            Self::CaseSensitive => context.set_case_sensitive(true),
            Self::CaseInsensitive => context.set_case_sensitive(false),
            Self::Strict => context.set_strict(true),
            Self::Lenient => context.set_strict(false),
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::CaseSensitive => "ParseCaseSensitive(true)",
            Self::CaseInsensitive => "ParseCaseSensitive(false)",
            Self::Strict => "ParseStrict(true)",
            Self::Lenient => "ParseStrict(false)",
        }
    }
}
