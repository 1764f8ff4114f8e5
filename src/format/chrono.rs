//! Chronology id and localized pattern printer-parsers.

use alloc::string::String;
use alloc::sync::Arc;
use std::sync::Mutex;

use rustc_hash::FxHashMap;
use writeable::{impl_display_with_writeable, Writeable};

use super::{
    builder::DateTimeFormatterBuilder,
    context::{ParseContext, PrintContext},
    printer_parser::{CompositePrinterParser, ParseResult},
};
use crate::{
    chronology::Chronology,
    options::{FormatStyle, TextStyle},
    provider::TextProvider,
    FormatResult,
};

// ==== Chronology ====

/// Prints and parses the chronology id, such as `ISO` or `ThaiBuddhist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChronologyPrinterParser {
    style: Option<TextStyle>,
}

impl ChronologyPrinterParser {
    pub(crate) const fn new(style: Option<TextStyle>) -> Self {
        Self { style }
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(chronology) = context.chronology() else {
            return Ok(false);
        };
        // Chronology names are not localized, so every style prints the id.
        buf.push_str(chronology.id());
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let provider = context.settings().chronology_provider.clone();
        let mut best: Option<(Chronology, usize)> = None;
        for chronology in provider.available_chronologies() {
            let id_len = chronology.id().chars().count();
            if best.is_some_and(|(current, _)| current.id().chars().count() >= id_len) {
                continue;
            }
            if let Some(end) = context.match_text(text, position, chronology.id()) {
                best = Some((*chronology, end));
            }
        }
        let (chronology, end) = best.ok_or(position)?;
        context.set_parsed_chronology(chronology);
        Ok(end)
    }
}

impl Writeable for ChronologyPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self.style {
            None => sink.write_str("ChronoId()"),
            Some(style) => write!(sink, "ChronoText({style})"),
        }
    }
}

impl_display_with_writeable!(ChronologyPrinterParser);

// ==== Localized ====

/// The most compiled patterns a localized node keeps before starting afresh.
const COMPILED_LIMIT: usize = 32;

/// Prints and parses using the localized pattern for a date and time style.
///
/// The pattern is looked up when the node is used, so it follows the locale
/// and chronology in effect at that point.
#[derive(Debug, Clone)]
pub(crate) struct LocalizedPrinterParser {
    date_style: Option<FormatStyle>,
    time_style: Option<FormatStyle>,
    text_provider: Arc<dyn TextProvider>,
    compiled: Arc<Mutex<FxHashMap<String, Arc<CompositePrinterParser>>>>,
}

impl LocalizedPrinterParser {
    pub(crate) fn new(
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
        text_provider: Arc<dyn TextProvider>,
    ) -> Self {
        Self {
            date_style,
            time_style,
            text_provider,
            compiled: Arc::default(),
        }
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let chronology = context.chronology().unwrap_or_default();
        let settings = context.settings();
        let pattern = settings.format_styles.pattern(
            self.date_style,
            self.time_style,
            &chronology,
            &settings.locale,
        )?;
        self.compile(&pattern)?.print(context, buf)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let chronology = context.effective_chronology();
        let settings = context.settings();
        let compiled = settings
            .format_styles
            .pattern(self.date_style, self.time_style, &chronology, &settings.locale)
            .and_then(|pattern| self.compile(&pattern));
        match compiled {
            Ok(node) => node.parse(context, text, position),
            Err(_e) => {
                #[cfg(feature = "log")]
                log::debug!("Localized pattern unavailable for parsing: {_e}");
                Err(position)
            }
        }
    }

    /// Compiles `pattern`, reusing an earlier compilation of the same pattern.
    fn compile(&self, pattern: &str) -> FormatResult<Arc<CompositePrinterParser>> {
        if let Some(node) = self
            .compiled
            .lock()
            .ok()
            .and_then(|cache| cache.get(pattern).cloned())
        {
            return Ok(node);
        }
        let mut builder = DateTimeFormatterBuilder::new();
        builder
            .with_text_provider(self.text_provider.clone())
            .append_pattern(pattern)?;
        let node = Arc::new(builder.to_composite());
        if let Ok(mut cache) = self.compiled.lock() {
            if cache.len() >= COMPILED_LIMIT {
                #[cfg(feature = "log")]
                log::debug!("Clearing {} compiled localized patterns", cache.len());
                cache.clear();
            }
            cache.insert(pattern.into(), node.clone());
        }
        Ok(node)
    }
}

impl Writeable for LocalizedPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_str("Localized(")?;
        if let Some(style) = self.date_style {
            write!(sink, "{style}")?;
        }
        sink.write_char(',')?;
        if let Some(style) = self.time_style {
            write!(sink, "{style}")?;
        }
        sink.write_char(')')
    }
}

impl_display_with_writeable!(LocalizedPrinterParser);
