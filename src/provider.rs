//! The data providers consulted by printer-parsers.
//!
//! A formatter never owns locale data directly. Text for fields, the set of
//! known zone identifiers, the available chronologies and localized format
//! patterns are all sourced through the traits in this module, which may be
//! swapped out on a `DateTimeFormatter` or `DateTimeFormatterBuilder`.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use icu_locale::Locale;
use rustc_hash::FxHashMap;

use crate::{
    chronology::Chronology,
    fields::DateTimeField,
    options::{FormatStyle, TextStyle},
    FormatResult,
};

mod compiled;

pub use compiled::{CompiledFormatStyles, CompiledTextProvider};

/// Provides the text of field values, such as month and day names.
pub trait TextProvider: fmt::Debug + Send + Sync {
    /// Returns the text for `value` of `field` in `style`, if any exists.
    fn text(
        &self,
        field: DateTimeField,
        value: i64,
        style: TextStyle,
        locale: &Locale,
    ) -> Option<&str>;

    /// Returns the parsable `(text, value)` entries for `field`, longest text first.
    ///
    /// A `style` of `None` returns the entries of every parsable style.
    fn text_entries(
        &self,
        field: DateTimeField,
        style: Option<TextStyle>,
        locale: &Locale,
    ) -> Option<&[(String, i64)]>;
}

/// Provides the set of known region zone identifiers.
pub trait ZoneIdProvider: fmt::Debug + Send + Sync {
    /// Returns every region identifier this provider knows about.
    fn available_zone_ids(&self) -> &BTreeSet<String>;
}

/// Provides the chronologies that may be parsed by id.
pub trait ChronologyProvider: fmt::Debug + Send + Sync {
    /// Returns every available chronology.
    fn available_chronologies(&self) -> &[Chronology];
}

/// Provides localized date and time patterns.
pub trait FormatStyleProvider: fmt::Debug + Send + Sync {
    /// Returns the pattern for the given date and time styles.
    ///
    /// At least one of `date_style` or `time_style` must be present.
    fn pattern(
        &self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
        chronology: &Chronology,
        locale: &Locale,
    ) -> FormatResult<String>;
}

// ==== TextStore ====

/// A table of value to text mappings per text style, with derived parse lists.
///
/// Only a style whose texts are all distinct may be parsed. The style-less
/// parse list merges every parsable style.
#[derive(Debug, Clone, Default)]
pub struct TextStore {
    values: BTreeMap<TextStyle, BTreeMap<i64, String>>,
    parsable: FxHashMap<Option<TextStyle>, Vec<(String, i64)>>,
}

impl TextStore {
    /// Creates a store from text tables keyed by style.
    pub fn new<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (TextStyle, BTreeMap<i64, String>)>,
    {
        let values: BTreeMap<_, _> = tables.into_iter().collect();
        let mut parsable = FxHashMap::default();
        let mut all = Vec::new();
        for (style, table) in &values {
            let distinct: BTreeSet<&str> = table.values().map(String::as_str).collect();
            if distinct.len() < table.len() {
                continue;
            }
            let mut entries: Vec<(String, i64)> = table
                .iter()
                .map(|(value, text)| (text.clone(), *value))
                .collect();
            sort_longest_first(&mut entries);
            all.extend(entries.iter().cloned());
            parsable.insert(Some(*style), entries);
        }
        sort_longest_first(&mut all);
        parsable.insert(None, all);
        Self { values, parsable }
    }

    /// Creates a store holding a single full-text table.
    pub fn from_full_text(table: BTreeMap<i64, String>) -> Self {
        Self::new([(TextStyle::Full, table)])
    }

    /// Returns the text for `value` in `style`.
    pub fn text(&self, value: i64, style: TextStyle) -> Option<&str> {
        self.values
            .get(&style)
            .and_then(|table| table.get(&value))
            .map(String::as_str)
    }

    /// Returns the parse entries for `style`, longest text first.
    pub fn entries(&self, style: Option<TextStyle>) -> Option<&[(String, i64)]> {
        self.parsable.get(&style).map(Vec::as_slice)
    }
}

fn sort_longest_first(entries: &mut [(String, i64)]) {
    entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
}

impl TextProvider for TextStore {
    fn text(&self, _: DateTimeField, value: i64, style: TextStyle, _: &Locale) -> Option<&str> {
        TextStore::text(self, value, style)
    }

    fn text_entries(
        &self,
        _: DateTimeField,
        style: Option<TextStyle>,
        _: &Locale,
    ) -> Option<&[(String, i64)]> {
        self.entries(style)
    }
}

// ==== Zone id providers ====

/// A zone id provider over a caller supplied set of region identifiers.
#[derive(Debug, Clone, Default)]
pub struct FixedZoneIds {
    ids: BTreeSet<String>,
}

impl FixedZoneIds {
    /// Creates a provider from the given identifiers.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl ZoneIdProvider for FixedZoneIds {
    fn available_zone_ids(&self) -> &BTreeSet<String> {
        &self.ids
    }
}

/// A zone id provider over the identifiers in the bundled IANA time zone database.
#[cfg(feature = "tzdb")]
#[derive(Debug, Clone)]
pub struct BundledZoneIds {
    ids: BTreeSet<String>,
}

#[cfg(feature = "tzdb")]
impl BundledZoneIds {
    /// Collects the identifiers of the bundled database.
    pub fn new() -> Self {
        Self {
            ids: jiff_tzdb::available().map(String::from).collect(),
        }
    }
}

#[cfg(feature = "tzdb")]
impl Default for BundledZoneIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tzdb")]
impl ZoneIdProvider for BundledZoneIds {
    fn available_zone_ids(&self) -> &BTreeSet<String> {
        &self.ids
    }
}

// ==== Chronology providers ====

/// Provides the chronologies built into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinChronologies;

impl ChronologyProvider for BuiltinChronologies {
    fn available_chronologies(&self) -> &[Chronology] {
        &Chronology::BUILTIN
    }
}

// ==== Defaults ====

pub(crate) fn default_text_provider() -> Arc<dyn TextProvider> {
    static PROVIDER: std::sync::LazyLock<Arc<CompiledTextProvider>> =
        std::sync::LazyLock::new(|| Arc::new(CompiledTextProvider::new()));
    PROVIDER.clone()
}

pub(crate) fn default_zone_provider() -> Arc<dyn ZoneIdProvider> {
    #[cfg(feature = "tzdb")]
    {
        static PROVIDER: std::sync::LazyLock<Arc<BundledZoneIds>> =
            std::sync::LazyLock::new(|| Arc::new(BundledZoneIds::new()));
        PROVIDER.clone()
    }
    #[cfg(not(feature = "tzdb"))]
    {
        static PROVIDER: std::sync::LazyLock<Arc<FixedZoneIds>> =
            std::sync::LazyLock::new(|| Arc::new(FixedZoneIds::default()));
        PROVIDER.clone()
    }
}

pub(crate) fn default_chronology_provider() -> Arc<dyn ChronologyProvider> {
    Arc::new(BuiltinChronologies)
}

pub(crate) fn default_format_style_provider() -> Arc<dyn FormatStyleProvider> {
    Arc::new(CompiledFormatStyles)
}
