//! Compiled English text and localized pattern data.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

use icu_locale::Locale;
use rustc_hash::FxHashMap;

use super::{FormatStyleProvider, TextProvider, TextStore};
use crate::{
    chronology::Chronology,
    fields::DateTimeField,
    options::{FormatStyle, TextStyle},
    FormatError, FormatResult,
};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const QUARTERS: [&str; 4] = ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];

/// English text for months, days of week, quarters, am/pm and eras.
///
/// The same text is returned for every locale.
#[derive(Debug, Clone)]
pub struct CompiledTextProvider {
    stores: FxHashMap<DateTimeField, TextStore>,
}

impl Default for CompiledTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CompiledTextProvider {
    /// Builds the English text tables.
    pub fn new() -> Self {
        let mut stores = FxHashMap::default();
        stores.insert(DateTimeField::MonthOfYear, named_store(1, &MONTHS, 3));
        stores.insert(DateTimeField::DayOfWeek, named_store(1, &DAYS, 3));
        stores.insert(
            DateTimeField::QuarterOfYear,
            TextStore::new([
                (TextStyle::Full, indexed(1, QUARTERS.iter().map(|q| q.to_string()))),
                (TextStyle::Short, indexed(1, (1..=4).map(|q| format!("Q{q}")))),
                (TextStyle::Narrow, indexed(1, (1..=4).map(|q| q.to_string()))),
            ]),
        );
        stores.insert(
            DateTimeField::AmPmOfDay,
            TextStore::new([
                (TextStyle::Full, indexed(0, ["AM", "PM"].map(String::from))),
                (TextStyle::Short, indexed(0, ["AM", "PM"].map(String::from))),
                (TextStyle::Narrow, indexed(0, ["a", "p"].map(String::from))),
            ]),
        );
        stores.insert(
            DateTimeField::Era,
            TextStore::new([
                (
                    TextStyle::Full,
                    indexed(0, ["Before Christ", "Anno Domini"].map(String::from)),
                ),
                (TextStyle::Short, indexed(0, ["BC", "AD"].map(String::from))),
                (TextStyle::Narrow, indexed(0, ["B", "A"].map(String::from))),
            ]),
        );
        Self { stores }
    }
}

/// Builds full, abbreviated and single letter tables from a list of names.
fn named_store(first: i64, names: &[&str], short_len: usize) -> TextStore {
    let abbreviate = |len: usize| {
        names
            .iter()
            .map(move |name| name.chars().take(len).collect::<String>())
    };
    TextStore::new([
        (TextStyle::Full, indexed(first, names.iter().map(|n| n.to_string()))),
        (TextStyle::Short, indexed(first, abbreviate(short_len))),
        (TextStyle::Narrow, indexed(first, abbreviate(1))),
    ])
}

fn indexed<I: IntoIterator<Item = String>>(first: i64, texts: I) -> BTreeMap<i64, String> {
    (first..).zip(texts).collect()
}

impl TextProvider for CompiledTextProvider {
    fn text(
        &self,
        field: DateTimeField,
        value: i64,
        style: TextStyle,
        _: &Locale,
    ) -> Option<&str> {
        self.stores.get(&field)?.text(value, style)
    }

    fn text_entries(
        &self,
        field: DateTimeField,
        style: Option<TextStyle>,
        _: &Locale,
    ) -> Option<&[(String, i64)]> {
        self.stores.get(&field)?.entries(style)
    }
}

/// English localized date and time patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledFormatStyles;

impl CompiledFormatStyles {
    const fn date_pattern(style: FormatStyle) -> &'static str {
        match style {
            FormatStyle::Full => "EEEE, MMMM d, y",
            FormatStyle::Long => "MMMM d, y",
            FormatStyle::Medium => "MMM d, y",
            FormatStyle::Short => "M/d/yy",
        }
    }

    const fn time_pattern(style: FormatStyle) -> &'static str {
        match style {
            FormatStyle::Full => "h:mm:ss a zzzz",
            FormatStyle::Long => "h:mm:ss a z",
            FormatStyle::Medium => "h:mm:ss a",
            FormatStyle::Short => "h:mm a",
        }
    }
}

impl FormatStyleProvider for CompiledFormatStyles {
    fn pattern(
        &self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
        _: &Chronology,
        _: &Locale,
    ) -> FormatResult<String> {
        match (date_style, time_style) {
            (Some(date), Some(time)) => Ok(format!(
                "{} {}",
                Self::date_pattern(date),
                Self::time_pattern(time)
            )),
            (Some(date), None) => Ok(Self::date_pattern(date).into()),
            (None, Some(time)) => Ok(Self::time_pattern(time).into()),
            (None, None) => Err(FormatError::configuration()
                .with_message("Either the date or time style must be present")),
        }
    }
}
