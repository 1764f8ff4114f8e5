//! Zone id and zone text printer-parsers.
//!
//! Region ids are parsed by walking a tree of id prefixes grouped by length.
//! The tree is built from the zone id provider on first use and cached until
//! a different provider, or a provider with a different number of ids, is
//! seen.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, RwLock};

use rustc_hash::FxHashMap;
use writeable::{impl_display_with_writeable, Writeable};

use super::{
    context::{advance_chars, ParseContext, PrintContext},
    offset::OffsetIdPrinterParser,
    printer_parser::ParseResult,
};
use crate::{
    fields::DateTimeField,
    options::TextStyle,
    provider::ZoneIdProvider,
    timezone::{UtcOffset, ZoneId, ZoneQuery},
    FormatError, FormatResult,
};

// ==== ZoneId ====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ZoneIdPrinterParser {
    query: ZoneQuery,
}

impl ZoneIdPrinterParser {
    pub(crate) const fn new(query: ZoneQuery) -> Self {
        Self { query }
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let zone = match self.query {
            ZoneQuery::Zone => context.zone(),
            ZoneQuery::RegionOnly => context
                .zone()
                .filter(|zone| matches!(zone, ZoneId::Region(_))),
            ZoneQuery::ZoneOrOffset => match context.zone() {
                Some(zone) => Some(zone),
                None => match context.value(DateTimeField::OffsetSeconds) {
                    Some(seconds) => {
                        let seconds = DateTimeField::OffsetSeconds
                            .range()
                            .check_valid_value(seconds, DateTimeField::OffsetSeconds)?;
                        Some(UtcOffset::from_seconds(seconds as i32)?.into())
                    }
                    None => None,
                },
            },
        };
        let Some(zone) = zone else {
            return Ok(false);
        };
        zone.write_to(buf).map_err(|_| FormatError::print())?;
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let rest = text.get(position..).unwrap_or_default();
        let bytes = rest.as_bytes();
        match bytes {
            [] => return Err(position),
            [b'+' | b'-', ..] => {
                let mut sub_context = context.copy();
                let end = OffsetIdPrinterParser::instance_id().parse(&mut sub_context, text, position)?;
                let offset = parsed_offset(&sub_context).ok_or(position)?;
                context.set_parsed_zone(offset.into());
                return Ok(end);
            }
            [b'U', b'T', b'C', ..] => return parse_prefixed_offset(context, text, position + 3),
            [b'U', b'T', ..] => return parse_prefixed_offset(context, text, position + 2),
            [b'G', b'M', b'T', ..] => return parse_prefixed_offset(context, text, position + 3),
            _ => {}
        }

        let provider = context.settings().zone_provider.clone();
        let ids = provider.available_zone_ids();
        let cached = cached_tree(&provider);
        let mut tree = cached.tree.as_ref();
        let mut parsed_end = None;
        while let Some(node) = tree {
            let Some(end) = advance_chars(text, position, node.length) else {
                break;
            };
            let candidate = &text[position..end];
            if ids.contains(candidate) {
                parsed_end = Some(end);
            }
            tree = node.get(candidate);
        }

        match parsed_end {
            Some(end) => {
                context.set_parsed_zone(ZoneId::region(&text[position..end]));
                Ok(end)
            }
            None if bytes[0] == b'Z' => {
                context.set_parsed_zone(UtcOffset::UTC.into());
                Ok(position + 1)
            }
            None => Err(position),
        }
    }
}

impl Writeable for ZoneIdPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_str(self.query.description())
    }
}

impl_display_with_writeable!(ZoneIdPrinterParser);

/// Parses an offset following a `UTC`, `UT` or `GMT` prefix.
///
/// A prefix without a valid offset is read as UTC itself.
fn parse_prefixed_offset(context: &mut ParseContext<'_>, text: &str, position: usize) -> ParseResult {
    let mut sub_context = context.copy();
    let parsed = OffsetIdPrinterParser::instance_id()
        .parse(&mut sub_context, text, position)
        .ok()
        .and_then(|end| Some((end, parsed_offset(&sub_context)?)));
    match parsed {
        Some((end, offset)) => {
            context.set_parsed_zone(offset.into());
            Ok(end)
        }
        None => {
            context.set_parsed_zone(UtcOffset::UTC.into());
            Ok(position)
        }
    }
}

fn parsed_offset(context: &ParseContext<'_>) -> Option<UtcOffset> {
    let seconds = context.parsed_field(DateTimeField::OffsetSeconds)?;
    UtcOffset::from_seconds(i32::try_from(seconds).ok()?).ok()
}

// ==== Substring tree ====

/// A level of the zone id parse tree, keyed by id prefixes of `length` characters.
#[derive(Debug)]
struct SubstringTree {
    length: usize,
    children: FxHashMap<String, Option<SubstringTree>>,
}

impl SubstringTree {
    fn new(length: usize) -> Self {
        Self {
            length,
            children: FxHashMap::default(),
        }
    }

    /// Builds a tree from `ids`, or `None` if there are no ids.
    fn build(ids: &BTreeSet<String>) -> Option<Self> {
        let mut sorted: Vec<(usize, &str)> = ids.iter().map(|id| (id.chars().count(), id.as_str())).collect();
        sorted.sort_unstable();
        let mut tree = Self::new(sorted.first()?.0);
        for (len, id) in sorted {
            tree.add(id, len);
        }
        Some(tree)
    }

    fn add(&mut self, id: &str, id_len: usize) {
        if id_len == self.length {
            self.children.insert(id.into(), None);
        } else if id_len > self.length {
            let prefix: String = id.chars().take(self.length).collect();
            let child = self.children.entry(prefix).or_insert(None);
            child.get_or_insert_with(|| Self::new(id_len)).add(id, id_len);
        }
    }

    fn get(&self, prefix: &str) -> Option<&Self> {
        self.children.get(prefix)?.as_ref()
    }
}

/// The tree for the most recently used provider, which it keeps alive so
/// that identity comparisons stay valid.
#[derive(Debug)]
struct CachedTree {
    provider: Arc<dyn ZoneIdProvider>,
    size: usize,
    tree: Option<SubstringTree>,
}

static CACHE: RwLock<Option<Arc<CachedTree>>> = RwLock::new(None);
static REBUILD: Mutex<()> = Mutex::new(());

fn cached_tree(provider: &Arc<dyn ZoneIdProvider>) -> Arc<CachedTree> {
    let size = provider.available_zone_ids().len();
    let lookup = || {
        CACHE
            .read()
            .ok()?
            .as_ref()
            .filter(|cached| Arc::ptr_eq(&cached.provider, provider) && cached.size == size)
            .cloned()
    };
    if let Some(cached) = lookup() {
        return cached;
    }
    let _guard = REBUILD.lock();
    if let Some(cached) = lookup() {
        return cached;
    }
    #[cfg(feature = "log")]
    log::debug!("Building zone id parse tree for {size} ids");
    let cached = Arc::new(CachedTree {
        provider: provider.clone(),
        size,
        tree: SubstringTree::build(provider.available_zone_ids()),
    });
    if let Ok(mut slot) = CACHE.write() {
        *slot = Some(cached.clone());
    }
    cached
}

// ==== ZoneText ====

/// Prints the zone id; zone names are not localized and cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ZoneTextPrinterParser {
    style: TextStyle,
}

impl ZoneTextPrinterParser {
    pub(crate) const fn new(style: TextStyle) -> Self {
        Self { style }
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(zone) = context.zone() else {
            return Ok(false);
        };
        zone.write_to(buf).map_err(|_| FormatError::print())?;
        Ok(true)
    }
}

impl Writeable for ZoneTextPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write!(sink, "ZoneText({})", self.style)
    }
}

impl_display_with_writeable!(ZoneTextPrinterParser);
