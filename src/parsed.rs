//! The unresolved result of a parse.

use core::fmt;

use rustc_hash::FxHashMap;

use crate::{
    chronology::Chronology,
    fields::{DateTimeField, TemporalAccessor},
    timezone::ZoneId,
    FormatResult,
};

/// The raw field values, zone and chronology captured by a parse.
///
/// Field values are not validated or cross-checked against each other; a
/// value may lie outside its field's natural range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    fields: FxHashMap<DateTimeField, i64>,
    zone: Option<ZoneId>,
    chronology: Option<Chronology>,
}

impl Parsed {
    /// Creates an empty `Parsed`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this `Parsed` with `field` set to `value`.
    #[must_use]
    pub fn with_field(mut self, field: DateTimeField, value: i64) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Returns this `Parsed` with the given zone.
    #[must_use]
    pub fn with_zone(mut self, zone: ZoneId) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Returns this `Parsed` with the given chronology.
    #[must_use]
    pub fn with_chronology(mut self, chronology: Chronology) -> Self {
        self.chronology = Some(chronology);
        self
    }

    /// Returns the parsed value of `field`.
    pub fn get(&self, field: DateTimeField) -> Option<i64> {
        self.fields.get(&field).copied()
    }

    /// Returns the parsed zone.
    pub fn zone_id(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// Returns the parsed chronology.
    pub fn parsed_chronology(&self) -> Option<Chronology> {
        self.chronology
    }

    /// Returns the parsed fields, ordered by field.
    pub fn fields(&self) -> impl Iterator<Item = (DateTimeField, i64)> + '_ {
        let mut fields: alloc::vec::Vec<_> = self.fields.iter().map(|(f, v)| (*f, *v)).collect();
        fields.sort_unstable_by_key(|(f, _)| *f);
        fields.into_iter()
    }

    /// Checks every parsed field against its range in `chronology`.
    pub fn check_ranges(&self, chronology: Chronology) -> FormatResult<()> {
        for (field, value) in self.fields() {
            chronology.range(field).check_valid_value(value, field)?;
        }
        Ok(())
    }

    /// Returns the number of parsed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no field was parsed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stores `value`, returning the previous value if it differs.
    pub(crate) fn insert_field(&mut self, field: DateTimeField, value: i64) -> Option<i64> {
        self.fields.insert(field, value).filter(|old| *old != value)
    }

    pub(crate) fn set_zone(&mut self, zone: ZoneId) {
        self.zone = Some(zone);
    }

    pub(crate) fn set_chronology(&mut self, chronology: Chronology) {
        self.chronology = Some(chronology);
    }
}

impl TemporalAccessor for Parsed {
    fn field(&self, field: DateTimeField) -> Option<i64> {
        self.get(field)
    }

    fn zone(&self) -> Option<ZoneId> {
        self.zone.clone()
    }

    fn chronology(&self) -> Option<Chronology> {
        self.chronology
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("},")?;
        if let Some(chronology) = self.chronology {
            write!(f, "{chronology}")?;
        }
        f.write_str(",")?;
        if let Some(zone) = &self.zone {
            write!(f, "{zone}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Parsed;
    use crate::chronology::Chronology;
    use crate::fields::DateTimeField;
    use crate::timezone::ZoneId;
    use alloc::string::ToString;

    #[test]
    fn conflicting_insert() {
        let mut parsed = Parsed::new();
        assert_eq!(parsed.insert_field(DateTimeField::Year, 2011), None);
        assert_eq!(parsed.insert_field(DateTimeField::Year, 2011), None);
        assert_eq!(parsed.insert_field(DateTimeField::Year, 2012), Some(2011));
        assert_eq!(parsed.get(DateTimeField::Year), Some(2012));
    }

    #[test]
    fn ranges_follow_chronology() {
        let parsed = Parsed::new()
            .with_field(DateTimeField::Year, 999_999_000)
            .with_field(DateTimeField::MonthOfYear, 6);
        assert!(parsed.check_ranges(Chronology::ISO).is_ok());
        let err = parsed.check_ranges(Chronology::MINGUO).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid value for Year (valid values -1000001910 - 999998088): 999999000"
        );

        let month = Parsed::new().with_field(DateTimeField::MonthOfYear, 13);
        assert!(month.check_ranges(Chronology::ISO).is_err());
    }

    #[test]
    fn display() {
        let parsed = Parsed::new()
            .with_field(DateTimeField::MonthOfYear, 6)
            .with_field(DateTimeField::Year, 2011)
            .with_chronology(Chronology::ISO)
            .with_zone(ZoneId::region("Europe/Paris"));
        assert_eq!(
            parsed.to_string(),
            "{MonthOfYear=6, Year=2011},ISO,Europe/Paris"
        );
    }
}
