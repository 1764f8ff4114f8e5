use alloc::string::String;
use alloc::sync::Arc;

use writeable::{impl_display_with_writeable, Writeable};

use super::{
    context::{ParseContext, PrintContext},
    number::{NumberPrinterParser, MAX_WIDTH},
    printer_parser::ParseResult,
};
use crate::{
    fields::DateTimeField,
    options::{SignStyle, TextStyle},
    provider::TextProvider,
    FormatResult,
};

/// Prints and parses a field as localized text, falling back to a number.
#[derive(Debug, Clone)]
pub(crate) struct TextPrinterParser {
    field: DateTimeField,
    style: TextStyle,
    provider: Arc<dyn TextProvider>,
}

impl TextPrinterParser {
    pub(crate) fn new(field: DateTimeField, style: TextStyle, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            field,
            style,
            provider,
        }
    }

    fn number(&self) -> NumberPrinterParser {
        NumberPrinterParser::new(self.field, 1, MAX_WIDTH, SignStyle::Normal)
    }

    pub(crate) fn print(&self, context: &PrintContext<'_>, buf: &mut String) -> FormatResult<bool> {
        let Some(value) = context.value(self.field) else {
            return Ok(false);
        };
        match self
            .provider
            .text(self.field, value, self.style, context.locale())
        {
            Some(text) => {
                buf.push_str(text);
                Ok(true)
            }
            None => self.number().print(context, buf),
        }
    }

    pub(crate) fn parse(
        &self,
        context: &mut ParseContext<'_>,
        text: &str,
        position: usize,
    ) -> ParseResult {
        let style = context.is_strict().then_some(self.style);
        let entries = self
            .provider
            .text_entries(self.field, style, context.locale());
        if let Some(entries) = entries {
            let matched = entries.iter().find_map(|(candidate, value)| {
                context
                    .match_text(text, position, candidate)
                    .map(|end| (*value, end))
            });
            if let Some((value, end)) = matched {
                return context.set_parsed_field(self.field, value, position, end);
            }
            if context.is_strict() {
                return Err(position);
            }
        }
        self.number().parse(context, text, position)
    }
}

impl Writeable for TextPrinterParser {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.style == TextStyle::Full {
            return write!(sink, "Text({})", self.field);
        }
        write!(sink, "Text({},{})", self.field, self.style)
    }
}

impl_display_with_writeable!(TextPrinterParser);

#[cfg(test)]
mod tests {
    use super::TextPrinterParser;
    use crate::fields::DateTimeField;
    use crate::format::context::{FormatSettings, ParseContext, PrintContext};
    use crate::options::TextStyle;
    use crate::parsed::Parsed;
    use crate::provider::default_text_provider;
    use alloc::string::String;
    use icu_locale::locale;
    use writeable::assert_writeable_eq;

    #[test]
    fn month_text() {
        let settings = FormatSettings::new(locale!("en"));
        let month = DateTimeField::MonthOfYear;
        let node = TextPrinterParser::new(month, TextStyle::Short, default_text_provider());

        let accessor = Parsed::new().with_field(month, 1);
        let mut buf = String::new();
        assert_eq!(node.print(&PrintContext::new(&accessor, &settings), &mut buf), Ok(true));
        assert_eq!(buf, "Jan");

        let mut context = ParseContext::new(&settings);
        assert_eq!(node.parse(&mut context, "Jan", 0), Ok(3));
        assert_eq!(node.parse(&mut context, "JAN", 0), Err(0));
        context.set_case_sensitive(false);
        assert_eq!(node.parse(&mut context, "JAN", 0), Ok(3));
        assert_eq!(context.parsed_field(month), Some(1));
    }

    #[test]
    fn lenient_falls_back_to_number() {
        let settings = FormatSettings::new(locale!("en"));
        let month = DateTimeField::MonthOfYear;
        let node = TextPrinterParser::new(month, TextStyle::Short, default_text_provider());
        let mut context = ParseContext::new(&settings);
        assert_eq!(node.parse(&mut context, "12", 0), Err(0));
        context.set_strict(false);
        assert_eq!(node.parse(&mut context, "December", 0), Ok(8));
        assert_eq!(context.parsed_field(month), Some(12));

        let mut context = ParseContext::new(&settings);
        context.set_strict(false);
        assert_eq!(node.parse(&mut context, "11", 0), Ok(2));
        assert_eq!(context.parsed_field(month), Some(11));
    }

    #[test]
    fn text_without_provider_data() {
        let settings = FormatSettings::new(locale!("en"));
        let field = DateTimeField::DayOfMonth;
        let node = TextPrinterParser::new(field, TextStyle::Full, default_text_provider());
        let accessor = Parsed::new().with_field(field, 21);
        let mut buf = String::new();
        assert_eq!(node.print(&PrintContext::new(&accessor, &settings), &mut buf), Ok(true));
        assert_eq!(buf, "21");

        let mut context = ParseContext::new(&settings);
        assert_eq!(node.parse(&mut context, "21", 0), Ok(2));
        assert_writeable_eq!(node, "Text(DayOfMonth)");
    }
}
