use std::io::Read;

use xml::reader::{EventReader, ParserConfig, XmlEvent};

const FX: &str = "fx";
const CURRENCY_CODE: &str = "currency_code";
const RATE: &str = "rate";

/// One dated rate document, e.g.
/// `<data><fx><currency_code>USD</currency_code><rate>1.0950</rate></fx></data>`.
///
/// Every `fx` element is a record, at any depth and in start-tag order; the
/// wrapper elements around them are not checked.
#[derive(Debug, Default)]
pub struct FxDocument {
    pub records: Vec<FxRecord>,
}

/// Raw text of the first `currency_code` and `rate` below an `fx` element.
/// `None` when that child is missing or does not start with a text node.
/// Text is kept exactly as written, whitespace included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FxRecord {
    pub currency_code: Option<String>,
    pub rate: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Code,
    Rate,
}

struct OpenFx {
    index: usize,
    code_seen: bool,
    rate_seen: bool,
}

impl OpenFx {
    fn seen(&mut self, field: Field) -> &mut bool {
        match field {
            Field::Code => &mut self.code_seen,
            Field::Rate => &mut self.rate_seen,
        }
    }
}

/// A `currency_code`/`rate` element being read; only its first child counts.
struct Capture {
    field: Field,
    depth: usize,
    first_child: Option<Option<String>>,
}

impl FxDocument {
    pub fn from_reader<R: Read>(source: R) -> Result<Self, xml::reader::Error> {
        let config = ParserConfig::new()
            .trim_whitespace(false)
            .whitespace_to_characters(true)
            .cdata_to_characters(true)
            .coalesce_characters(true)
            .ignore_comments(true);

        let mut records: Vec<FxRecord> = Vec::new();
        let mut open: Vec<OpenFx> = Vec::new();
        let mut capture: Option<Capture> = None;
        let mut depth = 0usize;

        for event in EventReader::new_with_config(source, config) {
            match event? {
                XmlEvent::StartElement { name, .. } => {
                    if let Some(cap) = capture.as_mut() {
                        if depth == cap.depth && cap.first_child.is_none() {
                            cap.first_child = Some(None);
                        }
                    } else if name.prefix.is_none() {
                        let field = match name.local_name.as_str() {
                            CURRENCY_CODE => Some(Field::Code),
                            RATE => Some(Field::Rate),
                            _ => None,
                        };
                        if let Some(field) = field {
                            if open.iter_mut().any(|fx| !*fx.seen(field)) {
                                capture = Some(Capture { field, depth: depth + 1, first_child: None });
                            }
                        }
                    }

                    if name.prefix.is_none() && name.local_name == FX {
                        open.push(OpenFx { index: records.len(), code_seen: false, rate_seen: false });
                        records.push(FxRecord::default());
                    }
                    depth += 1;
                }
                XmlEvent::Characters(text) => {
                    if let Some(cap) = capture.as_mut() {
                        if depth == cap.depth && cap.first_child.is_none() {
                            cap.first_child = Some(Some(text));
                        }
                    }
                }
                XmlEvent::EndElement { name } => {
                    if capture.as_ref().is_some_and(|cap| cap.depth == depth) {
                        if let Some(cap) = capture.take() {
                            let text = cap.first_child.flatten();
                            for fx in open.iter_mut() {
                                let seen = fx.seen(cap.field);
                                if *seen {
                                    continue;
                                }
                                *seen = true;
                                let record = &mut records[fx.index];
                                match cap.field {
                                    Field::Code => record.currency_code = text.clone(),
                                    Field::Rate => record.rate = text.clone(),
                                }
                            }
                        }
                    }
                    if name.prefix.is_none() && name.local_name == FX {
                        open.pop();
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }

        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(xml: &str) -> Vec<FxRecord> {
        FxDocument::from_reader(xml.as_bytes()).expect("parse").records
    }

    fn rec(code: Option<&str>, rate: Option<&str>) -> FxRecord {
        FxRecord { currency_code: code.map(String::from), rate: rate.map(String::from) }
    }

    #[test]
    fn reads_records_at_any_depth_in_order() {
        let got = records(
            "<xavierresponse><exchange_rates>\
               <basecurrency>EUR</basecurrency>\
               <fx><currency_code>USD</currency_code><rate>1.0950</rate></fx>\
               <group><fx><currency_code>GBP</currency_code><rate>0.8420</rate></fx></group>\
             </exchange_rates></xavierresponse>",
        );
        assert_eq!(got, vec![rec(Some("USD"), Some("1.0950")), rec(Some("GBP"), Some("0.8420"))]);
    }

    #[test]
    fn keeps_text_untrimmed() {
        let got = records("<data><fx><currency_code> USD </currency_code><rate>\n 1.5 </rate></fx></data>");
        assert_eq!(got, vec![rec(Some(" USD "), Some("\n 1.5 "))]);
    }

    #[test]
    fn first_child_element_or_empty_gives_no_text() {
        let got = records(
            "<data>\
               <fx><currency_code><b>USD</b></currency_code><rate/></fx>\
               <fx><rate>2.0</rate></fx>\
             </data>",
        );
        assert_eq!(got, vec![rec(None, None), rec(None, Some("2.0"))]);
    }

    #[test]
    fn only_the_first_child_of_each_kind_counts() {
        let got = records(
            "<data><fx>\
               <currency_code>USD</currency_code><currency_code>GBP</currency_code>\
               <rate>1.1</rate><rate>9.9</rate>\
             </fx></data>",
        );
        assert_eq!(got, vec![rec(Some("USD"), Some("1.1"))]);
    }

    #[test]
    fn nested_fx_shares_its_first_children_with_the_outer_one() {
        let got = records(
            "<data><fx>\
               <fx><currency_code>USD</currency_code><rate>1.1</rate></fx>\
               <currency_code>GBP</currency_code>\
             </fx></data>",
        );
        assert_eq!(got, vec![rec(Some("USD"), Some("1.1")), rec(Some("USD"), Some("1.1"))]);
    }
}
