//! Normalization of the NEIS `mealServiceDietInfo` XML document.
//!
//! Every `row` may add dishes to one meal slot and, independently, add to the
//! nutrient totals. Anything the parser cannot make sense of is skipped: a
//! malformed document yields an empty result, an unknown slot drops its dishes,
//! and a nutrient statement without a number leaves the totals untouched.

use std::sync::LazyLock;

use quick_xml::{Error as XmlError, Reader, events::Event};
use regex::Regex;
use sikdan_core::model::{MealCollection, MealSlot, Nutrient, NutrientTotals};
use tracing::{debug, warn};

/// Separator the upstream embeds inside dish and nutrient fields.
const LINE_BREAK: &str = "<br/>";

const ROW_TAG: &[u8] = b"row";

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("annotation pattern is valid"));

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("amount pattern is valid"));

#[derive(thiserror::Error, Debug)]
enum ReadError {
    #[error("malformed XML: {0}")]
    Xml(#[from] XmlError),
    #[error("document ended inside <{0}>")]
    Truncated(String),
}

/// Elements whose text the parser keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SlotName,
    DishNames,
    NutrientInfo,
    /// `RESULT/CODE`, outside any row.
    Code,
    Message,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"MMEAL_SC_NM" => Some(Self::SlotName),
            b"DDISH_NM" => Some(Self::DishNames),
            b"NTR_INFO" => Some(Self::NutrientInfo),
            b"CODE" => Some(Self::Code),
            b"MESSAGE" => Some(Self::Message),
            _ => None,
        }
    }
}

/// One meal slot on one day. Other upstream columns are ignored.
#[derive(Debug, Default)]
struct MealRow {
    slot_name: Option<String>,
    dish_names: Option<String>,
    nutrient_info: Option<String>,
}

/// Every `row` of the document, wherever it sits, plus the upstream result.
#[derive(Debug, Default)]
struct MealServiceDocument {
    rows: Vec<MealRow>,
    code: Option<String>,
    message: Option<String>,
}

impl MealServiceDocument {
    fn read(xml_text: &str) -> Result<Self, ReadError> {
        let mut reader = Reader::from_str(xml_text);
        let mut document = Self::default();
        let mut open = Vec::<String>::new();
        let mut row: Option<MealRow> = None;
        let mut field: Option<(Field, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let name = start.local_name();
                    let tag = name.as_ref();
                    if tag == ROW_TAG {
                        row = Some(MealRow::default());
                    } else if let Some(kind) = Field::from_tag(tag) {
                        field = Some((kind, String::new()));
                    }
                    open.push(String::from_utf8_lossy(tag).into_owned());
                }
                Event::Text(text) => {
                    if let Some((_, buffer)) = field.as_mut() {
                        buffer.push_str(&text.unescape().map_err(XmlError::from)?);
                    }
                }
                Event::CData(cdata) => {
                    if let Some((_, buffer)) = field.as_mut() {
                        buffer.push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Event::End(end) => {
                    open.pop();
                    let name = end.local_name();
                    let tag = name.as_ref();
                    if tag == ROW_TAG {
                        document.rows.extend(row.take());
                    } else if let Some((kind, text)) =
                        field.take_if(|(kind, _)| Field::from_tag(tag) == Some(*kind))
                    {
                        document.store(row.as_mut(), kind, text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match open.pop() {
            Some(tag) => Err(ReadError::Truncated(tag)),
            None => Ok(document),
        }
    }

    fn store(&mut self, row: Option<&mut MealRow>, kind: Field, text: String) {
        match (kind, row) {
            (Field::SlotName, Some(row)) => row.slot_name = Some(text),
            (Field::DishNames, Some(row)) => row.dish_names = Some(text),
            (Field::NutrientInfo, Some(row)) => row.nutrient_info = Some(text),
            (Field::Code, None) => self.code = Some(text),
            (Field::Message, None) => self.message = Some(text),
            // row columns outside a row, or result fields inside one
            _ => {}
        }
    }
}

/// Parse a meal service document into dishes per slot and nutrient totals.
#[must_use]
pub fn parse(xml_text: &str) -> (MealCollection, NutrientTotals) {
    let document = match MealServiceDocument::read(xml_text) {
        Ok(document) => document,
        Err(err) => {
            warn!(%err, "discarding malformed meal service document");
            MealServiceDocument::default()
        }
    };

    if let Some(code) = document.code.as_deref() {
        let message = document.message.as_deref().unwrap_or_default();
        debug!(code, message, rows = document.rows.len(), "meal service result");
    }

    let mut meals = MealCollection::default();
    let mut nutrients = NutrientTotals::default();

    for row in &document.rows {
        if let Some(raw) = non_empty(row.dish_names.as_deref()) {
            match row.slot_name.as_deref().and_then(MealSlot::from_upstream) {
                Some(slot) => meals.extend(slot, clean_dishes(raw)),
                None => debug!(slot = ?row.slot_name, "dropping dishes of unknown meal slot"),
            }
        }

        if let Some(info) = non_empty(row.nutrient_info.as_deref()) {
            add_nutrients(info, &mut nutrients);
        }
    }

    (meals, nutrients)
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|text| !text.is_empty())
}

/// Split a dish field into names, dropping parenthesized allergy notes.
fn clean_dishes(raw: &str) -> Vec<String> {
    let lines = raw.replace(LINE_BREAK, "\n");
    ANNOTATION
        .replace_all(&lines, "")
        .split('\n')
        .map(str::trim)
        .filter(|dish| !dish.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Add every recognized statement of a nutrient field to the totals.
///
/// A statement is checked against each marker; every marker it contains
/// receives the first number found in the statement.
fn add_nutrients(info: &str, totals: &mut NutrientTotals) {
    for statement in info.split(LINE_BREAK) {
        for nutrient in Nutrient::ALL {
            if !statement.contains(nutrient.marker()) {
                continue;
            }
            if let Some(grams) = first_amount(statement) {
                totals.add(nutrient, grams);
            }
        }
    }
}

fn first_amount(statement: &str) -> Option<f64> {
    AMOUNT.find(statement)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;

    use super::*;

    fn document(rows: &[(&str, &str, &str)]) -> String {
        let rows = rows
            .iter()
            .map(|(slot, dishes, nutrients)| {
                format!(
                    "<row><MMEAL_SC_NM>{slot}</MMEAL_SC_NM>\
                     <DDISH_NM><![CDATA[{dishes}]]></DDISH_NM>\
                     <CAL_INFO>812.3 Kcal</CAL_INFO>\
                     <NTR_INFO><![CDATA[{nutrients}]]></NTR_INFO></row>"
                )
            })
            .collect::<String>();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <mealServiceDietInfo><head><list_total_count>1</list_total_count>\
             <RESULT><CODE>INFO-000</CODE><MESSAGE>정상 처리되었습니다.</MESSAGE></RESULT>\
             </head>{rows}</mealServiceDietInfo>"
        )
    }

    #[test]
    fn strips_annotations_and_line_breaks() {
        let xml = document(&[("중식", "김치(신)<br/>밥", "")]);

        let (meals, _) = parse(&xml);

        assert_eq!(meals.dishes(MealSlot::Lunch), ["김치", "밥"]);
        assert!(meals.dishes(MealSlot::Breakfast).is_empty());
        assert!(meals.dishes(MealSlot::Dinner).is_empty());
    }

    #[test]
    fn accepts_escaped_line_breaks() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_NM>석식</MMEAL_SC_NM>\
                   <DDISH_NM>카레라이스 (1.2.5)&lt;br/&gt;깍두기 (9.)</DDISH_NM></row>\
                   </mealServiceDietInfo>";

        let (meals, _) = parse(xml);

        assert_eq!(meals.dishes(MealSlot::Dinner), ["카레라이스", "깍두기"]);
    }

    #[test]
    fn keeps_row_order_and_duplicates_per_slot() {
        let xml = document(&[
            ("조식", "토스트<br/>우유", ""),
            ("중식", "밥<br/>미역국", ""),
            ("조식", "우유", ""),
        ]);

        let (meals, _) = parse(&xml);

        assert_eq!(meals.dishes(MealSlot::Breakfast), ["토스트", "우유", "우유"]);
        assert_eq!(meals.dishes(MealSlot::Lunch), ["밥", "미역국"]);
    }

    #[test]
    fn drops_dishes_of_unknown_slot() {
        let xml = document(&[("간식", "떡볶이", ""), ("중식", "밥", "")]);

        let (meals, _) = parse(&xml);

        assert!(meals.dishes(MealSlot::Breakfast).is_empty());
        assert_eq!(meals.dishes(MealSlot::Lunch), ["밥"]);
        assert!(meals.dishes(MealSlot::Dinner).is_empty());
    }

    #[test]
    fn unknown_slot_still_counts_nutrients() {
        let xml = document(&[("간식", "떡볶이", "탄수화물(g) : 30.0")]);

        let (meals, nutrients) = parse(&xml);

        assert!(meals.is_empty(), "snack dishes are not shown");
        assert_float_absolute_eq!(nutrients.carbohydrate, 30.0);
    }

    #[test]
    fn empty_dish_field_contributes_nothing() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_NM>중식</MMEAL_SC_NM>\
                   <DDISH_NM></DDISH_NM></row>\
                   <row><MMEAL_SC_NM>조식</MMEAL_SC_NM></row>\
                   <row><MMEAL_SC_NM>석식</MMEAL_SC_NM><DDISH_NM>밥</DDISH_NM></row>\
                   </mealServiceDietInfo>";

        let (meals, nutrients) = parse(xml);

        assert!(meals.dishes(MealSlot::Breakfast).is_empty());
        assert!(meals.dishes(MealSlot::Lunch).is_empty());
        assert_eq!(meals.dishes(MealSlot::Dinner), ["밥"], "sibling row still parsed");
        assert_eq!(nutrients, NutrientTotals::default());
    }

    #[test]
    fn rows_separated_by_other_elements_are_all_read() {
        let xml = "<mealServiceDietInfo>\
                   <row><MMEAL_SC_NM>중식</MMEAL_SC_NM><DDISH_NM>밥</DDISH_NM></row>\
                   <other/><list_total_count>2</list_total_count>\
                   <row><MMEAL_SC_NM>석식</MMEAL_SC_NM><DDISH_NM>국수</DDISH_NM></row>\
                   </mealServiceDietInfo>";

        let (meals, _) = parse(xml);

        assert_eq!(meals.dishes(MealSlot::Lunch), ["밥"]);
        assert_eq!(meals.dishes(MealSlot::Dinner), ["국수"]);
    }

    #[test]
    fn nested_rows_are_read() {
        let xml = "<mealServiceDietInfo><head><RESULT><CODE>INFO-000</CODE></RESULT></head>\
                   <rows><row><MMEAL_SC_NM>조식</MMEAL_SC_NM><DDISH_NM>죽</DDISH_NM>\
                   <NTR_INFO>지방(g) : 3.5</NTR_INFO></row></rows>\
                   </mealServiceDietInfo>";

        let (meals, nutrients) = parse(xml);

        assert_eq!(meals.dishes(MealSlot::Breakfast), ["죽"]);
        assert_float_absolute_eq!(nutrients.fat, 3.5);
    }

    #[test]
    fn row_fields_outside_a_row_are_ignored() {
        let xml = "<mealServiceDietInfo><MMEAL_SC_NM>중식</MMEAL_SC_NM>\
                   <DDISH_NM>밥</DDISH_NM><NTR_INFO>탄수화물(g) : 9</NTR_INFO>\
                   </mealServiceDietInfo>";

        let (meals, nutrients) = parse(xml);

        assert!(meals.is_empty(), "dishes need an enclosing row");
        assert_eq!(nutrients, NutrientTotals::default());
    }

    #[test]
    fn sums_marked_nutrient_statements() {
        let xml = document(&[("중식", "밥", "탄수화물(g) : 55.5 <br/>단백질(g) : 20")]);

        let (_, nutrients) = parse(&xml);

        assert_float_absolute_eq!(nutrients.carbohydrate, 55.5);
        assert_float_absolute_eq!(nutrients.protein, 20.0);
        assert_float_absolute_eq!(nutrients.fat, 0.0);
    }

    #[test]
    fn one_statement_can_feed_several_nutrients() {
        let xml = document(&[("중식", "밥", "탄수화물 단백질 5")]);

        let (_, nutrients) = parse(&xml);

        assert_float_absolute_eq!(nutrients.carbohydrate, 5.0);
        assert_float_absolute_eq!(nutrients.protein, 5.0);
        assert_float_absolute_eq!(nutrients.fat, 0.0);
    }

    #[test]
    fn nutrients_add_up_across_rows() {
        let xml = document(&[
            ("조식", "밥", "탄수화물(g) : 10"),
            ("중식", "밥", "탄수화물(g) : 10"),
        ]);

        let (_, nutrients) = parse(&xml);

        assert_float_absolute_eq!(nutrients.carbohydrate, 20.0);
    }

    #[test]
    fn ignores_unmarked_and_numberless_statements() {
        let xml = document(&[(
            "중식",
            "밥",
            "탄수화물(g) : 정보없음<br/>비타민A(R.E) : 120.5<br/>지방(g) : 12.",
        )]);

        let (_, nutrients) = parse(&xml);

        assert_float_absolute_eq!(nutrients.carbohydrate, 0.0);
        assert_float_absolute_eq!(nutrients.protein, 0.0);
        assert_float_absolute_eq!(nutrients.fat, 12.0);
    }

    #[test]
    fn full_nutrient_block() {
        let info = "탄수화물(g) : 120.3<br/>단백질(g) : 35.1<br/>지방(g) : 22.8<br/>\
                    비타민A(R.E) : 210.4<br/>티아민(mg) : 0.6<br/>리보플라빈(mg) : 0.7<br/>\
                    비타민C(mg) : 18.2<br/>칼슘(mg) : 301.5<br/>철분(mg) : 4.3";
        let xml = document(&[("중식", "밥", info), ("석식", "밥", info)]);

        let (_, nutrients) = parse(&xml);

        assert_float_absolute_eq!(nutrients.carbohydrate, 240.6);
        assert_float_absolute_eq!(nutrients.protein, 70.2);
        assert_float_absolute_eq!(nutrients.fat, 45.6);
    }

    #[test]
    fn no_data_result_is_empty() {
        let xml = "<RESULT><CODE>INFO-200</CODE>\
                   <MESSAGE>해당하는 데이터가 없습니다.</MESSAGE></RESULT>";

        let (meals, nutrients) = parse(xml);

        assert!(meals.is_empty(), "no rows in a bare result");
        assert_eq!(nutrients, NutrientTotals::default());
    }

    #[test]
    fn malformed_document_is_empty() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_NM>중식</MMEAL_SC_NM><DDISH_NM>밥";

        let (meals, nutrients) = parse(xml);

        assert!(meals.is_empty(), "truncated document yields nothing");
        assert_eq!(nutrients, NutrientTotals::default());
    }

    #[test]
    fn mismatched_end_tag_is_empty() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_NM>중식</MMEAL_SC_NM>\
                   <DDISH_NM>밥</DDISH_NM></rows></mealServiceDietInfo>";

        let (meals, nutrients) = parse(xml);

        assert!(meals.is_empty(), "broken document yields nothing");
        assert_eq!(nutrients, NutrientTotals::default());
    }
}
