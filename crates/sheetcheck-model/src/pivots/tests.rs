use super::*;

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn pivot_table_decodes_api_payload() {
    let pivot: PivotTable = serde_json::from_value(json!({
        "source": {
            "sheetId": 1099865763,
            "startRowIndex": 0,
            "endRowIndex": 613,
            "startColumnIndex": 0,
            "endColumnIndex": 5
        },
        "rows": [{"sourceColumnOffset": 2, "showTotals": true, "sortOrder": "ASCENDING"}],
        "criteria": {"2": {"visibleValues": ["Riverside, California", "San Jose, California"]}},
        "values": [{"sourceColumnOffset": 4, "summarizeFunction": "SUM"}]
    }))
    .unwrap();

    assert_eq!(pivot.source.sheet_id, Some(1099865763));
    assert_eq!(pivot.source.end_row_index, 613);
    assert_eq!(pivot.rows, vec![GroupingField::new(2)]);
    assert!(pivot.columns.is_empty());
    assert_eq!(
        pivot.values,
        vec![ValueField::summarize(4, SummarizeFunction::Sum)]
    );
    assert_eq!(pivot.criteria["2"].visible_values.len(), 2);
}

#[test]
fn missing_collections_and_bounds_default_to_empty() {
    let pivot: PivotTable = serde_json::from_value(json!({})).unwrap();
    assert_eq!(pivot, PivotTable::default());
    assert_eq!(pivot.source.start_row_index, 0);
    assert!(pivot.criteria.is_empty());
}

#[test]
fn grouping_field_defaults() {
    let field: GroupingField =
        serde_json::from_value(json!({"sortOrder": "DESCENDING"})).unwrap();
    assert_eq!(field.source_column_offset, 0);
    assert!(!field.show_totals);
    assert_eq!(field.sort_order, SortOrder::Descending);

    let field: GroupingField = serde_json::from_value(json!({})).unwrap();
    assert_eq!(field.sort_order, SortOrder::Unspecified);
}

#[test]
fn absent_offset_equals_explicit_zero() {
    let absent: GroupingField =
        serde_json::from_value(json!({"showTotals": true, "sortOrder": "ASCENDING"})).unwrap();
    let zero: GroupingField = serde_json::from_value(
        json!({"sourceColumnOffset": 0, "showTotals": true, "sortOrder": "ASCENDING"}),
    )
    .unwrap();
    assert_eq!(absent, zero);

    let value: ValueField = serde_json::from_value(json!({"summarizeFunction": "SUM"})).unwrap();
    assert_eq!(value, ValueField::summarize(0, SummarizeFunction::Sum));
}

#[test]
fn grouping_for_offset_finds_an_omitted_zero_offset() {
    let pivot: PivotTable = serde_json::from_value(json!({
        "rows": [{"sortOrder": "ASCENDING"}],
        "columns": [{"sourceColumnOffset": 2}]
    }))
    .unwrap();
    assert_eq!(pivot.grouping_for_offset(0), Some((PivotAxis::Rows, 0)));
    assert_eq!(pivot.grouping_for_offset(2), Some((PivotAxis::Columns, 0)));
    assert_eq!(pivot.grouping_for_offset(1), None);
}

#[test]
fn grouping_label_is_accepted_as_name() {
    let field: GroupingField =
        serde_json::from_value(json!({"sourceColumnOffset": 1, "label": "Month"})).unwrap();
    assert_eq!(field.name.as_deref(), Some("Month"));
}

#[test]
fn absent_display_type_equals_explicit_default() {
    let absent: ValueField =
        serde_json::from_value(json!({"sourceColumnOffset": 4, "summarizeFunction": "SUM"}))
            .unwrap();
    let explicit: ValueField = serde_json::from_value(json!({
        "sourceColumnOffset": 4,
        "summarizeFunction": "SUM",
        "calculatedDisplayType": "PIVOT_VALUE_CALCULATED_DISPLAY_TYPE_UNSPECIFIED"
    }))
    .unwrap();
    let percent: ValueField = serde_json::from_value(json!({
        "sourceColumnOffset": 4,
        "summarizeFunction": "SUM",
        "calculatedDisplayType": "PERCENT_OF_ROW_TOTAL"
    }))
    .unwrap();

    assert_eq!(absent.calculated_display_type, explicit.calculated_display_type);
    assert_ne!(absent.calculated_display_type, percent.calculated_display_type);

    // The default is not written back out.
    let encoded = serde_json::to_value(&explicit).unwrap();
    assert!(encoded.get("calculatedDisplayType").is_none());
}

#[test]
fn calculated_field_decodes() {
    let value: ValueField = serde_json::from_value(json!({
        "formula": "= Inches / Days",
        "summarizeFunction": "CUSTOM",
        "name": "Calculated Field 1"
    }))
    .unwrap();
    assert!(value.is_calculated());
    assert_eq!(
        value,
        ValueField::calculated("Calculated Field 1", "= Inches / Days")
    );
}

#[test]
fn summarize_function_spellings() {
    for (raw, expected) in [
        ("COUNTA", SummarizeFunction::CountA),
        ("COUNTUNIQUE", SummarizeFunction::CountUnique),
        ("STDEVP", SummarizeFunction::StdDevP),
        ("NONE", SummarizeFunction::None),
    ] {
        let decoded: SummarizeFunction = serde_json::from_value(json!(raw)).unwrap();
        assert_eq!(decoded, expected);
        assert_eq!(decoded.to_string(), raw);
    }
}

#[test]
fn visible_values_compare_as_sets() {
    let a = FilterCriteria {
        visible_values: vec!["01-Jan".into(), "02-Feb".into()],
    };
    let reordered = FilterCriteria {
        visible_values: vec!["02-Feb".into(), "01-Jan".into(), "01-Jan".into()],
    };
    let fewer = FilterCriteria {
        visible_values: vec!["01-Jan".into()],
    };
    assert!(a.same_visible_values(&reordered));
    assert!(!a.same_visible_values(&fewer));
}

#[test]
fn grouping_lookup_prefers_rows() {
    let pivot = PivotTable {
        rows: vec![GroupingField::new(3)],
        columns: vec![GroupingField::new(1), GroupingField::new(3)],
        ..PivotTable::default()
    };
    assert_eq!(pivot.grouping_for_offset(3), Some((PivotAxis::Rows, 0)));
    assert_eq!(pivot.grouping_for_offset(1), Some((PivotAxis::Columns, 0)));
    assert_eq!(pivot.grouping_for_offset(7), None);
}

#[test]
fn source_bounds_ignore_sheet_id() {
    let a = PivotSource {
        sheet_id: Some(1),
        end_row_index: 10,
        ..PivotSource::default()
    };
    let b = PivotSource {
        sheet_id: None,
        ..a
    };
    assert!(a.same_bounds(&b));
    assert!(!a.same_bounds(&PivotSource::default()));
}

#[test]
fn criteria_keys_parse_as_offsets() {
    assert_eq!(criteria_offset("2"), Some(2));
    assert_eq!(criteria_offset(" 10 "), Some(10));
    assert_eq!(criteria_offset("x"), None);
}
