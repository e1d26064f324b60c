#![allow(dead_code)]

use serde_json::{json, Value};
use sheetcheck::{
    has_equal_pivot, CompareOptions, FirstFailureReporter, Outcome, SpreadsheetDocument, State,
};

/// An edit applied to a copy of the solution to produce a student submission.
#[derive(Clone, Debug)]
pub enum Edit<'a> {
    /// Replace (or insert) the value at a JSON pointer.
    Set(&'a str, Value),
    /// Remove the object key or array element at a JSON pointer.
    Delete(&'a str),
    /// Push onto the array at a JSON pointer.
    Append(&'a str, Value),
}

pub fn apply(doc: &Value, edits: &[Edit<'_>]) -> Value {
    let mut doc = doc.clone();
    for edit in edits {
        match edit {
            Edit::Set(pointer, value) => {
                let (parent, key) = split_pointer(pointer);
                match doc.pointer_mut(parent).expect("parent exists") {
                    Value::Object(map) => {
                        map.insert(key.to_string(), value.clone());
                    }
                    Value::Array(items) => {
                        items[key.parse::<usize>().expect("array index")] = value.clone();
                    }
                    other => panic!("cannot set {pointer} inside {other}"),
                }
            }
            Edit::Delete(pointer) => {
                let (parent, key) = split_pointer(pointer);
                match doc.pointer_mut(parent).expect("parent exists") {
                    Value::Object(map) => {
                        map.remove(key).expect("key exists");
                    }
                    Value::Array(items) => {
                        items.remove(key.parse::<usize>().expect("array index"));
                    }
                    other => panic!("cannot delete {pointer} inside {other}"),
                }
            }
            Edit::Append(pointer, value) => {
                doc.pointer_mut(pointer)
                    .and_then(Value::as_array_mut)
                    .expect("array exists")
                    .push(value.clone());
            }
        }
    }
    doc
}

fn split_pointer(pointer: &str) -> (&str, &str) {
    pointer.rsplit_once('/').expect("pointer has a parent")
}

pub fn document(value: &Value) -> SpreadsheetDocument {
    serde_json::from_value(value.clone()).expect("valid document")
}

/// Run `has_equal_pivot` on `range`, returning the reported message on failure.
pub fn check_pivot(
    student: &Value,
    solution: &Value,
    range: &str,
    options: &CompareOptions,
) -> Option<String> {
    let student = document(student);
    let solution = document(solution);
    let reporter = FirstFailureReporter::new();
    let state = State::new(&student, &solution, range, &reporter);
    let outcome = has_equal_pivot(&state, options).expect("check runs");
    assert_eq!(
        outcome == Outcome::Failed,
        reporter.has_failed(),
        "outcome and reporter disagree"
    );
    reporter.into_failure()
}

pub fn solution_with(pivot: Value) -> Value {
    json!({
        "values": [[1, 1, 1], [1, 52, 8]],
        "formulas": [["=0+1", 1, 1], ["=1+0", "=52", 8]],
        "pivotTables": [[pivot]],
    })
}

fn months() -> Value {
    json!([
        "01-Jan", "02-Feb", "03-Mar", "04-Apr", "05-May", "06-Jun", "07-Jul", "08-Aug", "09-Sep",
        "10-Oct"
    ])
}

pub fn main_pivot() -> Value {
    json!({
        "source": {"startRowIndex": 0, "endRowIndex": 613, "startColumnIndex": 0, "endColumnIndex": 5},
        "rows": [{"showTotals": true, "sortOrder": "ASCENDING"}],
        "columns": [{"sourceColumnOffset": 2, "showTotals": true, "sortOrder": "ASCENDING"}],
        "values": [{
            "sourceColumnOffset": 4,
            "summarizeFunction": "SUM",
            "calculatedDisplayType": "PERCENT_OF_ROW_TOTAL"
        }],
        "criteria": {"0": {"visibleValues": months()}}
    })
}

pub fn two_values_pivot() -> Value {
    json!({
        "source": {"startRowIndex": 0, "endRowIndex": 613, "startColumnIndex": 0, "endColumnIndex": 5},
        "rows": [],
        "values": [
            {"sourceColumnOffset": 3, "summarizeFunction": "MAX"},
            {"sourceColumnOffset": 4, "summarizeFunction": "MAX"}
        ],
        "criteria": {"0": {"visibleValues": months()}}
    })
}

pub fn criteria_pivot() -> Value {
    json!({
        "source": {
            "sheetId": 1099865763,
            "startRowIndex": 0, "endRowIndex": 613, "startColumnIndex": 0, "endColumnIndex": 5
        },
        "rows": [{"sourceColumnOffset": 2, "showTotals": true, "sortOrder": "ASCENDING"}],
        "criteria": {"2": {"visibleValues": [
            "Los Angeles, California",
            "Riverside, California",
            "Sacramento, California",
            "San Diego, California",
            "San Francisco, California",
            "San Jose, California"
        ]}},
        "values": [{"sourceColumnOffset": 4, "summarizeFunction": "SUM"}]
    })
}

pub fn calculated_field_pivot() -> Value {
    json!({
        "source": {
            "sheetId": 1099865763,
            "startRowIndex": 0, "endRowIndex": 613, "startColumnIndex": 0, "endColumnIndex": 5
        },
        "rows": [{"sourceColumnOffset": 2, "showTotals": true, "sortOrder": "ASCENDING"}],
        "values": [{
            "formula": "= Inches / Days",
            "summarizeFunction": "CUSTOM",
            "name": "Calculated Field 1"
        }]
    })
}
