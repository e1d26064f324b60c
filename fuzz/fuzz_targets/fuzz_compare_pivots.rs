#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetcheck::feedback::render_pivot_issue;
use sheetcheck::{compare_pivots, CompareOptions, ValueCountMode};
use sheetcheck_model::pivots::PivotTable;

const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    // Input is a JSON array of two pivot tables: `[solution, student]`.
    let Ok((solution, student)) = serde_json::from_slice::<(PivotTable, PivotTable)>(data) else {
        return;
    };

    for value_count_mode in [ValueCountMode::Exact, ValueCountMode::Summary] {
        let options = CompareOptions { value_count_mode };
        assert_eq!(compare_pivots(&solution, &solution, &options), None);
        if let Some(issue) = compare_pivots(&solution, &student, &options) {
            let message = render_pivot_issue(&issue, "A1");
            assert!(message.starts_with("1 issue with the pivot table in range `A1`: "));
        }
    }
});
