#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetcheck_model::{crop, resolve_range};

/// Range strings in exercises are short; longer inputs only slow the harness down.
const MAX_INPUT_BYTES: usize = 256;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(MAX_INPUT_BYTES)];
    let input = String::from_utf8_lossy(data);

    let Ok(range) = resolve_range(&input) else {
        return;
    };
    assert!(range.start_row < range.end_row);
    assert!(range.start_col < range.end_col);

    // The label of a resolved range resolves to the same range.
    let label = range.to_string();
    assert_eq!(resolve_range(&label), Ok(range));

    let grid = vec![vec![0u8; 4]; 4];
    let cropped = crop(&grid, &input).expect("resolved range crops");
    assert!(cropped.len() <= grid.len());
});
