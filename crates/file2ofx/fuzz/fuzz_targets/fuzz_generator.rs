//! Fuzz target for statement generation from arbitrary cell values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use file2ofx::{StatementConfig, StatementGenerator, Transaction};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Split into cells on a control byte so every field is fuzzed.
    let cells: Vec<&str> = text.split('\u{1}').collect();
    let transactions: Vec<Transaction> = cells
        .chunks(4)
        .map(|chunk| {
            let cell = |i: usize| chunk.get(i).copied().unwrap_or("");
            Transaction::new(cell(0), cell(1), cell(2)).with_type(cell(3))
        })
        .collect();

    let _ = StatementGenerator::new().render(&transactions, &StatementConfig::default());
});
