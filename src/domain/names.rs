// Copyright (c) 2025 - Cowboy AI, Inc.
//! Case-insensitive name and value comparison

/// Fold case one character at a time
///
/// Unlike `str::to_lowercase` the result of each character does not depend
/// on its neighbours, so `"ΑΣ"` and `"ασ"` fold to the same string. Final
/// sigma folds to `σ` as in Unicode simple case folding.
pub fn fold_case(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}

/// Trimmed, case-folded form of an inventory object name
pub fn normalize_name(name: &str) -> String {
    fold_case(name.trim())
}
