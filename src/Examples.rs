/// Examples of formula parsing, equation balancing and molar mass calculation.
/// Run them from the "Examples" item of the interactive menu or call
/// `balancing_examples(task)` with the number of the task.
pub mod balancing_examples;
