mod automata_tests;
mod formula_tests;
mod generator_tests;
mod pipeline_tests;
