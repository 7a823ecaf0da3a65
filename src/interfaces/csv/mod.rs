pub mod outcome_writer;
pub mod scenario_reader;
