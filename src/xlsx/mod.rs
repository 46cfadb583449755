pub mod writer;

pub use writer::write_evaluation_to_xlsx;
