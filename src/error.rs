use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Invalid year '{value}' in {table} table, row {row}")]
    InvalidYear {
        table: &'static str,
        row: usize,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl RecordsError {
    /// Whether this error means the input tables were not in the expected shape
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            RecordsError::MissingColumn { .. } | RecordsError::InvalidYear { .. } | RecordsError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
