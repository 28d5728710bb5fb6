use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Input contains no records")]
    EmptyInput,

    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    #[error("Invalid forecast horizon {0}: must be between 1 and 12 months")]
    InvalidForecastHorizon(u32),

    #[error("Invalid scenario adjustment {0}%: must be between -50 and 50")]
    InvalidAdjustment(f64),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
