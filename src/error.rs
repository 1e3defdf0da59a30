use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Netlist Parsing Error (line {line}): {msg}")]
    Parse { line: usize, msg: String },

    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Invalid Genotype: {0}")]
    InvalidGenotype(String),

    #[error("Genotype not in cost cache: {0}")]
    NotCached(String),

    #[error("Population is empty")]
    EmptyPopulation,

    #[error("Engine State Error: {0}")]
    EngineState(String),
}

pub type CfResult<T> = Result<T, CellForgeError>;
