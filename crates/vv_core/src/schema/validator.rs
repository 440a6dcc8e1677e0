use serde::de::DeserializeOwned;
use serde_json::Value;

use super::OutputContract;
use crate::error::AppError;
use crate::repair::{parse_freeform_json, parse_native_json};

/// How the model answer arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRegime {
    /// The model enforced the response schema itself; the text is the JSON value.
    Native,
    /// Free text expected to contain one JSON object, possibly wrapped in prose.
    Freeform,
}

impl OutputRegime {
    pub fn decode(&self, raw: &str) -> Result<Value, AppError> {
        match self {
            OutputRegime::Native => parse_native_json(raw),
            OutputRegime::Freeform => parse_freeform_json(raw),
        }
    }
}

/// Turns raw model text into a typed result, or a terminal parse/contract error.
#[derive(Debug, Clone, Copy)]
pub struct ContractValidator {
    pub contract: &'static OutputContract,
    pub regime: OutputRegime,
}

impl ContractValidator {
    pub fn new(contract: &'static OutputContract, regime: OutputRegime) -> Self {
        Self { contract, regime }
    }

    pub fn parse<T: DeserializeOwned>(&self, raw: &str) -> Result<T, AppError> {
        let value = self.regime.decode(raw)?;
        self.contract.validate(&value)?;
        // Cross-field rules (e.g. transcript/analysis pairing) live in the typed model.
        serde_json::from_value(value).map_err(|e| {
            AppError::new(
                "MODEL_OUTPUT_CONTRACT_VIOLATION",
                format!("Model output does not match the {} contract", self.contract.name),
            )
            .with_details(e.to_string())
        })
    }
}
