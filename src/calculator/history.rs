//! Calculation history port
//!
//! The engines know nothing about storage. Callers hand a [`HistoryStore`]
//! the calculator type, raw inputs, outputs and summary; the store keys the
//! record by an opaque user id.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CalculationOutput, CalculationRequest, CalculatorType};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot save a calculation without a user id")]
    MissingUser,

    #[error("calculation {0} not found")]
    NotFound(u64),

    #[error("cannot encode calculation: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: u64,
    pub user_id: String,
    pub calculator_type: CalculatorType,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Persistence port for calculation history
pub trait HistoryStore {
    /// Store a calculation and return the saved record
    fn save(
        &mut self,
        user_id: &str,
        calculator_type: CalculatorType,
        input: serde_json::Value,
        output: serde_json::Value,
        summary: String,
    ) -> Result<CalculationRecord, HistoryError>;

    fn get(&self, id: u64) -> Option<CalculationRecord>;

    /// Records for a user, newest first, optionally limited to one calculator
    fn list(&self, user_id: &str, filter: Option<CalculatorType>) -> Vec<CalculationRecord>;

    fn delete(&mut self, id: u64) -> Result<CalculationRecord, HistoryError>;
}

/// Encode a request/output pair and save it with its summary
pub fn record_calculation<S: HistoryStore + ?Sized>(
    store: &mut S,
    user_id: &str,
    request: &CalculationRequest,
    output: &CalculationOutput,
) -> Result<CalculationRecord, HistoryError> {
    store.save(
        user_id,
        output.calculator_type(),
        serde_json::to_value(request)?,
        serde_json::to_value(output)?,
        output.summary(),
    )
}

/// In-memory history, mainly for tests and one-shot tools
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    /// Kept in creation order
    records: Vec<CalculationRecord>,
    next_id: u64,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records across users, oldest first
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }
}

impl HistoryStore for MemoryHistory {
    fn save(
        &mut self,
        user_id: &str,
        calculator_type: CalculatorType,
        input: serde_json::Value,
        output: serde_json::Value,
        summary: String,
    ) -> Result<CalculationRecord, HistoryError> {
        if user_id.trim().is_empty() {
            return Err(HistoryError::MissingUser);
        }

        self.next_id += 1;
        let record = CalculationRecord {
            id: self.next_id,
            user_id: user_id.to_string(),
            calculator_type,
            input,
            output,
            summary,
            created_at: Utc::now(),
        };

        debug!("saved {} calculation {} for user {}", calculator_type, record.id, user_id);
        self.records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: u64) -> Option<CalculationRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    fn list(&self, user_id: &str, filter: Option<CalculatorType>) -> Vec<CalculationRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| filter.map_or(true, |t| r.calculator_type == t))
            .cloned()
            .collect()
    }

    fn delete(&mut self, id: u64) -> Result<CalculationRecord, HistoryError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        Ok(self.records.remove(idx))
    }
}
