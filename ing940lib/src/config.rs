//! Параметры выписки, которых нет в самой выгрузке.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};

/// Длина даты начального сальдо (YYMMDD).
pub const OPENING_DATE_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementConfig {
    /// Номер счёта так, как он заведён в бухгалтерской системе; пишется в :25: как есть.
    pub account: String,
    /// Дата перед первой проводкой, YYMMDD.
    pub opening_date: String,
}

impl StatementConfig {
    pub fn new(account: impl Into<String>, opening_date: impl Into<String>) -> Self {
        StatementConfig {
            account: account.into(),
            opening_date: opening_date.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.opening_date.chars().count();
        if len != OPENING_DATE_LEN {
            return Err(ConvertError::Config(format!(
                "opening date should be given as YYMMDD, got '{}' ({len} characters)",
                self.opening_date
            )));
        }
        Ok(())
    }
}
