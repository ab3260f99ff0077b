//! Доменные модели: строка выгрузки ING и направление проводки.

use crate::error::{ConvertError, Result};
use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

/// Число колонок в выгрузке ING.
pub const FIELD_COUNT: usize = 9;

/// Значение колонки «Af Bij», означающее зачисление.
pub const CREDIT_MARKER: &str = "Bij";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebitCredit {
    Debit,
    Credit,
}

impl DebitCredit {
    /// Всё, что не `Bij`, считается списанием.
    pub fn from_marker(flag: &str) -> Self {
        if flag == CREDIT_MARKER {
            DebitCredit::Credit
        } else {
            DebitCredit::Debit
        }
    }

    /// Знак итогового сальдо: ноль и положительное считаются кредитом.
    pub fn of_balance(cents: i64) -> Self {
        if cents < 0 {
            DebitCredit::Debit
        } else {
            DebitCredit::Credit
        }
    }

    pub fn code(self) -> char {
        match self {
            DebitCredit::Debit => 'D',
            DebitCredit::Credit => 'C',
        }
    }
}

/// Одна строка выгрузки: дата, наименование, счёт, контрсчёт, код, Af/Bij,
/// сумма, вид мутации, сообщение.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRow {
    pub date: String,
    pub payee: String,
    pub account: String,
    pub counter_account: String,
    pub type_code: String,
    pub direction: String,
    pub amount: String,
    pub mutation_kind: String,
    pub comment: String,
}

impl TransactionRow {
    /// Собирает строку из полей; число полей обязано быть ровно [`FIELD_COUNT`].
    pub fn from_fields<'a, I>(fields: I, line: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let [date, payee, account, counter_account, type_code, direction, amount, mutation_kind, comment] =
            fields.as_slice()
        else {
            return Err(ConvertError::MalformedRow {
                line,
                reason: format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
            });
        };

        Ok(TransactionRow {
            date: date.to_string(),
            payee: payee.to_string(),
            account: account.to_string(),
            counter_account: counter_account.to_string(),
            type_code: type_code.to_string(),
            direction: direction.to_string(),
            amount: amount.to_string(),
            mutation_kind: mutation_kind.to_string(),
            comment: comment.to_string(),
        })
    }

    pub fn dc(&self) -> DebitCredit {
        DebitCredit::from_marker(&self.direction)
    }

    pub fn cents(&self) -> Result<i64> {
        parse_cents(&self.amount)
    }

    /// Сумма со знаком: зачисление положительно, списание отрицательно.
    pub fn signed_cents(&self) -> Result<i64> {
        let cents = self.cents()?;
        Ok(match self.dc() {
            DebitCredit::Credit => cents,
            DebitCredit::Debit => -cents,
        })
    }

    /// Дата в виде YYMMDD (из YYYYMMDD).
    pub fn short_date(&self) -> Result<String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y%m%d")
            .map_err(|e| ConvertError::Parse(format!("date '{}': {e}", self.date)))?;
        Ok(date.format("%y%m%d").to_string())
    }
}

/// "10,50" -> 1050. Дробная часть сверх центов отбрасывается.
pub fn parse_cents(amount: &str) -> Result<i64> {
    let normalized = amount.trim().replace(',', ".");
    let value: Decimal = normalized
        .parse()
        .map_err(|e| ConvertError::Parse(format!("amount '{amount}': {e}")))?;
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.trunc().to_i64())
        .ok_or_else(|| ConvertError::Parse(format!("amount '{amount}' out of range")))
}

/// Модуль суммы в единицах валюты, два знака, запятая: 200 -> "2,00".
pub fn format_cents(cents: i64) -> String {
    let mut s = Decimal::new(cents, 2).abs().to_string();
    if let Some(dot) = s.find('.') {
        s.replace_range(dot..=dot, ",");
    }
    s
}
