use crate::{
    config::StatementConfig,
    error::{ConvertError, Result},
    model::{format_cents, DebitCredit, TransactionRow},
    traits::WriteFormat,
};
use std::fmt::{self, Write as FmtWrite};
use tracing::{info, trace};

pub const CURRENCY: &str = "EUR";
pub const LINE_END: &str = "\r\n";

/// Ширина одной записи :86: в символах.
pub const COMMENT_WIDTH: usize = 63;
/// Больше двух записей :86: на проводку не пишем, остаток сообщения теряется.
pub const COMMENT_RECORDS: usize = 2;

const END_OF_STATEMENT: &str = "-";

/// Теги: :20:, :25:, :28C:, :60F:, :61:, :86:, :62F:
pub struct Mt940;

impl WriteFormat for Mt940 {
    type Input = StatementDocument;

    fn write<W: std::io::Write>(mut w: W, doc: &StatementDocument) -> Result<()> {
        w.write_all(doc.as_str().as_bytes())?;
        Ok(())
    }
}

/// Готовая выписка. Неизменяема: получить её можно только через [`StatementBuilder::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDocument {
    text: String,
    closing_balance: i64,
    transactions: usize,
}

impl StatementDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Итоговое сальдо в центах.
    pub fn closing_balance(&self) -> i64 {
        self.closing_balance
    }

    pub fn transactions(&self) -> usize {
        self.transactions
    }
}

impl fmt::Display for StatementDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for StatementDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Выписка пишется в один проход: шапка, по группе записей на строку выгрузки, :62F:.
#[derive(Debug)]
pub struct StatementBuilder {
    buf: String,
    balance: i64,
    last_date: Option<String>,
    transactions: usize,
}

impl StatementBuilder {
    /// Проверяет конфигурацию и сразу пишет шапку с начальным сальдо (:60F:, ноль).
    pub fn new(config: &StatementConfig) -> Result<Self> {
        config.validate()?;

        let mut buf = String::new();
        for line in [
            "0000 01INGBNL2AXXXX00001",
            "0000 01INGBNL2AXXXX00001",
            "940 00",
            ":20:INGEB",
        ] {
            let _ = write!(buf, "{line}{LINE_END}");
        }
        let _ = write!(buf, ":25:{}{LINE_END}", config.account);
        let _ = write!(buf, ":28C:1{LINE_END}");
        let _ = write!(buf, ":60F:C{}{CURRENCY}0{LINE_END}", config.opening_date);

        Ok(StatementBuilder {
            buf,
            balance: 0,
            last_date: None,
            transactions: 0,
        })
    }

    /// Текущее сальдо в центах.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Добавляет :61: и до двух :86:. При ошибке буфер и сальдо не меняются.
    pub fn push(&mut self, row: &TransactionRow) -> Result<()> {
        let cents = row.cents()?;
        let date = row.short_date()?;
        let dc = row.dc();
        let balance = match dc {
            DebitCredit::Credit => self.balance.checked_add(cents),
            DebitCredit::Debit => self.balance.checked_sub(cents),
        }
        .ok_or_else(|| ConvertError::Parse(format!("balance overflow at amount '{}'", row.amount)))?;

        trace!(date = %date, dc = ?dc, cents, balance, "transaction");

        // сумма в :61: ровно как в выгрузке
        let _ = write!(
            self.buf,
            ":61:{}{}{}N{}{LINE_END}",
            date,
            dc.code(),
            row.amount,
            row.type_code
        );
        for chunk in wrap_comment(&row.comment) {
            let _ = write!(self.buf, ":86:{chunk}{LINE_END}");
        }

        self.balance = balance;
        self.last_date = Some(date);
        self.transactions += 1;
        Ok(())
    }

    /// Дописывает :62F: с датой последней проводки и закрывает выписку.
    pub fn finish(mut self) -> Result<StatementDocument> {
        let date = self.last_date.take().ok_or(ConvertError::EmptyStatement)?;
        let dc = DebitCredit::of_balance(self.balance);
        let _ = write!(
            self.buf,
            ":62F:{}{}{CURRENCY}{}{LINE_END}{END_OF_STATEMENT}",
            dc.code(),
            date,
            format_cents(self.balance)
        );

        info!(
            transactions = self.transactions,
            balance = self.balance,
            "statement finished"
        );

        Ok(StatementDocument {
            text: self.buf,
            closing_balance: self.balance,
            transactions: self.transactions,
        })
    }
}

/// Режет сообщение на записи по [`COMMENT_WIDTH`] символов, не больше [`COMMENT_RECORDS`].
pub fn wrap_comment(comment: &str) -> Vec<String> {
    let chars: Vec<char> = comment.chars().collect();
    chars
        .chunks(COMMENT_WIDTH)
        .take(COMMENT_RECORDS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
