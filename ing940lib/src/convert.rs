//! Весь конвейер: починка кавычек (если нужна), чтение строк, сборка выписки.

use crate::{
    config::StatementConfig,
    error::Result,
    formats::{
        csv::IngCsv,
        mt940::{StatementBuilder, StatementDocument},
        quotes::{repair_table, RepairedTable, SEPARATOR},
    },
};
use std::io::BufRead;
use tracing::debug;

/// Результат конвертации: выписка и, если пришлось чинить, исправленная таблица.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub statement: StatementDocument,
    pub repaired: Option<RepairedTable>,
}

impl Conversion {
    pub fn closing_balance(&self) -> i64 {
        self.statement.closing_balance()
    }
}

pub fn convert<R: BufRead>(r: R, config: &StatementConfig) -> Result<Conversion> {
    let lines = r.lines().collect::<std::io::Result<Vec<_>>>()?;
    convert_lines(&lines, config)
}

pub fn convert_str(input: &str, config: &StatementConfig) -> Result<Conversion> {
    let lines: Vec<&str> = input.lines().collect();
    convert_lines(&lines, config)
}

/// Починка, если она сработала, полностью заканчивается до чтения первой строки.
pub fn convert_lines<S: AsRef<str>>(lines: &[S], config: &StatementConfig) -> Result<Conversion> {
    let mut builder = StatementBuilder::new(config)?;

    let repaired = repair_table(lines, SEPARATOR)?;
    let table = match &repaired {
        Some(t) => t.render(),
        None => lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<&str>>()
            .join("\n"),
    };
    debug!(repaired = repaired.is_some(), "reading transactions");

    for row in IngCsv::rows(table.as_bytes()) {
        builder.push(&row?)?;
    }

    Ok(Conversion {
        statement: builder.finish()?,
        repaired,
    })
}
