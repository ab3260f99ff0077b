//! Починка кавычек в выгрузках ING.
//!
//! Примерно с 2017 года ING отдаёт CSV, где поля обёрнуты в разное число кавычек:
//!
//! ```text
//! "Datum,""Naam / Omschrijving"",""Rekening"",...,""Mededelingen"""
//! ```
//!
//! Профиль кавычек снимается с заголовка и считается верным для всех строк таблицы.
//! Строки, у которых кавычки в колонке отличаются от заголовка, корректно не чинятся.

use crate::error::{ConvertError, Result};
use tracing::debug;

pub const QUOTE: char = '"';
pub const SEPARATOR: &str = ",";

/// Длины серий кавычек слева и справа от каждого поля заголовка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteProfile {
    left: Vec<usize>,
    right: Vec<usize>,
}

impl QuoteProfile {
    /// Заголовок режется по `sep` «в лоб»: куски нужны только для подсчёта кавычек.
    pub fn from_header(header: &str, sep: &str) -> Result<Self> {
        let header = strip_line_end(header);
        let mut left = Vec::new();
        let mut right = Vec::new();

        for (field, chunk) in header.split(sep).enumerate() {
            if chunk.is_empty() {
                return Err(ConvertError::QuoteProfile {
                    field,
                    reason: "empty field",
                });
            }
            let l = chunk.chars().take_while(|&c| c == QUOTE).count();
            if l == chunk.len() {
                return Err(ConvertError::QuoteProfile {
                    field,
                    reason: "field consists of quotes only",
                });
            }
            let r = chunk.chars().rev().take_while(|&c| c == QUOTE).count();
            left.push(l);
            right.push(r);
        }

        Ok(QuoteProfile { left, right })
    }

    pub fn left(&self) -> &[usize] {
        &self.left
    }

    pub fn right(&self) -> &[usize] {
        &self.right
    }

    pub fn field_count(&self) -> usize {
        self.left.len()
    }

    /// Ровно одна кавычка с каждой стороны каждого поля: чинить нечего.
    pub fn is_canonical(&self) -> bool {
        self.left.iter().chain(&self.right).all(|&q| q == 1)
    }

    /// Перерезает строку по профилю и оборачивает каждое поле в одну пару кавычек.
    /// `line_no` нужен только для сообщений об ошибках.
    pub fn repair_line(&self, line: &str, sep: &str, line_no: usize) -> Result<String> {
        let line = strip_line_end(line);
        let last = self.field_count().saturating_sub(1);
        let mut cursor = 0;
        let mut fields = Vec::with_capacity(self.field_count());

        for (i, (&left, &right)) in self.left.iter().zip(&self.right).enumerate() {
            let (field, next) = extract_field(line, cursor, left, right, sep, i == last)
                .map_err(|reason| ConvertError::MalformedRow {
                    line: line_no,
                    reason: format!("field {i}: {reason}"),
                })?;
            fields.push(format!("{QUOTE}{field}{QUOTE}"));
            cursor = next;
        }

        let trailing = line.get(cursor..).ok_or_else(|| ConvertError::MalformedRow {
            line: line_no,
            reason: format!("field {last} ends inside a character at offset {cursor}"),
        })?;
        if !trailing.is_empty() {
            return Err(ConvertError::MalformedRow {
                line: line_no,
                reason: format!("unexpected data after field {last}: '{trailing}'"),
            });
        }

        Ok(fields.join(sep))
    }
}

/// Вырезает одно поле начиная с `cursor` и возвращает его вместе со смещением
/// начала следующего поля.
///
/// `right == 0`: поле заканчивается на ближайшем разделителе (последнее поле может
/// тянуться до конца строки). `right > 0`: поле заканчивается на ближайшей серии из
/// `right` кавычек, за которой обязан идти разделитель. У последнего поля курсор
/// останавливается сразу за кавычками, хвост строки проверяет вызывающий.
pub fn extract_field<'a>(
    line: &'a str,
    cursor: usize,
    left: usize,
    right: usize,
    sep: &str,
    last: bool,
) -> std::result::Result<(&'a str, usize), String> {
    let start = cursor + left;
    let rest = line
        .get(start..)
        .ok_or_else(|| format!("line ends before field start at offset {start}"))?;

    let (stop, next) = if right == 0 {
        match rest.find(sep) {
            Some(p) => (start + p, start + p + sep.len()),
            None if last => (line.len(), line.len()),
            None => return Err(format!("missing separator '{sep}'")),
        }
    } else {
        let closing = QUOTE.to_string().repeat(right);
        let p = rest
            .find(&closing)
            .ok_or_else(|| format!("unterminated field, expected {right} closing quote(s)"))?;
        let stop = start + p;
        let end = stop + right;
        // кавычки ASCII, так что `end` всегда на границе символа
        let after = &line[end..];
        if after.is_empty() || last {
            (stop, end)
        } else if after.starts_with(sep) {
            (stop, end + sep.len())
        } else {
            return Err(format!("expected '{sep}' after {right} closing quote(s)"));
        }
    };

    Ok((&line[start..stop], next.min(line.len())))
}

/// Таблица после починки: все строки, включая заголовок.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedTable {
    lines: Vec<String>,
}

impl RepairedTable {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Текст таблицы, каждая строка с CRLF.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\r\n");
        }
        out
    }
}

/// Чинит таблицу целиком, если заголовок этого требует; иначе `None`
/// и исходные строки используются как есть. Пустые строки остаются пустыми,
/// число строк не меняется.
pub fn repair_table<S: AsRef<str>>(lines: &[S], sep: &str) -> Result<Option<RepairedTable>> {
    let Some(header) = lines.first() else {
        return Ok(None);
    };
    let profile = QuoteProfile::from_header(header.as_ref(), sep)?;
    if profile.is_canonical() {
        debug!(fields = profile.field_count(), "header is well quoted, no repair needed");
        return Ok(None);
    }

    debug!(
        left = ?profile.left(),
        right = ?profile.right(),
        "inconsistent quoting in header, repairing table"
    );

    let mut repaired = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if strip_line_end(line).is_empty() {
            repaired.push(String::new());
            continue;
        }
        repaired.push(profile.repair_line(line, sep, idx + 1)?);
    }

    debug!(lines = repaired.len(), "table repaired");
    Ok(Some(RepairedTable { lines: repaired }))
}

fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
