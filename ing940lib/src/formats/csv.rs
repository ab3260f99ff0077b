//! CSV-выгрузка ING, уже с корректными кавычками. Заголовок (голландские имена
//! колонок) пропускается, колонки берутся по позиции:
//! Datum,Naam / Omschrijving,Rekening,Tegenrekening,Code,Af Bij,Bedrag (EUR),MutatieSoort,Mededelingen

use crate::{
    error::Result,
    model::TransactionRow,
    traits::ReadFormat,
};
use csv::ReaderBuilder;
use std::io::{BufRead, Read};

pub struct IngCsv;

impl IngCsv {
    /// Потоковое чтение строк. Ширина строки проверяется при сборке [`TransactionRow`],
    /// поэтому ридер гибкий.
    pub fn rows<R: Read>(r: R) -> impl Iterator<Item = Result<TransactionRow>> {
        ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(r)
            .into_records()
            .map(|rec| {
                let rec = rec?;
                let line = rec.position().map_or(0, |p| p.line() as usize);
                TransactionRow::from_fields(rec.iter(), line)
            })
    }
}

impl ReadFormat for IngCsv {
    type Output = Vec<TransactionRow>;

    fn read<R: BufRead>(r: R) -> Result<Vec<TransactionRow>> {
        IngCsv::rows(r).collect()
    }
}
