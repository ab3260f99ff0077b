use ing940lib::{
    formats::csv::IngCsv,
    model::DebitCredit,
    traits::ReadFormat,
};
use std::io::Cursor;

#[test]
fn reads_rows_by_position() {
    let input = r#""Datum","Naam / Omschrijving","Rekening","Tegenrekening","Code","Af Bij","Bedrag (EUR)","MutatieSoort","Mededelingen"
"20170105","Albert Heijn","NL00INGB0001234567","","BA","Af","12,34","Betaalautomaat","Pasvolgnr:001"
"20170106","Werkgever","NL00INGB0001234567","NL11RABO0123456789","OV","Bij","2500,00","Overschrijving","Salaris januari"
"#;
    let rows = IngCsv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.payee, "Albert Heijn");
    assert_eq!(first.counter_account, "");
    assert_eq!(first.dc(), DebitCredit::Debit);
    assert_eq!(first.cents().unwrap(), 1234);
    assert_eq!(first.short_date().unwrap(), "170105");

    let second = &rows[1];
    assert_eq!(second.dc(), DebitCredit::Credit);
    assert_eq!(second.signed_cents().unwrap(), 250000);
    assert_eq!(second.comment, "Salaris januari");
}
