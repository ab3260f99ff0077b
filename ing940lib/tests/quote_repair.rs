use ing940lib::{
    error::ConvertError,
    formats::{
        csv::IngCsv,
        quotes::{repair_table, QuoteProfile, SEPARATOR},
    },
    traits::ReadFormat,
};
use std::io::Cursor;

const COLUMNS: [&str; 9] = [
    "Datum",
    "Naam / Omschrijving",
    "Rekening",
    "Tegenrekening",
    "Code",
    "Af Bij",
    "Bedrag (EUR)",
    "MutatieSoort",
    "Mededelingen",
];

fn quoted(fields: &[&str], level: usize) -> String {
    let q = "\"".repeat(level);
    fields
        .iter()
        .map(|f| format!("{q}{f}{q}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn sample_row(i: usize) -> Vec<String> {
    vec![
        format!("201701{:02}", i + 1),
        format!("Payee {i}"),
        "NL00INGB0001234567".into(),
        "NL11RABO0123456789".into(),
        "GT".into(),
        if i % 2 == 0 { "Bij".into() } else { "Af".into() },
        format!("{i},25"),
        "Online bankieren".into(),
        format!("comment {i}"),
    ]
}

fn table(level: usize, rows: usize) -> Vec<String> {
    let mut lines = vec![quoted(&COLUMNS, level)];
    for i in 0..rows {
        let row = sample_row(i);
        let refs: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(quoted(&refs, level));
    }
    lines
}

#[test]
fn well_formed_table_is_not_repaired() {
    let lines = table(1, 3);
    let repaired = repair_table(&lines, SEPARATOR).expect("profile");
    assert!(repaired.is_none());
}

#[test]
fn uniform_quote_levels_repair_to_header_width() {
    for level in [2, 3, 4] {
        let lines = table(level, 5);
        let repaired = repair_table(&lines, SEPARATOR)
            .expect("repair")
            .expect("repair should trigger");
        assert_eq!(repaired.len(), lines.len());

        for line in repaired.lines() {
            assert!(line.starts_with('"') && line.ends_with('"'), "{line}");
            assert!(!line.contains("\"\""), "{line}");
        }

        // запятая внутри суммы: по разделителю делить нельзя, только CSV-ридером
        let rows = IngCsv::read(Cursor::new(repaired.render())).expect("read repaired");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3].amount, "3,25");
        assert_eq!(rows[3].payee, "Payee 3");
    }
}

#[test]
fn repairing_twice_is_a_no_op() {
    let lines = table(2, 2);
    let once = repair_table(&lines, SEPARATOR).unwrap().unwrap();
    let twice = repair_table(once.lines(), SEPARATOR).unwrap();
    assert!(twice.is_none());
}

#[test]
fn ing_2017_export_is_repaired() {
    let lines = [
        r#""Datum,""Naam / Omschrijving"",""Rekening"",""Tegenrekening"",""Code"",""Af Bij"",""Bedrag (EUR)"",""MutatieSoort"",""Mededelingen""""#,
        r#""20170105,""Huur"",""NL00INGB0001234567"",""NL11RABO0123456789"",""GT"",""Af"",""650,00"",""Online bankieren"",""Huur januari, kamer 2""""#,
    ];
    let repaired = repair_table(&lines, SEPARATOR).unwrap().unwrap();
    assert_eq!(
        repaired.lines()[0],
        r#""Datum","Naam / Omschrijving","Rekening","Tegenrekening","Code","Af Bij","Bedrag (EUR)","MutatieSoort","Mededelingen""#
    );
    assert_eq!(
        repaired.lines()[1],
        r#""20170105","Huur","NL00INGB0001234567","NL11RABO0123456789","GT","Af","650,00","Online bankieren","Huur januari, kamer 2""#
    );
    assert!(repaired.render().ends_with("\"\r\n"));
}

#[test]
fn row_missing_closing_quotes_is_rejected() {
    let lines = [r#"""a"",""b"""#, r#"""x"",""y"#];
    let err = repair_table(&lines, SEPARATOR).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedRow { line: 2, .. }));
}

#[test]
fn profile_is_taken_from_header_only() {
    let p = QuoteProfile::from_header(&quoted(&COLUMNS, 3), SEPARATOR).unwrap();
    assert_eq!(p.field_count(), 9);
    assert!(p.left().iter().all(|&q| q == 3));
    assert!(p.right().iter().all(|&q| q == 3));
}
