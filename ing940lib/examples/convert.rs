use ing940lib::{
    config::StatementConfig,
    convert::convert,
    formats::mt940::Mt940,
    traits::WriteFormat,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: CSV ING (stdin) -> MT940 (stdout)
    //   cargo run --example convert -- NL00INGB0001234567 161231 < export.csv
    let mut args = std::env::args().skip(1);
    let account = args.next().ok_or("usage: convert <account> <YYMMDD>")?;
    let date = args.next().ok_or("usage: convert <account> <YYMMDD>")?;

    let config = StatementConfig::new(account, date);
    let conv = convert(std::io::stdin().lock(), &config)?;
    Mt940::write(std::io::stdout(), &conv.statement)?;
    Ok(())
}
