use clap::{ArgAction, Parser};
use ing940lib::{
    config::StatementConfig,
    convert::convert,
    error::Result,
    formats::mt940::Mt940,
    traits::WriteFormat,
};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ing940", version, about = "Tool for converting ING csv to MT940")]
struct Cli {
    /// Входной CSV-файл
    input: PathBuf,

    /// Номер счёта так, как он заведён в бухгалтерской системе
    #[arg(short = 'r', long = "reknr")]
    reknr: String,

    /// Дата перед первой проводкой (YYMMDD)
    #[arg(short = 'd', long = "date")]
    date: String,

    /// Файл выписки (по умолчанию: вход с расширением .ing)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Куда писать исправленную таблицу (по умолчанию: <вход>_repaired.csv)
    #[arg(long = "repaired")]
    repaired: Option<PathBuf>,

    /// Подробнее в лог (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = StatementConfig::new(cli.reknr, cli.date);
    let reader = BufReader::new(File::open(&cli.input)?);
    let conversion = convert(reader, &config)?;

    // пишем только после успешной конвертации целиком
    if let Some(table) = &conversion.repaired {
        let path = cli
            .repaired
            .unwrap_or_else(|| sibling_path(&cli.input, "_repaired.csv"));
        fs::write(&path, table.render())?;
        info!(path = %path.display(), lines = table.len(), "repaired table written");
    }

    let output = cli.output.unwrap_or_else(|| sibling_path(&cli.input, ".ing"));
    let mut writer = BufWriter::new(File::create(&output)?);
    Mt940::write(&mut writer, &conversion.statement)?;
    writer.flush()?;
    debug!(
        transactions = conversion.statement.transactions(),
        balance = conversion.closing_balance(),
        "done"
    );

    println!("MT940 file has been written to {}", output.display());
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// `statement.csv` -> `statement{suffix}`; без расширения .csv суффикс просто дописывается.
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".csv").unwrap_or(&name);
    input.with_file_name(format!("{stem}{suffix}"))
}
