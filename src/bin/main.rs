use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use gvf_convert::{FormatTag, Numbering, ReadError, ReaderOptions, VariantRecord, VariantRecords};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Tsv,
    Json,
}

/// Convert GVF, GFF or GFF3 variant lines into normalized variant records
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (.gvf, .gff or .gff3, optionally gzipped)
    input: PathBuf,

    /// Override the format detected from the file extension
    #[arg(long, value_parser = FormatTag::from_str)]
    format: Option<FormatTag>,

    /// How record numbers are assigned (records or lines)
    #[arg(long, default_value = "records", value_parser = Numbering::from_str)]
    numbering: Numbering,

    /// Treat blank lines as malformed instead of skipping them
    #[arg(long)]
    keep_blank_lines: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    output: Output,

    /// Abort on the first malformed line
    #[arg(long)]
    strict: bool,
}

fn write_record<W: Write>(out: &mut W, output: Output, record: &VariantRecord) -> Result<()> {
    match output {
        Output::Tsv => writeln!(out, "{}", record)?,
        Output::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let records = match args.format {
        Some(format) => VariantRecords::from_path_with_format(&args.input, format)?,
        None => VariantRecords::from_path(&args.input)?,
    };
    let options = ReaderOptions::default()
        .with_numbering(args.numbering)
        .with_skip_blank_lines(!args.keep_blank_lines);
    let format = records.format();
    let mut records = records.with_reader_options(options);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Output::Tsv = args.output {
        writeln!(out, "{}", VariantRecord::tsv_header())?;
    }

    for result in records.by_ref() {
        match result {
            Ok(record) => write_record(&mut out, args.output, &record)?,
            Err(ReadError::Parse(e)) if !args.strict => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
    out.flush()?;

    let stats = records.stats();
    info!(
        "{} ({}): {} lines, {} records, {} ignored, {} malformed",
        args.input.display(),
        format,
        stats.lines(),
        stats.records(),
        stats.ignored(),
        stats.malformed()
    );
    Ok(())
}
