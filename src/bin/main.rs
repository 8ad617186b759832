// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use theater_billing::{
    Catalog, Invoice, Performance, Play, PlayId, RuleBook, StatementError, StatementPrinter,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Theater Billing - Print customer statements for theatrical performances
///
/// Reads a play catalog and a list of performances, then prints one statement
/// per customer to stdout.
#[derive(Parser, Debug)]
#[command(name = "theater-billing")]
#[command(about = "Prints billing statements for theatrical performances", long_about = None)]
struct Args {
    /// Path to CSV file with performances
    ///
    /// Expected format: customer,play,audience
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Path to CSV play catalog
    ///
    /// Expected format: id,name,type
    #[arg(long, value_name = "FILE")]
    plays: PathBuf,

    /// Optional JSON rule book replacing the standard rates
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

/// Failures surfaced by the command line tool.
#[derive(Error, Debug)]
enum CliError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid rule book: {0}")]
    Rules(#[from] serde_json::Error),

    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

fn main() {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let rules = match &args.rules {
        Some(path) => load_rules(BufReader::new(open(path)?))?,
        None => RuleBook::default(),
    };
    let catalog = load_catalog(BufReader::new(open(&args.plays)?))?;
    let invoices = load_invoices(BufReader::new(open(&args.input)?))?;
    info!(
        plays = catalog.len(),
        invoices = invoices.len(),
        "loaded input"
    );

    let output = render_all(&StatementPrinter::with_rules(rules), &invoices, &catalog)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn open(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw catalog row: `id, name, type`.
#[derive(Debug, Deserialize)]
struct PlayRecord {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Raw performance row: `customer, play, audience`.
#[derive(Debug, Deserialize)]
struct PerformanceRecord {
    customer: String,
    play: String,
    audience: u32,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader)
}

/// Reads a play catalog from CSV.
///
/// Genres are not checked here; an unknown genre only fails once a
/// performance of that play is billed.
fn load_catalog<R: Read>(reader: R) -> Result<Catalog, csv::Error> {
    let mut catalog = Catalog::new();
    for result in csv_reader(reader).deserialize::<PlayRecord>() {
        let record = result?;
        if catalog
            .insert(record.id.clone(), Play::new(record.name, record.kind))
            .is_some()
        {
            debug!(play = %record.id, "duplicate catalog entry replaced");
        }
    }
    Ok(catalog)
}

/// Reads performances from CSV and groups them into one invoice per customer.
///
/// Invoices keep the order in which customers first appear, and each invoice
/// keeps its performances in file order.
fn load_invoices<R: Read>(reader: R) -> Result<Vec<Invoice>, csv::Error> {
    let mut invoices: Vec<Invoice> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in csv_reader(reader).deserialize::<PerformanceRecord>() {
        let record = result?;
        let performance = Performance::new(PlayId::from(record.play), record.audience);

        let slot = *index.entry(record.customer.clone()).or_insert_with(|| {
            invoices.push(Invoice::new(record.customer, Vec::new()));
            invoices.len() - 1
        });
        invoices[slot].performances.push(performance);
    }

    Ok(invoices)
}

fn load_rules<R: Read>(reader: R) -> Result<RuleBook, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Renders every statement, or none if any invoice fails.
fn render_all(
    printer: &StatementPrinter,
    invoices: &[Invoice],
    catalog: &Catalog,
) -> Result<String, StatementError> {
    invoices
        .iter()
        .map(|invoice| printer.render(invoice, catalog))
        .collect::<Result<Vec<_>, _>>()
        .map(|statements| statements.join("\n"))
}
