//! These structs provide the CLI interface for the fin CLI.

use crate::model::{Amount, Category, Kind, PaymentMethod, DATE_FORMAT};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fin: a command-line tool for tracking personal finances in a Google sheet.
///
/// Transactions are recorded on the Transações tab of your sheet (and
/// mirrored to Receitas or Despesas); the analyze subcommand rewrites the
/// Análise de Gastos tab with per-month, per-category spending totals and
/// recommendations.
///
/// Values on the sheet use Brazilian notation, e.g. R$ 1.234,56, and dates
/// are DD-MM-YYYY.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, write the configuration file, and make
    /// sure every tab of the sheet exists with its header row.
    Init(InitArgs),
    /// Record a manually-entered transaction.
    Add(AddArgs),
    /// List transactions, optionally filtered, with their total.
    List(ListArgs),
    /// Recompute the spending analysis and rewrite the Análise de Gastos tab.
    Analyze,
    /// Import a bank-statement CSV, skipping already-recorded transactions.
    Import(ImportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fin data and configuration is held. Defaults to
    /// ~/fin
    #[arg(long, env = "FIN_HOME", default_value_t = default_fin_home())]
    fin_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fin_home: PathBuf) -> Self {
        Self {
            log_level,
            fin_home: fin_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fin_home(&self) -> &DisplayPath {
        &self.fin_home
    }
}

/// Args for the `fin init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The URL of your Google sheet. It looks like this:
    /// https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    #[arg(long)]
    sheet_url: String,
}

impl InitArgs {
    pub fn new(sheet_url: impl Into<String>) -> Self {
        Self {
            sheet_url: sheet_url.into(),
        }
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }
}

/// Args for the `fin add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The kind of transaction: Receita or Despesa.
    #[arg(long)]
    kind: Kind,

    /// The amount in Brazilian notation, e.g. 1.234,56 (R$ prefix optional).
    #[arg(long)]
    amount: Amount,

    /// Free-text description of the transaction.
    #[arg(long)]
    description: String,

    /// The payment method, e.g. Pix, Ted, Boleto or Dinheiro.
    #[arg(long)]
    payment_method: PaymentMethod,

    /// A category valid for the kind, e.g. Alimentação for a Despesa or
    /// Salário for a Receita.
    #[arg(long)]
    category: Category,

    /// The transaction date as DD-MM-YYYY. Defaults to today.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

impl AddArgs {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `fin list` command. Every filter is optional; filters
/// combine with AND.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only transactions on this exact date (DD-MM-YYYY).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Only transactions whose description contains this text
    /// (case-insensitive).
    #[arg(long)]
    description: Option<String>,

    /// Only transactions with exactly this amount.
    #[arg(long)]
    amount: Option<Amount>,

    /// Only transactions of this kind: Receita or Despesa.
    #[arg(long)]
    kind: Option<Kind>,

    /// Only transactions paid with this method.
    #[arg(long)]
    payment_method: Option<PaymentMethod>,
}

impl ListArgs {
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }
}

/// Args for the `fin import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The statement CSV file with title,amount,date columns, where amount is
    /// a signed integer in centavos and date is ISO-8601.
    #[arg(long = "file", short = 'f')]
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

fn default_fin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fin"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fin-home or FIN_HOME instead of relying on the default \
                fin home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("fin")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
