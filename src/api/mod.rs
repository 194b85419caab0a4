//! The boundary to the spreadsheet service.
//!
//! Everything the core needs from the store is the `Sheet` trait; the rest of
//! this module is the Google-backed implementation, an in-memory fake, and
//! the mode switch that picks between them.

mod google;
mod test_sheet;

use crate::{Config, Result};

pub use test_sheet::TestSheet;

/// Name of the tab holding every transaction.
pub const TRANSACTIONS: &str = "Transações";
/// Name of the income mirror tab.
pub const INCOME: &str = "Receitas";
/// Name of the expense mirror tab.
pub const EXPENSES: &str = "Despesas";
/// Name of the tab the analysis run rewrites.
pub const ANALYSIS: &str = "Análise de Gastos";

/// Environment variable that routes all sheet traffic to the in-memory fake.
pub const TEST_MODE_VAR: &str = "FIN_SYNC_IN_TEST_MODE";

/// The tabular-store operations the core depends on. Rows are plain strings;
/// interpreting them is the caller's business.
#[async_trait::async_trait]
pub trait Sheet {
    /// Returns all rows of the named sheet, header included.
    async fn read_all(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>>;

    /// Clears the named sheet, then writes `header` followed by `rows`.
    async fn overwrite(
        &mut self,
        sheet_name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<()>;

    /// Appends `rows` below the existing content of the named sheet.
    async fn append(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()>;

    /// Creates the named sheet if the workbook does not have it yet.
    async fn ensure_sheet(&mut self, sheet_name: &str) -> Result<()>;
}

/// Selects the `Sheet` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Use the real Google Sheets API.
    Google,
    /// Use the in-memory `TestSheet`. This allows running the whole app,
    /// top-to-bottom, without touching Google Sheets.
    Test,
}

impl Mode {
    /// `Test` when `FIN_SYNC_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Google`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_VAR) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Google,
        }
    }
}

/// Creates the `Sheet` implementation for `mode`.
pub(crate) async fn sheet(config: &Config, mode: Mode) -> Result<Box<dyn Sheet + Send>> {
    Ok(match mode {
        Mode::Google => Box::new(google::GoogleSheet::new(config.clone()).await?),
        Mode::Test => Box::new(TestSheet::default()),
    })
}
