//! Implements the `Sheet` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so
//! that we can run the whole app, top-to-bottom, without using Google Sheets.

use crate::api::{Sheet, ANALYSIS, EXPENSES, INCOME, TRANSACTIONS};
use crate::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Cursor;

/// An implementation of the `Sheet` trait that does not use Google Sheets.
/// It can hold any data in memory and, by default, is seeded with some
/// existing data.
pub struct TestSheet {
    pub(crate) data: HashMap<String, Vec<Vec<String>>>,
}

impl TestSheet {
    /// Create a new `TestSheet` using `data`. The map key is sheet name and
    /// the map value is the rows of the sheet.
    pub fn new(data: HashMap<String, Vec<Vec<String>>>) -> Self {
        Self { data }
    }

    /// The current rows of a sheet, if it exists.
    pub fn rows(&self, sheet_name: &str) -> Option<&Vec<Vec<String>>> {
        self.data.get(sheet_name)
    }
}

#[async_trait::async_trait]
impl Sheet for TestSheet {
    async fn read_all(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .data
            .get(sheet_name)
            .with_context(|| format!("Sheet '{sheet_name}' not found"))?
            .clone())
    }

    async fn overwrite(
        &mut self,
        sheet_name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<()> {
        let mut contents: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
        contents.push(header.iter().map(|h| h.to_string()).collect());
        contents.extend_from_slice(rows);
        self.data.insert(sheet_name.to_string(), contents);
        Ok(())
    }

    async fn append(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()> {
        self.data
            .entry(sheet_name.to_string())
            .or_default()
            .extend_from_slice(rows);
        Ok(())
    }

    async fn ensure_sheet(&mut self, sheet_name: &str) -> Result<()> {
        self.data.entry(sheet_name.to_string()).or_default();
        Ok(())
    }
}

impl Default for TestSheet {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::new(default_data())
    }
}

/// Provides the seed data from this module.
fn default_data() -> HashMap<String, Vec<Vec<String>>> {
    let mut map = HashMap::new();
    map.insert(TRANSACTIONS.to_string(), load_csv(TRANSACTION_DATA).unwrap());
    map.insert(INCOME.to_string(), load_csv(INCOME_DATA).unwrap());
    map.insert(EXPENSES.to_string(), load_csv(EXPENSE_DATA).unwrap());
    map.insert(ANALYSIS.to_string(), load_csv(ANALYSIS_DATA).unwrap());
    map
}

/// Loads data from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let bytes = csv_data.as_bytes();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false) // Ensure headers are treated as part of the data
        .from_reader(Cursor::new(bytes));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Bad seed CSV")?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Seed transaction data: two months of activity, income included.
const TRANSACTION_DATA: &str = r##"Data,Descrição,Valor,Forma de Pagamento,Categoria,Tipo
05-02-2024,Salário de fevereiro,"R$ 5.000,00",Ted,Salário,Receita
06-02-2024,Supermercado Guanabara,"R$ 612,40",Pix,Alimentação,Despesa
10-02-2024,Conta de luz,"R$ 180,00",Boleto,Moradia,Despesa
14-02-2024,Uber aeroporto,"R$ 64,90",Cartão de Crédito,Transporte,Despesa
05-03-2024,Salário de março,"R$ 5.000,00",Ted,Salário,Receita
08-03-2024,Feira da semana,"R$ 240,00",Dinheiro,Alimentação,Despesa
12-03-2024,Netflix,"R$ 39,90",Cartão de Crédito,Lazer,Despesa
20-03-2024,Farmácia Pacheco,"R$ 85,30",Pix,Saúde,Despesa
"##;

/// Seed income mirror data.
const INCOME_DATA: &str = r##"Data,Descrição,Valor,Meio de Pagamento,Categoria
05-02-2024,Salário de fevereiro,"R$ 5.000,00",Ted,Salário
05-03-2024,Salário de março,"R$ 5.000,00",Ted,Salário
"##;

/// Seed expense mirror data.
const EXPENSE_DATA: &str = r##"Data,Descrição,Valor,Meio de Pagamento,Categoria
06-02-2024,Supermercado Guanabara,"R$ 612,40",Pix,Alimentação
10-02-2024,Conta de luz,"R$ 180,00",Boleto,Moradia
14-02-2024,Uber aeroporto,"R$ 64,90",Cartão de Crédito,Transporte
08-03-2024,Feira da semana,"R$ 240,00",Dinheiro,Alimentação
12-03-2024,Netflix,"R$ 39,90",Cartão de Crédito,Lazer
20-03-2024,Farmácia Pacheco,"R$ 85,30",Pix,Saúde
"##;

/// Seed analysis data: header only, the analyze command rewrites it anyway.
const ANALYSIS_DATA: &str = r##"Mês/Ano,Categoria,Total Gasto,Média Mensal,Percentual do Total,Recomendação
"##;
