//! Add command: record a manually-entered transaction.
//!
//! Every transaction lands on the Transações tab; a mirror row without the
//! `Tipo` column also lands on Receitas or Despesas, whichever matches the
//! kind.

use crate::api::{Mode, Sheet, EXPENSES, INCOME, TRANSACTIONS};
use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{Kind, Transaction};
use crate::{api, Config, Result};

pub async fn add(config: Config, mode: Mode, args: AddArgs) -> Result<Out<Transaction>> {
    let transaction = Transaction::new_manual(
        args.date(),
        args.description(),
        args.amount(),
        args.payment_method(),
        args.category(),
        args.kind(),
    )?;
    let mut sheet = api::sheet(&config, mode).await?;
    add_with(sheet.as_mut(), transaction).await
}

pub(crate) async fn add_with(
    sheet: &mut (dyn Sheet + Send),
    transaction: Transaction,
) -> Result<Out<Transaction>> {
    sheet.append(TRANSACTIONS, &[transaction.to_row()]).await?;

    let mirror = match transaction.kind() {
        Kind::Income => INCOME,
        Kind::Expense => EXPENSES,
    };
    sheet.append(mirror, &[transaction.mirror_row()]).await?;

    let message = format!(
        "Recorded {} of {} on '{mirror}'",
        transaction.kind(),
        transaction.amount(),
    );
    Ok(Out::new(message, transaction))
}
