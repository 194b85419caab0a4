//! The spreadsheet's enumerated vocabulary: transaction kind, payment method
//! and category. Wire strings are the Portuguese values the store carries;
//! the Rust identifiers are English.

use serde::{Deserialize, Serialize};

/// Cash-flow direction of a transaction. Direction always lives here, never
/// in the numeric sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "Receita")]
    Income,
    #[serde(rename = "Despesa")]
    Expense,
}

serde_plain::derive_display_from_serialize!(Kind);
serde_plain::derive_fromstr_from_deserialize!(Kind);

/// How a transaction was paid. The first four are offered for manual entry;
/// the rest identify import channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Pix,
    Ted,
    Boleto,
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    Nubank,
}

serde_plain::derive_display_from_serialize!(PaymentMethod);
serde_plain::derive_fromstr_from_deserialize!(PaymentMethod);

/// Transaction category. Income and expense draw from distinct lists, with
/// `Outros` present in both.
///
/// The derived ordering (declaration order) is the canonical category order
/// used when analysis rows are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    // Income categories
    #[serde(rename = "Salário")]
    Salary,
    Freelance,
    #[serde(rename = "Aluguel")]
    Rental,
    #[serde(rename = "Investimentos")]
    Investments,
    #[serde(rename = "Reembolso")]
    Reimbursement,
    // Expense categories
    #[serde(rename = "Alimentação")]
    Food,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Moradia")]
    Housing,
    #[serde(rename = "Saúde")]
    Health,
    #[serde(rename = "Lazer")]
    Leisure,
    #[serde(rename = "Educação")]
    Education,
    #[serde(rename = "Compras")]
    Shopping,
    #[serde(rename = "Assinaturas")]
    Subscriptions,
    #[serde(rename = "Dívidas")]
    Debts,
    // Valid for either kind
    #[serde(rename = "Outros")]
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

const INCOME_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Freelance,
    Category::Rental,
    Category::Investments,
    Category::Reimbursement,
    Category::Other,
];

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::Transport,
    Category::Housing,
    Category::Health,
    Category::Leisure,
    Category::Education,
    Category::Shopping,
    Category::Subscriptions,
    Category::Debts,
    Category::Other,
];

impl Category {
    /// The categories valid for `kind`.
    pub fn for_kind(kind: Kind) -> &'static [Category] {
        match kind {
            Kind::Income => INCOME_CATEGORIES,
            Kind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Whether this category is a member of the list for `kind`.
    pub fn allows(&self, kind: Kind) -> bool {
        Self::for_kind(kind).contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_wire_strings() {
        assert_eq!(Kind::Income.to_string(), "Receita");
        assert_eq!(Kind::Expense.to_string(), "Despesa");
        assert_eq!(Kind::from_str("Despesa").unwrap(), Kind::Expense);
    }

    #[test]
    fn test_payment_method_wire_strings() {
        assert_eq!(PaymentMethod::Cash.to_string(), "Dinheiro");
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Cartão de Crédito");
        assert_eq!(PaymentMethod::from_str("Pix").unwrap(), PaymentMethod::Pix);
        assert_eq!(
            PaymentMethod::from_str("Cartão de Crédito").unwrap(),
            PaymentMethod::CreditCard
        );
    }

    #[test]
    fn test_category_wire_strings() {
        assert_eq!(Category::Food.to_string(), "Alimentação");
        assert_eq!(Category::from_str("Saúde").unwrap(), Category::Health);
        assert_eq!(Category::from_str("Outros").unwrap(), Category::Other);
        assert!(Category::from_str("Inexistente").is_err());
    }

    #[test]
    fn test_category_kind_membership() {
        assert!(Category::Food.allows(Kind::Expense));
        assert!(!Category::Food.allows(Kind::Income));
        assert!(Category::Salary.allows(Kind::Income));
        assert!(!Category::Salary.allows(Kind::Expense));
        // "Outros" belongs to both lists.
        assert!(Category::Other.allows(Kind::Income));
        assert!(Category::Other.allows(Kind::Expense));
    }
}
