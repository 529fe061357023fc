//! Axis Bank account statement export. Dates are dash separated (DD-MM-YYYY).
//!
//!   SRL NO,Tran Date,CHQNO,PARTICULARS,DR,CR,BAL,SOL
//!   1,19-02-2025,,UPI/P2M/SWIGGY/...,850.50,,32500.00,1234

use super::{BankAdapter, ColumnCandidates, DateLayout, YearDigits};

pub static AXIS: BankAdapter = BankAdapter {
    code: "axis",
    name: "Axis Bank",
    columns: ColumnCandidates {
        date: &["trandate", "transactiondate", "date"],
        description: &["particulars", "narration", "description"],
        debit: &["debit", "withdrawal", "dr"],
        credit: &["credit", "deposit", "cr"],
        balance: &["balance", "bal"],
    },
    amount_hints: &["amount", "amt", "chq"],
    signature: &["trandate", "particulars"],
    date_layout: DateLayout {
        separator: '-',
        year: YearDigits::Four,
    },
};
