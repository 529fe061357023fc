//! HDFC Bank savings/current account export.
//!
//! Header row follows several lines of account metadata:
//!   Date,Narration,Chq./Ref.No.,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
//!   21/02/25,SALARY FEB 2025,0000412,21/02/25,,50000.00,82500.00

use super::{BankAdapter, ColumnCandidates, DateLayout, YearDigits};

pub static HDFC: BankAdapter = BankAdapter {
    code: "hdfc",
    name: "HDFC Bank",
    columns: ColumnCandidates {
        date: &["date", "txndate", "dt"],
        description: &["narration", "description", "particulars"],
        debit: &["withdrawalamt", "withdrawal", "debit"],
        credit: &["depositamt", "deposit", "credit"],
        balance: &["closingbalance", "balance"],
    },
    amount_hints: &["amount", "amt", "chq"],
    signature: &["narration", "closingbalance"],
    date_layout: DateLayout {
        separator: '/',
        year: YearDigits::Either,
    },
};
