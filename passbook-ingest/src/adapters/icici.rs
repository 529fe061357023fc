//! ICICI Bank account statement export.
//!
//!   S No.,Value Date,Transaction Date,Cheque Number,Transaction Remarks,Withdrawal Amount (INR ),Deposit Amount (INR ),Balance (INR )
//!   1,19/02/2025,19/02/2025,-,UPI/SWIGGY/...,850.50,0.00,32500.00

use super::{BankAdapter, ColumnCandidates, DateLayout, YearDigits};

pub static ICICI: BankAdapter = BankAdapter {
    code: "icici",
    name: "ICICI Bank",
    columns: ColumnCandidates {
        date: &["transactiondate", "trandate", "date"],
        description: &[
            "transactionremarks",
            "remarks",
            "particulars",
            "narration",
            "description",
        ],
        debit: &["withdrawal", "debit"],
        credit: &["deposit", "credit"],
        balance: &["balance"],
    },
    amount_hints: &["amount", "amt"],
    signature: &["transactionremarks"],
    date_layout: DateLayout {
        separator: '/',
        year: YearDigits::Four,
    },
};
