//! Fallback for exports without a recognizable bank signature.

use super::{BankAdapter, ColumnCandidates, DateLayout, YearDigits};

pub static GENERIC: BankAdapter = BankAdapter {
    code: "generic",
    name: "Generic CSV",
    columns: ColumnCandidates {
        date: &["date", "dt"],
        description: &["narration", "description", "particulars", "remarks", "details"],
        debit: &["debit", "withdrawal", "dr"],
        credit: &["credit", "deposit", "cr"],
        balance: &["balance", "bal"],
    },
    amount_hints: &["amount", "amt", "chq"],
    signature: &[],
    date_layout: DateLayout {
        separator: '/',
        year: YearDigits::Either,
    },
};
