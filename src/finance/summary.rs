//! Ledger totals for the dashboard. Computed in memory from the fetched
//! rows; nothing is persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use super::repo::{Transaction, TransactionKind};

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u8,
    pub income: f64,
    pub expense: f64,
    pub extra: f64,
}

#[derive(Debug, Serialize)]
pub struct FinanceSummary {
    pub income: f64,
    pub expense: f64,
    pub extra: f64,
    /// income + extra - expense
    pub balance: f64,
    pub months: Vec<MonthBucket>,
}

pub fn summarize(transactions: &[Transaction]) -> FinanceSummary {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut extra = 0.0;
    let mut buckets: BTreeMap<(i32, u8), MonthBucket> = BTreeMap::new();

    for tx in transactions {
        let key = (tx.date.year(), u8::from(tx.date.month()));
        let bucket = buckets.entry(key).or_insert_with(|| MonthBucket {
            year: key.0,
            month: key.1,
            ..Default::default()
        });
        match tx.kind {
            TransactionKind::Income => {
                income += tx.value;
                bucket.income += tx.value;
            }
            TransactionKind::Expense => {
                expense += tx.value;
                bucket.expense += tx.value;
            }
            TransactionKind::Extra => {
                extra += tx.value;
                bucket.extra += tx.value;
            }
        }
    }

    FinanceSummary {
        income,
        expense,
        extra,
        balance: income + extra - expense,
        months: buckets.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn tx(date: time::Date, value: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            description: "entry".into(),
            value,
            kind,
            category: "general".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn totals_partition_by_kind() {
        let txs = vec![
            tx(date!(2026 - 01 - 10), 100.0, TransactionKind::Income),
            tx(date!(2026 - 01 - 15), 40.0, TransactionKind::Expense),
            tx(date!(2026 - 01 - 20), 10.0, TransactionKind::Extra),
            tx(date!(2026 - 02 - 01), 200.0, TransactionKind::Income),
        ];

        let s = summarize(&txs);
        assert_eq!(s.income, 300.0);
        assert_eq!(s.expense, 40.0);
        assert_eq!(s.extra, 10.0);
        assert_eq!(s.balance, 270.0);
    }

    #[test]
    fn months_are_bucketed_in_order() {
        let txs = vec![
            tx(date!(2026 - 02 - 01), 200.0, TransactionKind::Income),
            tx(date!(2025 - 12 - 31), 50.0, TransactionKind::Expense),
            tx(date!(2026 - 01 - 10), 100.0, TransactionKind::Income),
        ];

        let s = summarize(&txs);
        let keys: Vec<_> = s.months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2025, 12), (2026, 1), (2026, 2)]);
        assert_eq!(s.months[0].expense, 50.0);
        assert_eq!(s.months[1].income, 100.0);
    }

    #[test]
    fn empty_ledger_yields_zero_summary() {
        let s = summarize(&[]);
        assert_eq!(s.income, 0.0);
        assert_eq!(s.balance, 0.0);
        assert!(s.months.is_empty());
    }
}
