use serde::Serialize;

use crate::domain::{Category, Ledger, TransactionKind};

/// Income, expense and balance totals for a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl LedgerSummary {
    /// A negative balance is a display state, not an error.
    pub fn is_negative(&self) -> bool {
        self.balance < 0.0
    }
}

/// Expense totals per category, in order of first appearance in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    entries: Vec<(Category, f64)>,
}

impl CategoryTotals {
    fn accumulate(&mut self, category: Category, amount: f64) {
        match self.entries.iter_mut().find(|(key, _)| *key == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category, amount)),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every category total.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// Largest entry. Scans left to right and only replaces the current pick on
    /// a strictly greater total, so ties go to the category seen first.
    pub fn top(&self) -> Option<(Category, f64)> {
        let mut entries = self.iter();
        let first = entries.next()?;
        Some(entries.fold(first, |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        }))
    }
}

impl FromIterator<(Category, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::default();
        for (category, amount) in iter {
            totals.accumulate(category, amount);
        }
        totals
    }
}

/// One chart slice: a category total and its share of all expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
}

impl CategoryShare {
    /// Percentage with one decimal place, e.g. `"37.5"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Pure derivations over a [`Ledger`]. Calling any of these twice on the same
/// ledger yields identical results.
pub struct SummaryService;

impl SummaryService {
    pub fn compute_summary(ledger: &Ledger) -> LedgerSummary {
        let total_income = Self::sum_kind(ledger, TransactionKind::Income);
        let total_expense = Self::sum_kind(ledger, TransactionKind::Expense);
        LedgerSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    pub fn compute_category_totals(ledger: &Ledger) -> CategoryTotals {
        ledger
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| (txn.category, txn.amount))
            .collect()
    }

    pub fn top_category(totals: &CategoryTotals) -> Option<Category> {
        totals.top().map(|(category, _)| category)
    }

    /// Chart slices in first-appearance order. Shares are zero when every expense is zero.
    pub fn category_breakdown(totals: &CategoryTotals) -> Vec<CategoryShare> {
        let grand_total = totals.total();
        totals
            .iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: if grand_total > 0.0 {
                    amount / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    fn sum_kind(ledger: &Ledger, kind: TransactionKind) -> f64 {
        ledger
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use chrono::NaiveDate;

    fn entry(id: u64, amount: f64, kind: TransactionKind, category: Category) -> Transaction {
        Transaction::new(
            id,
            "entry",
            amount,
            kind,
            category,
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        )
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let summary = SummaryService::compute_summary(&Ledger::new());
        assert_eq!(summary, LedgerSummary::default());
        assert!(SummaryService::compute_category_totals(&Ledger::new()).is_empty());
    }

    #[test]
    fn summary_splits_by_kind() {
        let ledger = Ledger::from_transactions(vec![
            entry(3, 250.0, TransactionKind::Expense, Category::Shopping),
            entry(2, 1000.0, TransactionKind::Income, Category::Salary),
            entry(1, 100.0, TransactionKind::Expense, Category::Food),
        ]);
        let summary = SummaryService::compute_summary(&ledger);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 350.0);
        assert_eq!(summary.balance, 650.0);
        assert!(!summary.is_negative());
    }

    #[test]
    fn negative_balance_is_flagged() {
        let ledger = Ledger::from_transactions(vec![entry(
            1,
            20.0,
            TransactionKind::Expense,
            Category::Travel,
        )]);
        let summary = SummaryService::compute_summary(&ledger);
        assert_eq!(summary.balance, -20.0);
        assert!(summary.is_negative());
    }

    #[test]
    fn category_totals_ignore_income_and_keep_first_seen_order() {
        let ledger = Ledger::from_transactions(vec![
            entry(5, 10.0, TransactionKind::Expense, Category::Health),
            entry(4, 500.0, TransactionKind::Income, Category::Food),
            entry(3, 5.0, TransactionKind::Expense, Category::Food),
            entry(2, 15.0, TransactionKind::Expense, Category::Health),
            entry(1, 1.0, TransactionKind::Expense, Category::Bills),
        ]);
        let totals = SummaryService::compute_category_totals(&ledger);
        let collected: Vec<_> = totals.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Category::Health, 25.0),
                (Category::Food, 5.0),
                (Category::Bills, 1.0)
            ]
        );
        assert_eq!(totals.get(Category::Travel), None);
    }

    #[test]
    fn top_category_prefers_first_seen_on_tie() {
        let totals: CategoryTotals = vec![
            (Category::Bills, 500.0),
            (Category::Food, 500.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(SummaryService::top_category(&totals), Some(Category::Bills));
    }

    #[test]
    fn top_category_picks_strict_maximum() {
        let totals: CategoryTotals = vec![
            (Category::Bills, 50.0),
            (Category::Food, 75.0),
            (Category::Travel, 75.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(SummaryService::top_category(&totals), Some(Category::Food));
        assert_eq!(SummaryService::top_category(&CategoryTotals::default()), None);
    }

    #[test]
    fn breakdown_percentages_use_one_decimal() {
        let totals: CategoryTotals = vec![
            (Category::Food, 1.0),
            (Category::Bills, 2.0),
        ]
        .into_iter()
        .collect();
        let shares = SummaryService::category_breakdown(&totals);
        assert_eq!(shares[0].percentage_label(), "33.3");
        assert_eq!(shares[1].percentage_label(), "66.7");
        let sum: f64 = shares.iter().map(|share| share.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_of_zero_amounts_is_zero_percent() {
        let totals: CategoryTotals = vec![(Category::Other, 0.0)].into_iter().collect();
        let shares = SummaryService::category_breakdown(&totals);
        assert_eq!(shares[0].percentage, 0.0);
    }

    #[test]
    fn derivations_are_repeatable() {
        let ledger = Ledger::from_transactions(vec![
            entry(2, 0.1, TransactionKind::Expense, Category::Food),
            entry(1, 0.2, TransactionKind::Expense, Category::Food),
        ]);
        assert_eq!(
            SummaryService::compute_summary(&ledger),
            SummaryService::compute_summary(&ledger)
        );
        assert_eq!(
            SummaryService::compute_category_totals(&ledger),
            SummaryService::compute_category_totals(&ledger)
        );
    }
}
