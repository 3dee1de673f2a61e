//! Text rendering of ledger views. Every function returns a `String` so the
//! shell decides where it goes and tests can inspect it.

use chrono::NaiveDate;
use colored::Colorize;

use crate::core::services::{icons, CategoryShare, LedgerSummary, Suggestion, SuggestionKind};
use crate::core::tracker::Dashboard;
use crate::domain::{Category, Displayable, Ledger, Transaction, TransactionKind};

const BAR_WIDTH: usize = 30;
const TITLE_WIDTH: usize = 24;

pub const EMPTY_LIST_MESSAGE: &str = "No transactions yet. Add your first transaction above!";
pub const EMPTY_CHART_MESSAGE: &str = "No expenses to display";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub currency: String,
    /// No ANSI colours and no glyphs.
    pub plain: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            plain: false,
        }
    }
}

impl RenderOptions {
    pub fn plain(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            plain: true,
        }
    }
}

/// Absolute amount with thousands grouping and two decimals. Signs are added
/// by callers that need them.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);
    match currency {
        "USD" => format!("${grouped}.{cents}"),
        code => format!("{grouped}.{cents} {code}"),
    }
}

/// `Jan 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn paint_hex(text: String, hex: &str, opts: &RenderOptions) -> String {
    if opts.plain {
        return text;
    }
    match parse_hex(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text,
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let raw = hex.strip_prefix('#')?;
    if raw.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(raw.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn category_tag(category: Category, opts: &RenderOptions) -> String {
    if opts.plain {
        category.label().to_string()
    } else {
        category.display_label()
    }
}

pub fn render_summary(summary: &LedgerSummary, opts: &RenderOptions) -> String {
    let sign = if summary.is_negative() { "-" } else { "" };
    let balance = format!("{sign}{}", format_currency(summary.balance, &opts.currency));
    let income = format_currency(summary.total_income, &opts.currency);
    let expense = format_currency(summary.total_expense, &opts.currency);

    let (balance, income, expense) = if opts.plain {
        (balance, income, expense)
    } else {
        let balance = if summary.is_negative() {
            balance.bright_red().bold().to_string()
        } else {
            balance.bold().to_string()
        };
        (
            balance,
            income.green().to_string(),
            expense.red().to_string(),
        )
    };

    [
        format!("  Total Balance : {balance}"),
        format!("  Income        : {income}"),
        format!("  Expenses      : {expense}"),
    ]
    .join("\n")
}

/// Single list row: title, category tag, date, signed amount and id.
pub fn render_transaction_row(txn: &Transaction, opts: &RenderOptions) -> String {
    let amount = format!(
        "{}{}",
        txn.kind.sign(),
        format_currency(txn.amount, &opts.currency)
    );
    let amount = match (opts.plain, txn.kind) {
        (true, _) => amount,
        (false, TransactionKind::Income) => amount.green().to_string(),
        (false, TransactionKind::Expense) => amount.red().to_string(),
    };
    let mut title: String = txn.title.chars().take(TITLE_WIDTH).collect();
    if txn.title.chars().count() > TITLE_WIDTH {
        title.pop();
        title.push('…');
    }
    format!(
        "  {:<width$}  [{}]  {}  {}  (id {})",
        title,
        category_tag(txn.category, opts),
        format_date(txn.date),
        amount,
        txn.id,
        width = TITLE_WIDTH
    )
}

pub fn render_transactions(ledger: &Ledger, opts: &RenderOptions) -> String {
    if ledger.is_empty() {
        return format!("  {EMPTY_LIST_MESSAGE}");
    }
    ledger
        .iter()
        .map(|txn| render_transaction_row(txn, opts))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Horizontal bar per category followed by a percentage legend.
pub fn render_chart(shares: &[CategoryShare], opts: &RenderOptions) -> String {
    if shares.is_empty() {
        return format!("  {EMPTY_CHART_MESSAGE}");
    }

    let label_width = shares
        .iter()
        .map(|share| share.category.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(shares.len() * 2 + 1);
    for share in shares {
        let filled = ((share.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.min(BAR_WIDTH));
        let padding = " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH));
        lines.push(format!(
            "  {:<label_width$}  {}{}  {}",
            share.category.label(),
            paint_hex(bar, share.category.color(), opts),
            padding,
            format_currency(share.amount, &opts.currency),
        ));
    }

    lines.push(String::new());
    for share in shares {
        let marker = paint_hex("●".to_string(), share.category.color(), opts);
        lines.push(format!(
            "  {} {}: {}%",
            if opts.plain { "-".to_string() } else { marker },
            category_tag(share.category, opts),
            share.percentage_label()
        ));
    }
    lines.join("\n")
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        icons::LIGHTBULB => "💡",
        icons::WARNING => "⚠️",
        icons::TROPHY => "🏆",
        icons::CHART_PIE => "📊",
        icons::PLUS_CIRCLE => "➕",
        icons::PIGGY_BANK => "🐷",
        _ => "•",
    }
}

fn kind_badge(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::Tip => "TIP",
        SuggestionKind::Budget => "BUDGET",
        SuggestionKind::Achievement => "ACHIEVEMENT",
    }
}

pub fn render_suggestions(suggestions: &[Suggestion], opts: &RenderOptions) -> String {
    suggestions
        .iter()
        .map(|suggestion| {
            let badge = format!("[{}]", kind_badge(suggestion.kind));
            let heading = if opts.plain {
                format!("  {badge} {}", suggestion.title)
            } else {
                let badge = match suggestion.kind {
                    SuggestionKind::Tip => badge.cyan(),
                    SuggestionKind::Budget => badge.yellow(),
                    SuggestionKind::Achievement => badge.green(),
                };
                format!(
                    "  {badge} {} {}",
                    icon_glyph(&suggestion.icon),
                    suggestion.title.bold()
                )
            };
            format!("{heading}\n      {}", suggestion.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section_title(title: &str, opts: &RenderOptions) -> String {
    let text = format!("=== {title} ===");
    if opts.plain {
        text
    } else {
        text.bold().to_string()
    }
}

/// Full redraw: summary cards, transactions, chart and suggestions.
pub fn render_dashboard(dashboard: &Dashboard, ledger: &Ledger, opts: &RenderOptions) -> String {
    [
        section_title("Summary", opts),
        render_summary(&dashboard.summary, opts),
        section_title("Recent Transactions", opts),
        render_transactions(ledger, opts),
        section_title("Expense Breakdown", opts),
        render_chart(&dashboard.breakdown, opts),
        section_title("Smart Suggestions", opts),
        render_suggestions(&dashboard.suggestions, opts),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{SuggestionService, SummaryService, SuggestionThresholds};

    fn opts() -> RenderOptions {
        RenderOptions::plain("USD")
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Ledger {
        Ledger::from_transactions(vec![
            Transaction::new(3, "Groceries", 60.0, TransactionKind::Expense, Category::Food, day(2024, 1, 5)),
            Transaction::new(2, "Power bill", 40.0, TransactionKind::Expense, Category::Bills, day(2024, 1, 4)),
            Transaction::new(1, "Salary", 1234.5, TransactionKind::Income, Category::Salary, day(2024, 1, 1)),
        ])
    }

    #[test]
    fn currency_groups_thousands_and_drops_sign() {
        assert_eq!(format_currency(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_currency(-42.0, "USD"), "$42.00");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
        assert_eq!(format_currency(1234.56, "EUR"), "1,234.56 EUR");
        assert_eq!(format_currency(12.5, "GBP"), "12.50 GBP");
        assert_eq!(format_currency(12.5, "CHF"), "12.50 CHF");
    }

    #[test]
    fn dates_use_short_month_names() {
        assert_eq!(format_date(day(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(format_date(day(2023, 12, 25)), "Dec 25, 2023");
    }

    #[test]
    fn negative_balance_shows_minus() {
        let summary = LedgerSummary {
            total_income: 10.0,
            total_expense: 30.0,
            balance: -20.0,
        };
        let text = render_summary(&summary, &opts());
        assert!(text.contains("Total Balance : -$20.00"));
        assert!(text.contains("Expenses      : $30.00"));
    }

    #[test]
    fn transaction_rows_show_sign_tag_and_id() {
        let text = render_transactions(&sample(), &opts());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Groceries"));
        assert!(lines[0].contains("[Food & Dining]"));
        assert!(lines[0].contains("-$60.00"));
        assert!(lines[0].contains("(id 3)"));
        assert!(lines[2].contains("+$1,234.50"));
    }

    #[test]
    fn empty_views_show_placeholders() {
        assert!(render_transactions(&Ledger::new(), &opts()).contains(EMPTY_LIST_MESSAGE));
        assert!(render_chart(&[], &opts()).contains(EMPTY_CHART_MESSAGE));
    }

    #[test]
    fn chart_legend_lists_one_decimal_percentages() {
        let totals = SummaryService::compute_category_totals(&sample());
        let text = render_chart(&SummaryService::category_breakdown(&totals), &opts());
        assert!(text.contains("- Food & Dining: 60.0%"));
        assert!(text.contains("- Bills & Utilities: 40.0%"));
        assert!(text.contains(&"█".repeat(18)));
    }

    #[test]
    fn suggestions_render_badges_and_messages() {
        let suggestions = SuggestionService::generate(&Ledger::new());
        let text = render_suggestions(&suggestions, &opts());
        assert!(text.contains("[TIP] Get Started"));
        assert!(text.contains("Add your first transaction"));
    }

    #[test]
    fn dashboard_contains_every_section() {
        let ledger = sample();
        let dashboard = Dashboard::from_ledger(&ledger, &SuggestionThresholds::default());
        let text = render_dashboard(&dashboard, &ledger, &opts());
        for section in [
            "=== Summary ===",
            "=== Recent Transactions ===",
            "=== Expense Breakdown ===",
            "=== Smart Suggestions ===",
        ] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("[ACHIEVEMENT] Great Saving!"));
    }

    #[test]
    fn hex_parsing_handles_bad_input() {
        assert_eq!(parse_hex("#2ECC71"), Some((0x2E, 0xCC, 0x71)));
        assert_eq!(parse_hex("2ECC71"), None);
        assert_eq!(parse_hex("#XYZXYZ"), None);
    }
}
