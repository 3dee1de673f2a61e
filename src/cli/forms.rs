//! Input forms: turn command arguments or interactive answers into a
//! [`TransactionDraft`].

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::io::prompt_error;
use crate::domain::{Category, TransactionDraft, TransactionKind};
use crate::errors::{LedgerError, Result};

pub const ADD_USAGE: &str =
    "add <income|expense> <amount> <category> <title...> [--date YYYY-MM-DD]";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a decimal amount. Accepts a leading currency symbol and thousands
/// separators (`$1,250.00`).
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| LedgerError::InvalidInput(format!("`{raw}` is not a valid amount")))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "amount must be zero or positive, got `{raw}`"
        )));
    }
    Ok(amount)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        LedgerError::InvalidInput(format!("`{raw}` is not a date in YYYY-MM-DD form"))
    })
}

/// Builds a draft from `add` arguments. The date stays unset unless `--date`
/// is given, leaving the default to the tracker's clock.
pub fn draft_from_args(args: &[&str]) -> Result<TransactionDraft> {
    let mut positional = Vec::with_capacity(args.len());
    let mut date = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--date=") {
            date = Some(parse_date(value)?);
        } else if *arg == "--date" {
            let value = iter.next().ok_or_else(|| {
                LedgerError::InvalidInput("`--date` needs a value in YYYY-MM-DD form".into())
            })?;
            date = Some(parse_date(value)?);
        } else {
            positional.push(*arg);
        }
    }

    if positional.len() < 4 {
        return Err(LedgerError::InvalidInput(format!("usage: {ADD_USAGE}")));
    }

    let kind: TransactionKind = positional[0].parse()?;
    let amount = parse_amount(positional[1])?;
    let category: Category = positional[2].parse()?;
    let title = positional[3..].join(" ");

    let mut draft = TransactionDraft::new(title, amount, kind, category);
    draft.date = date;
    Ok(draft)
}

/// Step-by-step prompt used when `add` runs without arguments in a terminal.
pub struct TransactionWizard<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> TransactionWizard<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }

    pub fn run(&self, today: NaiveDate) -> Result<TransactionDraft> {
        let kinds = [TransactionKind::Expense, TransactionKind::Income];
        let kind_idx = Select::with_theme(self.theme)
            .with_prompt("Type")
            .items(&kinds.map(|kind| kind.to_string()))
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let title: String = Input::with_theme(self.theme)
            .with_prompt("Title")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if input.trim().is_empty() {
                    Err("title must not be empty".into())
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_error)?;

        let amount: String = Input::with_theme(self.theme)
            .with_prompt("Amount")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                parse_amount(input).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text()
            .map_err(prompt_error)?;

        let labels: Vec<String> = Category::ALL
            .iter()
            .map(|category| category.label().to_string())
            .collect();
        let category_idx = Select::with_theme(self.theme)
            .with_prompt("Category")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let date: String = Input::with_theme(self.theme)
            .with_prompt("Date")
            .default(today.format(DATE_FORMAT).to_string())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                parse_date(input).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text()
            .map_err(prompt_error)?;

        Ok(
            TransactionDraft::new(title, parse_amount(&amount)?, kinds[kind_idx], Category::ALL[category_idx])
                .on(parse_date(&date)?),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_decorated_amounts() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("$1,250.00").unwrap(), 1250.0);
        assert_eq!(parse_amount(" 0 ").unwrap(), 0.0);
    }

    #[test]
    fn rejects_negative_and_garbage_amounts() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("five").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn builds_draft_from_arguments() {
        let draft = draft_from_args(&["expense", "12.40", "food", "Team", "lunch"]).unwrap();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.amount, 12.4);
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.title, "Team lunch");
        assert_eq!(draft.date, None);
    }

    #[test]
    fn date_flag_can_appear_anywhere() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        let draft =
            draft_from_args(&["--date", "2024-02-29", "income", "900", "salary", "Pay"]).unwrap();
        assert_eq!(draft.date, expected);
        let draft = draft_from_args(&["income", "900", "salary", "Pay", "--date=2024-02-29"]).unwrap();
        assert_eq!(draft.date, expected);
    }

    #[test]
    fn missing_arguments_report_usage() {
        let err = draft_from_args(&["expense", "10", "food"]).unwrap_err();
        assert!(err.to_string().contains("usage"));
    }

    #[test]
    fn bad_fields_are_rejected() {
        assert!(draft_from_args(&["gift", "10", "food", "x"]).is_err());
        assert!(draft_from_args(&["expense", "10", "groceries", "x"]).is_err());
        assert!(draft_from_args(&["expense", "10", "food", "x", "--date", "02/03/2024"]).is_err());
        assert!(draft_from_args(&["expense", "10", "food", "x", "--date"]).is_err());
    }
}
