//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, AccountSummary, Money};

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.holder.full_name().len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<36}  {:<name_width$}  {:<8}  {:>12}  {:>5}\n",
        "ID",
        "Holder",
        "Type",
        "Balance",
        "Txns",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width));

    for summary in summaries {
        output.push_str(&format!(
            "{:<36}  {:<name_width$}  {:<8}  {:>12}  {:>5}\n",
            summary.id.to_string(),
            summary.holder.full_name(),
            summary.category.to_string(),
            summary.balance.format_with_symbol(symbol),
            summary.transaction_count,
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.balance).sum();
    output.push_str(&separator(name_width));
    output.push_str(&format!(
        "{:<36}  {:<name_width$}  {:<8}  {:>12}\n",
        "TOTAL",
        "",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
    ));

    output
}

fn separator(name_width: usize) -> String {
    format!(
        "{:-<36}  {:-<name_width$}  {:-<8}  {:->12}  {:->5}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    )
}

/// Format a single account's details
pub fn format_account_details(account: &Account, symbol: &str) -> String {
    let holder = account.holder();

    let mut output = String::new();
    output.push_str(&format!("Account ID: {}\n", account.id()));
    output.push_str(&format!("Account Holder: {}\n", holder.full_name()));
    output.push_str(&format!("Age: {}\n", holder.age));
    output.push_str(&format!("State: {}\n", holder.state));
    output.push_str(&format!("Job: {}\n", holder.job));
    output.push_str(&format!("Account Type: {}\n", account.category()));
    output.push_str(&format!(
        "Balance: {}\n",
        account.balance().format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transactions: {}\n", account.transactions().len()));
    output.push_str(&format!(
        "Opened: {}\n",
        account.created_at().format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
