//! Suggested category labels per transaction kind.
//!
//! The lists only seed the form: stored transactions may carry any
//! non-empty label.

use crate::TransactionKind;

const INCOME: &[&str] = &["工资", "奖金", "理财", "兼职", "其他"];
const EXPENSE: &[&str] = &["餐饮", "交通", "购物", "娱乐", "住房", "医疗", "其他"];

/// Ordered suggestions for `kind`, most common first.
#[must_use]
pub fn suggestions(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME,
        TransactionKind::Expense => EXPENSE,
    }
}

/// Category the form switches to when the kind changes.
#[must_use]
pub fn default_for(kind: TransactionKind) -> &'static str {
    // Both lists are non-empty constants.
    suggestions(kind).first().copied().unwrap_or("其他")
}

/// Returns `true` if `category` is one of the suggestions for `kind`.
#[must_use]
pub fn is_suggested(kind: TransactionKind, category: &str) -> bool {
    suggestions(kind).contains(&category.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_suggestion() {
        assert_eq!(default_for(TransactionKind::Expense), "餐饮");
        assert_eq!(default_for(TransactionKind::Income), "工资");
    }

    #[test]
    fn lists_are_distinct_per_kind() {
        assert!(is_suggested(TransactionKind::Income, "工资"));
        assert!(!is_suggested(TransactionKind::Expense, "工资"));
        assert!(is_suggested(TransactionKind::Expense, " 交通 "));
    }
}
