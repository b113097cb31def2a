//! Column-inference predicates.
//!
//! The upstream spreadsheet's headers are matched fuzzily: repayment
//! columns by prefix and the days-late column by substrings. The rules
//! are deliberately kept exactly as the dashboard has always applied
//! them, fragile as they are if the sheet's headers change.

/// Name of the repayment column excluded from the repaid family.
const REPAID_AMOUNTS: &str = "repaid_amounts";

/// Days-late column that must never drive the bucketing.
const DAYS_LATE_LASTINSTALLMENT: &str = "days_late_lastinstallment";

/// Whether a column participates in the `total_repaid` sum: lowercased
/// name starts with `repaid`, excluding `repaid_amounts` itself.
pub fn is_repaid_column(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.starts_with("repaid") && lowered != REPAID_AMOUNTS
}

/// The repaid columns of a header row, in source order.
pub fn repaid_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|name| is_repaid_column(name))
        .cloned()
        .collect()
}

/// Whether a column can serve as the days-late source: lowercased name
/// contains both `days` and `late`, excluding `days_late_lastinstallment`.
pub fn is_days_late_column(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.contains("days") && lowered.contains("late") && lowered != DAYS_LATE_LASTINSTALLMENT
}

/// First days-late column in source order, if any.
pub fn find_days_late_column(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .map(String::as_str)
        .find(|name| is_days_late_column(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[rstest]
    #[case("repaid_jan", true)]
    #[case("REPAID_FEB", true)]
    #[case("repaid", true)]
    #[case("repaid_amounts", false)]
    #[case("Repaid_Amounts", false)]
    #[case("officer", false)]
    #[case("unrepaid", false)]
    fn classifies_repaid_columns(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_repaid_column(name), expected);
    }

    #[test]
    fn repaid_columns_preserve_source_order() {
        let columns = header(&["repaid_feb", "officer", "repaid_jan", "repaid_amounts"]);
        assert_eq!(repaid_columns(&columns), ["repaid_feb", "repaid_jan"]);
    }

    #[rstest]
    #[case("days_late", true)]
    #[case("Days_Late_Current", true)]
    #[case("late_days", true)]
    #[case("days_late_lastinstallment", false)]
    #[case("DAYS_LATE_LASTINSTALLMENT", false)]
    #[case("days_overdue", false)]
    #[case("late_fee", false)]
    fn classifies_days_late_columns(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_days_late_column(name), expected);
    }

    #[test]
    fn find_days_late_column_takes_the_first_match() {
        let columns = header(&["days_late_lastinstallment", "days_late", "late_days"]);
        assert_eq!(find_days_late_column(&columns), Some("days_late"));
    }

    #[test]
    fn find_days_late_column_ignores_only_the_excluded_name() {
        let columns = header(&["officer", "days_late_lastinstallment"]);
        assert_eq!(find_days_late_column(&columns), None);
    }
}
