//! Representative-salary rules used by the salary aggregates.
//!
//! A bound of `0` means "not specified". When both bounds are given, the
//! lower one is used and the upper one is ignored.

use rust_decimal::Decimal;

use crate::config::DEFAULT_USD_RATE;
use crate::dto::vacancy_dto::VacancyView;

pub const RUR: &str = "RUR";
pub const USD: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPolicy {
    usd_rate: Decimal,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_USD_RATE))
    }
}

impl SalaryPolicy {
    pub fn new(usd_rate: Decimal) -> Self {
        Self { usd_rate }
    }

    /// Single salary figure for one vacancy, in roubles. Unknown currencies
    /// yield zero.
    pub fn representative(&self, salary_from: i32, salary_to: i32, currency: &str) -> Decimal {
        let base = match (salary_from, salary_to) {
            (0, 0) => return Decimal::ZERO,
            (0, to) => to,
            (from, _) => from,
        };

        match currency {
            USD => Decimal::from(base) * self.usd_rate,
            RUR => Decimal::from(base),
            _ => Decimal::ZERO,
        }
    }

    /// Mean of the representatives over every vacancy, rounded to two places.
    /// Zero representatives still count. `None` when there is nothing to average.
    pub fn average<'a, I>(&self, vacancies: I) -> Option<Decimal>
    where
        I: IntoIterator<Item = &'a VacancyView>,
    {
        let (sum, count) = vacancies
            .into_iter()
            .fold((Decimal::ZERO, 0u64), |(sum, count), v| {
                (
                    sum + self.representative(v.salary_from, v.salary_to, &v.currency),
                    count + 1,
                )
            });

        if count == 0 {
            return None;
        }
        Some((sum / Decimal::from(count)).round_dp(2))
    }
}

/// Whether a vacancy's raw bounds reach `average`.
///
/// Reads the stored bounds as-is: no currency conversion is applied here.
pub fn meets_average(salary_from: i32, salary_to: i32, average: Decimal) -> bool {
    match (salary_from, salary_to) {
        (0, 0) => false,
        (0, to) => Decimal::from(to) >= average,
        (from, _) => Decimal::from(from) >= average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(salary_from: i32, salary_to: i32, currency: &str) -> VacancyView {
        VacancyView {
            company_name: "Acme".into(),
            vacancy_name: "Developer".into(),
            salary_from,
            salary_to,
            currency: currency.into(),
            vacancy_url: "https://hh.ru/vacancy/1".into(),
        }
    }

    #[test]
    fn representative_branches() {
        let policy = SalaryPolicy::default();
        assert_eq!(policy.representative(0, 1000, RUR), Decimal::from(1000));
        assert_eq!(policy.representative(800, 0, RUR), Decimal::from(800));
        assert_eq!(policy.representative(100, 200, RUR), Decimal::from(100));
        assert_eq!(policy.representative(0, 0, RUR), Decimal::ZERO);
        assert_eq!(policy.representative(2000, 0, USD), Decimal::from(184_000));
        assert_eq!(policy.representative(0, 10, USD), Decimal::from(920));
    }

    #[test]
    fn unknown_currency_counts_as_zero() {
        let policy = SalaryPolicy::default();
        assert_eq!(policy.representative(5000, 6000, "EUR"), Decimal::ZERO);
        assert_eq!(policy.representative(5000, 0, "rur"), Decimal::ZERO);
    }

    #[test]
    fn average_mixes_currencies() {
        let policy = SalaryPolicy::default();
        let rows = [view(0, 1000, RUR), view(2000, 0, USD)];
        assert_eq!(policy.average(&rows), Some(Decimal::new(9_250_000, 2)));
    }

    #[test]
    fn average_uses_lower_bound_when_both_given() {
        let policy = SalaryPolicy::default();
        assert_eq!(policy.average(&[view(100, 200, RUR)]), Some(Decimal::from(100)));
    }

    #[test]
    fn average_of_unspecified_salary_is_zero() {
        let policy = SalaryPolicy::default();
        assert_eq!(policy.average(&[view(0, 0, RUR)]), Some(Decimal::ZERO));
    }

    #[test]
    fn zero_rows_stay_in_the_denominator() {
        let policy = SalaryPolicy::default();
        let rows = [view(300, 0, RUR), view(0, 0, RUR), view(900, 0, "KZT")];
        assert_eq!(policy.average(&rows), Some(Decimal::from(100)));
    }

    #[test]
    fn average_rounds_to_two_places() {
        let policy = SalaryPolicy::default();
        let rows = [view(100, 0, RUR), view(0, 0, RUR), view(0, 0, RUR)];
        assert_eq!(policy.average(&rows), Some(Decimal::new(3333, 2)));
    }

    #[test]
    fn average_of_nothing_is_none() {
        let policy = SalaryPolicy::default();
        let rows: [VacancyView; 0] = [];
        assert_eq!(policy.average(&rows), None);
    }

    #[test]
    fn custom_rate_applies_to_usd_only() {
        let policy = SalaryPolicy::new(Decimal::from(100));
        assert_eq!(policy.representative(10, 0, USD), Decimal::from(1000));
        assert_eq!(policy.representative(10, 0, RUR), Decimal::from(10));
    }

    #[test]
    fn meets_average_reads_raw_bounds() {
        let average = Decimal::from(1000);
        assert!(meets_average(0, 1000, average));
        assert!(!meets_average(0, 999, average));
        assert!(meets_average(1000, 0, average));
        assert!(meets_average(1500, 200, average));
        assert!(!meets_average(500, 5000, average));
        assert!(!meets_average(0, 0, Decimal::ZERO));
    }

    #[test]
    fn usd_bounds_are_not_converted_when_filtering() {
        assert!(!meets_average(2000, 0, Decimal::new(9_250_000, 2)));
    }
}
