use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::{PoisonError, RwLock};

/// 預設比較容差 0.000001
pub const DEFAULT_COMPARE_PRECISION: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

// 行程共用的容差。需要特定容差的呼叫端自行設定，用完後還原。
static COMPARE_PRECISION: RwLock<Decimal> = RwLock::new(DEFAULT_COMPARE_PRECISION);

pub fn compare_precision() -> Decimal {
    *COMPARE_PRECISION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

/// 設定容差並回傳先前的值，方便呼叫端還原
pub fn set_compare_precision(precision: Decimal) -> Decimal {
    let mut current = COMPARE_PRECISION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let previous = *current;
    *current = precision.abs();
    tracing::debug!("Compare precision changed from {} to {}", previous, *current);
    previous
}

/// 差的絕對值不超過 tolerance 即視為相等
pub fn is_close(a: &Decimal, b: &Decimal, tolerance: Decimal) -> bool {
    a.checked_sub(*b)
        .map(|difference| difference.abs() <= tolerance)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimals(pub Vec<Decimal>);

impl Decimals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由小到大排序
    pub fn sort(&mut self) {
        self.0.sort();
    }

    pub fn copy(&self) -> Decimals {
        self.clone()
    }

    /// 比較兩組數值。
    /// ordered 為 false 時先各自排序副本再比較；precise 為 false 時使用共用容差。
    pub fn equal(&self, other: &Decimals, ordered: bool, precise: bool) -> bool {
        if precise {
            self.equal_by(other, ordered, |a, b| a == b)
        } else {
            self.equal_within(other, ordered, compare_precision())
        }
    }

    /// 同 equal，但使用指定的容差
    pub fn equal_within(&self, other: &Decimals, ordered: bool, tolerance: Decimal) -> bool {
        self.equal_by(other, ordered, |a, b| is_close(a, b, tolerance))
    }

    fn equal_by<F>(&self, other: &Decimals, ordered: bool, eq: F) -> bool
    where
        F: Fn(&Decimal, &Decimal) -> bool,
    {
        if self.len() != other.len() {
            return false;
        }

        if ordered {
            return self.iter().zip(other.iter()).all(|(a, b)| eq(a, b));
        }

        let (mut left, mut right) = (self.copy(), other.copy());
        left.sort();
        right.sort();
        left.iter().zip(right.iter()).all(|(a, b)| eq(a, b))
    }

    /// 去除重複值，保留第一次出現的順序。與已保留的任一值在共用容差內即視為重複。
    pub fn remove_duplicates(&self) -> Decimals {
        self.remove_duplicates_within(compare_precision())
    }

    /// 同 remove_duplicates，但使用指定的容差；傳入零即為精確比較
    pub fn remove_duplicates_within(&self, tolerance: Decimal) -> Decimals {
        let mut result = Decimals::new();
        for value in self.iter() {
            if !result.iter().any(|kept| is_close(kept, value, tolerance)) {
                result.0.push(*value);
            }
        }
        result
    }
}

impl Deref for Decimals {
    type Target = [Decimal];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Decimal>> for Decimals {
    fn from(values: Vec<Decimal>) -> Self {
        Self(values)
    }
}

impl FromIterator<Decimal> for Decimals {
    fn from_iter<I: IntoIterator<Item = Decimal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Decimals {
    type Item = Decimal;
    type IntoIter = std::vec::IntoIter<Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimals(values: &[&str]) -> Decimals {
        values
            .iter()
            .map(|value| Decimal::from_str(value).unwrap())
            .collect()
    }

    fn tolerance(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_sort() {
        let mut values = decimals(&[
            "-1.25", "0", "1.25", "-1.26", "-1.259", "1", "-1.261", "1.249", "1.251", "1",
        ]);
        values.sort();
        let expected = decimals(&[
            "-1.261", "-1.26", "-1.259", "-1.25", "0", "1", "1", "1.249", "1.25", "1.251",
        ]);
        assert!(values.equal(&expected, true, true));
        assert_eq!(values, expected);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = decimals(&["2", "1"]);
        let mut copy = original.copy();
        copy.sort();
        assert_eq!(original, decimals(&["2", "1"]));
        assert_eq!(copy, decimals(&["1", "2"]));
    }

    #[test]
    fn test_equal_precise() {
        let cases = [
            (&["-1.25", "0", "1.25"][..], &["-1.25", "0", "1.25"][..], true, true),
            (&["-1.25", "0", "1.25"][..], &["-1.25", "0", "1.251"][..], true, false),
            (&["-1.251", "0", "1.25"][..], &["-1.25", "0", "1.25"][..], true, false),
            (&["-1.249", "0", "1.25"][..], &["-1.25", "0", "1.25"][..], true, false),
            (&["-1.25", "0", "1.25"][..], &["-1.25", "1.25", "0"][..], true, false),
            (&["-1.25", "0", "1.25"][..], &["-1.25", "1.25", "0"][..], false, true),
            (&["-1.25", "0", "1.25"][..], &["-1.25", "1.25", "0", "0"][..], false, false),
        ];

        for (i, (left, right, ordered, expected)) in cases.iter().enumerate() {
            let (left, right) = (decimals(left), decimals(right));
            assert_eq!(
                left.equal(&right, *ordered, true),
                *expected,
                "case {} ordered={}",
                i,
                ordered
            );
        }
    }

    #[test]
    fn test_unordered_equal_does_not_sort_inputs() {
        let left = decimals(&["3", "1", "2"]);
        let right = decimals(&["2", "3", "1"]);
        assert!(left.equal_within(&right, false, Decimal::ZERO));
        assert_eq!(left, decimals(&["3", "1", "2"]));
        assert_eq!(right, decimals(&["2", "3", "1"]));
    }

    #[test]
    fn test_equal_within_tolerance() {
        let left = decimals(&["-1.25", "0", "1.25"]);
        let right = decimals(&["-1.251", "0", "1.25"]);
        assert!(left.equal_within(&right, true, tolerance("0.01")));
        assert!(!left.equal_within(&right, true, tolerance("0.0001")));
        assert!(!left.equal(&right, true, true));
    }

    #[test]
    fn test_remove_duplicates_exact() {
        let values = decimals(&[
            "-1.25", "0", "1.25", "-1.26", "-1.259", "1", "-1.261", "1.249", "1.251", "1",
            "-1.26", "-1.261", "-1.259",
        ]);
        let expected = decimals(&[
            "-1.25", "0", "1.25", "-1.26", "-1.259", "1", "-1.261", "1.249", "1.251",
        ]);
        assert_eq!(values.remove_duplicates_within(Decimal::ZERO), expected);
    }

    #[test]
    fn test_remove_duplicates_within_tolerance() {
        let values = decimals(&[
            "-1.25", "0", "1.25", "-1.26", "-1.259", "1", "-1.261", "1.249", "1.251", "1",
            "-1.26", "-1.261", "-1.259",
        ]);
        let expected = decimals(&["-1.25", "0", "1.25", "1", "-1.261"]);
        assert_eq!(values.remove_duplicates_within(tolerance("0.01")), expected);
    }

    // 唯一會修改共用容差的測試
    #[test]
    fn test_shared_compare_precision() {
        let left = decimals(&["-1.25", "0", "1.25"]);
        let right = decimals(&["-1.251", "0", "1.25"]);

        assert_eq!(compare_precision(), DEFAULT_COMPARE_PRECISION);
        assert!(!left.equal(&right, true, false));

        let previous = set_compare_precision(tolerance("0.01"));
        assert!(left.equal(&right, true, false));
        assert!(!left.equal(&right, true, true));
        assert_eq!(
            decimals(&["1", "1.005", "2"]).remove_duplicates(),
            decimals(&["1", "2"])
        );

        set_compare_precision(previous);
        assert_eq!(compare_precision(), DEFAULT_COMPARE_PRECISION);
    }
}
