//! Monetary types for price, quantity and profit/loss representation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Position size represented as a Decimal for precision.
pub type Quantity = Decimal;

/// Profit or loss in currency units.
pub type Pnl = Decimal;

/// Ratio of two decimals as a float, `0.0` when the denominator is zero.
///
/// A quotient too large for a decimal is computed in floating point.
#[must_use]
pub fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient.to_f64().unwrap_or(0.0),
        None => numerator
            .to_f64()
            .zip(denominator.to_f64())
            .map_or(0.0, |(n, d)| n / d),
    }
}

/// Sum that clamps at [`Decimal::MAX`] / [`Decimal::MIN`] instead of
/// overflowing.
#[must_use]
pub fn total<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole * 100` as a float, `0.0` when `whole` is zero.
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_and_quantity_are_decimal() {
        let price: Price = dec!(1.50);
        let qty: Quantity = dec!(100);

        assert_eq!(price * qty, dec!(150.00));
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(dec!(5), Decimal::ZERO), 0.0);
        assert_eq!(ratio(dec!(5), dec!(2)), 2.5);
    }

    #[test]
    fn ratio_survives_a_quotient_beyond_decimal_range() {
        let huge = ratio(Decimal::MAX, Decimal::new(1, 20));
        assert!(huge.is_finite());
        assert!(huge > 1e48);
    }

    #[test]
    fn total_clamps_instead_of_overflowing() {
        assert_eq!(total([Decimal::MAX, dec!(1), Decimal::MAX]), Decimal::MAX);
        assert_eq!(total([Decimal::MIN, dec!(-1)]), Decimal::MIN);
        assert_eq!(total([dec!(1.5), dec!(-0.5)]), dec!(1.0));
        assert_eq!(total(Vec::<Decimal>::new()), Decimal::ZERO);
    }

    #[test]
    fn percent_guards_zero_whole() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
