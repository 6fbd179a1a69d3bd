use serde::{Deserialize, Serialize};

use prodparty_core::{DomainError, DomainResult, UomId};

/// Unit of measure.
///
/// `rounding` is the smallest representable step (e.g. `1.0` for units,
/// `0.01` for kilograms with gram precision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uom {
    pub id: UomId,
    pub symbol: String,
    pub rounding: f64,
}

impl Uom {
    pub fn new(id: UomId, symbol: impl Into<String>, rounding: f64) -> DomainResult<Self> {
        if !rounding.is_finite() || rounding <= 0.0 {
            return Err(DomainError::validation("uom rounding must be positive"));
        }
        Ok(Self {
            id,
            symbol: symbol.into(),
            rounding,
        })
    }

    /// Round `quantity` to the nearest multiple of the unit's rounding.
    pub fn round(&self, quantity: f64) -> f64 {
        let steps = (quantity / self.rounding).round();
        if !steps.is_finite() {
            // Finer than f64 can count in steps.
            return quantity;
        }
        // Re-derive from the decimal count to avoid 0.1 * 3 = 0.30000000000000004.
        let digits = (-self.rounding.log10()).ceil().clamp(0.0, 15.0) as i32;
        let factor = 10f64.powi(digits);
        ((steps * self.rounding) * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit() -> Uom {
        Uom::new(UomId::new(), "u", 1.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_rounding() {
        assert!(Uom::new(UomId::new(), "u", 0.0).is_err());
        assert!(Uom::new(UomId::new(), "u", -1.0).is_err());
        assert!(Uom::new(UomId::new(), "u", f64::NAN).is_err());
    }

    #[test]
    fn rounds_to_unit_steps() {
        assert_eq!(unit().round(2.4), 2.0);
        assert_eq!(unit().round(2.6), 3.0);
    }

    #[test]
    fn rounds_to_decimal_steps_without_float_noise() {
        let kg = Uom::new(UomId::new(), "kg", 0.01).unwrap();
        assert_eq!(kg.round(0.1 * 3.0), 0.3);
        assert_eq!(kg.round(1.234), 1.23);
    }

    #[test]
    fn tiny_rounding_stays_finite() {
        let fine = Uom::new(UomId::new(), "fine", 1e-320).unwrap();
        let rounded = fine.round(2.5);
        assert!(rounded.is_finite());
        assert_eq!(rounded, 2.5);

        let small = Uom::new(UomId::new(), "small", 1e-300).unwrap();
        assert_eq!(small.round(2.5), 2.5);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(q in 0.0f64..1_000_000.0f64) {
            let kg = Uom::new(UomId::new(), "kg", 0.001).unwrap();
            let once = kg.round(q);
            prop_assert_eq!(kg.round(once), once);
        }
    }
}
