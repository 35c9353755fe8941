//! Row count → height ceiling.

use crate::types::LayoutMetrics;

/// Extra half row added to every budget.
///
/// Absorbs sub-unit rounding in the host's layout so borderline content is
/// not cut one row early. Existing layouts depend on this exact value;
/// override it per component through `EllipsisProps::row_slack`.
pub const ROW_SLACK: f32 = 0.5;

/// Height ceiling a candidate must not exceed.
///
/// `ceil((rows + slack) * line_height + padding_top + padding_bottom)`.
/// Built fresh for every pass, never cached across content or style changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeightBudget(u32);

impl HeightBudget {
    /// Budget for `rows` rows. A row count of 0 is treated as 1.
    pub fn from_rows(rows: u32, metrics: &LayoutMetrics, slack: f32) -> Self {
        let rows = rows.max(1) as f32;
        let height = (rows + slack) * metrics.line_height + metrics.padding_top + metrics.padding_bottom;
        // Negative or NaN heights saturate to 0.
        Self(height.ceil() as u32)
    }

    /// A budget of exactly `height` units.
    pub const fn from_height(height: u32) -> Self {
        Self(height)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether content of `height` fits.
    #[inline]
    pub fn fits(self, height: f32) -> bool {
        height <= self.0 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(line_height: f32, top: f32, bottom: f32) -> LayoutMetrics {
        LayoutMetrics {
            line_height,
            padding_top: top,
            padding_bottom: bottom,
        }
    }

    #[test]
    fn test_budget_formula() {
        // (1 + 0.5) * 24 = 36
        assert_eq!(HeightBudget::from_rows(1, &metrics(24.0, 0.0, 0.0), ROW_SLACK).get(), 36);
        // (3 + 0.5) * 1 + 1 + 1 = 5.5 → 6
        assert_eq!(HeightBudget::from_rows(3, &metrics(1.0, 1.0, 1.0), ROW_SLACK).get(), 6);
        // (2 + 0.5) * 17 = 42.5 → 43
        assert_eq!(HeightBudget::from_rows(2, &metrics(17.0, 0.0, 0.0), ROW_SLACK).get(), 43);
    }

    #[test]
    fn test_zero_rows_clamped_to_one() {
        let m = metrics(24.0, 2.0, 2.0);
        assert_eq!(
            HeightBudget::from_rows(0, &m, ROW_SLACK),
            HeightBudget::from_rows(1, &m, ROW_SLACK)
        );
    }

    #[test]
    fn test_slack_is_overridable() {
        let m = metrics(10.0, 0.0, 0.0);
        assert_eq!(HeightBudget::from_rows(2, &m, 0.0).get(), 20);
        assert_eq!(HeightBudget::from_rows(2, &m, 0.25).get(), 23);
    }

    #[test]
    fn test_fits() {
        let budget = HeightBudget::from_height(36);
        assert!(budget.fits(24.0));
        assert!(budget.fits(36.0));
        assert!(!budget.fits(48.0));
    }

    #[test]
    fn test_degenerate_metrics_saturate() {
        assert_eq!(HeightBudget::from_rows(1, &metrics(-10.0, 0.0, 0.0), ROW_SLACK).get(), 0);
        assert_eq!(HeightBudget::from_rows(1, &metrics(f32::NAN, 0.0, 0.0), ROW_SLACK).get(), 0);
    }
}
