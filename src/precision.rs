use crate::errors::GeometryError;

/// Grid that the topology fixer snaps coordinates onto. A cell is
/// `1 / scale` units wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionModel {
    scale: f64,
}

impl Default for PrecisionModel {
    /// 4096 tile units over a 256 pixel tile.
    fn default() -> Self {
        PrecisionModel { scale: 16. }
    }
}

impl PrecisionModel {
    pub fn new(scale: f64) -> Result<Self, GeometryError> {
        if !scale.is_finite() || scale <= 0. {
            return Err(GeometryError::invalid(
                "precision_model_scale",
                format!("grid scale must be positive and finite, got {}", scale),
            ));
        }
        Ok(PrecisionModel { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn grid_size(&self) -> f64 {
        1. / self.scale
    }

    /// Round `value` to the nearest grid line, halves up.
    pub fn make_precise(&self, value: f64) -> f64 {
        (value * self.scale + 0.5).floor() / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let model = PrecisionModel::default();
        assert_eq!(model.scale(), 16.);
        assert_eq!(model.grid_size(), 0.0625);
    }

    #[test]
    fn test_make_precise() {
        let model = PrecisionModel::new(4.).unwrap();
        assert_eq!(model.make_precise(1.1), 1.0);
        assert_eq!(model.make_precise(1.125), 1.25);
        assert_eq!(model.make_precise(-1.125), -1.0);
        assert_eq!(model.make_precise(-1.2), -1.25);
    }

    #[test]
    fn test_rejects_bad_scales() {
        assert!(PrecisionModel::new(0.).is_err());
        assert!(PrecisionModel::new(-2.).is_err());
        assert!(PrecisionModel::new(std::f64::NAN).is_err());
        assert!(PrecisionModel::new(std::f64::INFINITY).is_err());
    }
}
