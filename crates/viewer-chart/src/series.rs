//! Plottable series of labeled samples.

/// One labeled sample on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// An ordered series of samples plus axis metadata.
#[derive(Debug, Clone)]
pub struct Series {
    pub points: Vec<DataPoint>,
    /// Y-axis label, e.g. "CDOM (m⁻¹)".
    pub axis_label: String,
}

impl Series {
    pub fn new(axis_label: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            axis_label: axis_label.into(),
        }
    }

    pub fn with_points(axis_label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            points,
            axis_label: axis_label.into(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(DataPoint::new(label, value));
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Largest finite value in the series, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value_ignores_non_finite() {
        let series = Series::with_points(
            "Chl-a (mg m⁻³)",
            vec![
                DataPoint::new("a", 1.0),
                DataPoint::new("b", f64::NAN),
                DataPoint::new("c", 4.5),
            ],
        );
        assert_eq!(series.max_value(), Some(4.5));
    }

    #[test]
    fn test_max_value_empty() {
        let series = Series::new("SPM (mg L⁻¹)");
        assert_eq!(series.max_value(), None);
    }
}
