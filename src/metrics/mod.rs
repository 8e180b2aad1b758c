//! Goodness-of-fit metrics for the held-out partition

/// R² and MAE for one target. Both are `None` when the held-out partition
/// is empty: no rows means the metrics are undefined, not zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub r2: Option<f64>,
    pub mae: Option<f64>,
}

/// Evaluate predictions against true held-out values.
pub fn evaluate(truth: &[f64], predicted: &[f64]) -> RegressionMetrics {
    if truth.is_empty() {
        return RegressionMetrics { r2: None, mae: None };
    }
    RegressionMetrics {
        r2: Some(r2_score(truth, predicted)),
        mae: Some(mean_absolute_error(truth, predicted)),
    }
}

/// Coefficient of determination. For a constant target, 1.0 when residuals
/// are also zero, else 0.0.
pub fn r2_score(truth: &[f64], predicted: &[f64]) -> f64 {
    let mean = truth.iter().sum::<f64>() / truth.len() as f64;
    let ss_tot: f64 = truth.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = truth
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Mean absolute error.
pub fn mean_absolute_error(truth: &[f64], predicted: &[f64]) -> f64 {
    truth
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).abs())
        .sum::<f64>()
        / truth.len() as f64
}
