//! Model fitting and prediction
//!
//! One-hot encodes the categorical features, passes numericals through, and
//! feeds the combined vector to a gradient-boosted tree regressor. Two
//! independent [`FittedModel`] instances are trained per run (tickets,
//! revenue); they share the train/test mask but nothing else.


use std::collections::BTreeSet;

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ForecastError, Result};
use crate::features::FeatureRow;

/// Seed for the train/test split
pub const SPLIT_SEED: u64 = 42;

/// Fraction of history rows assigned to the training partition
pub const TRAIN_FRACTION: f64 = 0.85;

const ITERATIONS: usize = 100;
const MAX_DEPTH: u32 = 3;
const SHRINKAGE: f32 = 0.1;

/// Seeded 85/15 split mask: `true` marks a training row.
///
/// One mask is drawn per run and shared by both targets so their metrics are
/// computed on the same held-out rows. If every draw lands in the held-out
/// partition (only possible for tiny tables) the mask falls back to
/// all-training, which leaves the held-out set empty and metrics null.
pub fn train_mask(rows: usize) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    let mask: Vec<bool> = (0..rows)
        .map(|_| rng.random::<f64>() < TRAIN_FRACTION)
        .collect();
    if rows > 0 && !mask.iter().any(|&m| m) {
        return vec![true; rows];
    }
    mask
}

/// One-hot encoder over the four categorical columns.
///
/// Category vocabularies are sorted so the encoded layout is deterministic.
/// A value unseen at fit time encodes to all zeros instead of erroring.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    vocabularies: [Vec<String>; 4],
}

impl OneHotEncoder {
    /// Learn the category vocabularies from training rows
    pub fn fit(rows: &[FeatureRow]) -> Self {
        let mut sets: [BTreeSet<String>; 4] = Default::default();
        for row in rows {
            for (set, value) in sets.iter_mut().zip(row.categoricals()) {
                set.insert(value.to_string());
            }
        }
        Self {
            vocabularies: sets.map(|set| set.into_iter().collect()),
        }
    }

    /// Total width of the encoded categorical block
    pub fn width(&self) -> usize {
        self.vocabularies.iter().map(Vec::len).sum()
    }

    /// Encode one row's categoricals as indicator values
    pub fn encode(&self, row: &FeatureRow) -> Vec<f32> {
        let mut encoded = Vec::with_capacity(self.width());
        for (vocabulary, value) in self.vocabularies.iter().zip(row.categoricals()) {
            let hit = vocabulary.binary_search_by(|c| c.as_str().cmp(value)).ok();
            for index in 0..vocabulary.len() {
                encoded.push(if hit == Some(index) { 1.0 } else { 0.0 });
            }
        }
        encoded
    }
}

/// A fitted regression pipeline: encoder state plus booster state.
///
/// Created by [`FittedModel::fit`], used once for evaluation and once on the
/// future table, then dropped. No persistence across runs.
pub struct FittedModel {
    encoder: OneHotEncoder,
    booster: GBDT,
}

impl FittedModel {
    /// Fit the encoder and booster on training rows and their target values
    pub fn fit(rows: &[FeatureRow], targets: &[f64]) -> Result<Self> {
        if rows.is_empty() {
            return Err(ForecastError::Fit("no training rows".to_string()));
        }
        debug_assert_eq!(rows.len(), targets.len());

        let encoder = OneHotEncoder::fit(rows);
        let feature_size = encoder.width() + rows[0].numericals().len();

        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_max_depth(MAX_DEPTH);
        config.set_iterations(ITERATIONS);
        config.set_shrinkage(SHRINKAGE);
        config.set_loss("SquaredError");
        config.set_debug(false);
        // Sampling disabled so training is reproducible without a seed hook
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);

        let mut booster = GBDT::new(&config);
        let mut training: DataVec = rows
            .iter()
            .zip(targets)
            .map(|(row, &target)| {
                Data::new_training_data(vectorize(&encoder, row), 1.0, target as f32, None)
            })
            .collect();
        booster.fit(&mut training);

        Ok(Self { encoder, booster })
    }

    /// Predict raw (unclamped, unrounded) target values for a feature table.
    /// The table must use the same schema the model was fitted with.
    pub fn predict(&self, rows: &[FeatureRow]) -> Vec<f64> {
        if rows.is_empty() {
            return Vec::new();
        }
        let data: DataVec = rows
            .iter()
            .map(|row| Data::new_test_data(vectorize(&self.encoder, row), None))
            .collect();
        self.booster
            .predict(&data)
            .into_iter()
            .map(f64::from)
            .collect()
    }
}

fn vectorize(encoder: &OneHotEncoder, row: &FeatureRow) -> Vec<f32> {
    let mut features = encoder.encode(row);
    features.extend(row.numericals().into_iter().map(|v| v as f32));
    features
}
