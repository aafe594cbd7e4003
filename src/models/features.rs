//! Feature encoding for the regression model.

use crate::domain::{FeatureVector, ValidatedRunner};

/// Encode a validated runner in training-schema order.
pub fn build_features(runner: &ValidatedRunner) -> FeatureVector {
    FeatureVector {
        sex: runner.sex().encoded(),
        age: runner.age(),
        reference_time_seconds: runner.reference_time_seconds(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sex;

    #[test]
    fn encodes_male_as_one_and_female_as_zero() {
        let male = ValidatedRunner::new(Sex::Male, 30, 1350);
        assert_eq!(
            build_features(&male),
            FeatureVector {
                sex: 1,
                age: 30,
                reference_time_seconds: 1350
            }
        );

        let female = ValidatedRunner::new(Sex::Female, 55, 2400);
        assert_eq!(build_features(&female).to_array(), [0.0, 55.0, 2400.0]);
    }
}
