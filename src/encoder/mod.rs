// Encoder module: schema definition, bounds checks and the vector builder.

pub mod builder;
pub mod schema;

pub use builder::{FeatureVector, build};
pub use schema::{FeatureSchema, LeaseEncoding, OneHotGroup, SchemaDefinition};

use crate::model::{NormalizedRecord, PredictError, RawInputRecord};
use crate::normalizer::normalize_record;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + Into<f64>> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn check(&self, field: &'static str, value: T) -> Result<(), PredictError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(PredictError::DomainBoundsViolation {
                field,
                value: value.into(),
                min: self.min.into(),
                max: self.max.into(),
            })
        }
    }
}

/// Accepted ranges for the numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub floor_area_sqm: Range<f64>,
    pub lease_remaining_years: Range<u32>,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            floor_area_sqm: Range {
                min: 40.0,
                max: 150.0,
            },
            lease_remaining_years: Range { min: 70, max: 99 },
        }
    }
}

impl InputBounds {
    /// NaN floor areas fail the range test and are rejected too.
    pub fn check(&self, raw: &RawInputRecord) -> Result<(), PredictError> {
        self.floor_area_sqm.check("floor_area_sqm", raw.floor_area_sqm)?;
        self.lease_remaining_years
            .check("lease_remaining_years", raw.lease_remaining_years)
    }
}

/// Bounds check followed by category normalization; the record is ready for
/// [`build`] afterwards.
pub fn prepare(
    bounds: &InputBounds,
    raw: &RawInputRecord,
) -> Result<NormalizedRecord, PredictError> {
    bounds.check(raw)?;
    normalize_record(raw)
}

/// Full raw-record → feature-vector transform.
pub fn encode<'a>(
    schema: &'a FeatureSchema,
    bounds: &InputBounds,
    raw: &RawInputRecord,
) -> Result<FeatureVector<'a>, PredictError> {
    let record = prepare(bounds, raw)?;
    build(schema, &record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryKind;

    fn raw(floor_area_sqm: f64, lease_remaining_years: u32) -> RawInputRecord {
        RawInputRecord {
            floor_area_sqm,
            town: "WOODLANDS".into(),
            flat_type: "4 ROOM".into(),
            flat_model: "MODEL A".into(),
            lease_remaining_years,
            storey_category: "Mid Storey".into(),
        }
    }

    #[test]
    fn floor_area_bounds_are_inclusive() {
        let bounds = InputBounds::default();
        assert!(bounds.check(&raw(40.0, 90)).is_ok());
        assert!(bounds.check(&raw(150.0, 90)).is_ok());
        for area in [39.9, 150.1] {
            match bounds.check(&raw(area, 90)) {
                Err(PredictError::DomainBoundsViolation { field, value, .. }) => {
                    assert_eq!(field, "floor_area_sqm");
                    assert_eq!(value, area);
                }
                other => panic!("unexpected result for {area}: {other:?}"),
            }
        }
    }

    #[test]
    fn nan_floor_area_is_rejected() {
        assert!(InputBounds::default().check(&raw(f64::NAN, 90)).is_err());
    }

    #[test]
    fn lease_bounds() {
        let bounds = InputBounds::default();
        assert!(bounds.check(&raw(95.0, 70)).is_ok());
        assert!(bounds.check(&raw(95.0, 99)).is_ok());
        assert!(matches!(
            bounds.check(&raw(95.0, 69)),
            Err(PredictError::DomainBoundsViolation {
                field: "lease_remaining_years",
                ..
            })
        ));
        assert!(bounds.check(&raw(95.0, 100)).is_err());
    }

    #[test]
    fn bounds_are_checked_before_categories() {
        let mut record = raw(10.0, 90);
        record.town = "ATLANTIS".into();
        assert!(matches!(
            prepare(&InputBounds::default(), &record),
            Err(PredictError::DomainBoundsViolation { .. })
        ));
    }

    #[test]
    fn unknown_town_builds_no_vector() {
        let schema = FeatureSchema::lease_age();
        let mut record = raw(95.0, 90);
        record.town = "ATLANTIS".into();
        let err = encode(&schema, &InputBounds::default(), &record).unwrap_err();
        assert!(matches!(
            err,
            PredictError::UnknownCategoryValue {
                kind: CategoryKind::Town,
                ..
            }
        ));
    }

    #[test]
    fn encode_woodlands() {
        let schema = FeatureSchema::lease_age();
        let v = encode(&schema, &InputBounds::default(), &raw(95.0, 90)).unwrap();
        assert_eq!(v.get("region_North"), Some(1.0));
        assert_eq!(v.get("lease_age_years"), Some(9.0));
    }

    #[test]
    fn bounds_from_partial_json() {
        let bounds: InputBounds =
            serde_json::from_str(r#"{ "floor_area_sqm": { "min": 30.0, "max": 200.0 } }"#)
                .unwrap();
        assert_eq!(bounds.floor_area_sqm.max, 200.0);
        assert_eq!(
            bounds.lease_remaining_years,
            InputBounds::default().lease_remaining_years
        );
    }
}
