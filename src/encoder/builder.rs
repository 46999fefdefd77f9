use crate::domain::FULL_LEASE_YEARS;
use crate::encoder::schema::{FLOOR_AREA_SLOT, FeatureSchema, LeaseEncoding, OneHotGroup};
use crate::model::{NormalizedRecord, PredictError};

/// Dense feature values laid out in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector<'a> {
    schema: &'a FeatureSchema,
    values: Vec<f64>,
}

impl<'a> FeatureVector<'a> {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, slot: &str) -> Option<f64> {
        self.schema.index_of(slot).map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .slots()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Number of slots set to 1 within a one-hot group.
    pub fn group_hot_count(&self, group: OneHotGroup) -> usize {
        self.schema
            .group_indices(group)
            .into_iter()
            .filter(|&i| self.values[i] == 1.0)
            .count()
    }
}

/// Lease quantity as the schema expects it. Remaining years beyond the full
/// lease have no age and are rejected under either encoding.
pub fn lease_value(
    encoding: LeaseEncoding,
    lease_remaining_years: u32,
) -> Result<f64, PredictError> {
    let age = FULL_LEASE_YEARS
        .checked_sub(lease_remaining_years)
        .ok_or(PredictError::DomainBoundsViolation {
            field: "lease_remaining_years",
            value: f64::from(lease_remaining_years),
            min: 0.0,
            max: f64::from(FULL_LEASE_YEARS),
        })?;
    Ok(match encoding {
        LeaseEncoding::LeaseAge => f64::from(age),
        LeaseEncoding::LeaseRemaining => f64::from(lease_remaining_years),
    })
}

/// Writes a normalized record into a zeroed vector shaped by `schema`.
pub fn build<'a>(
    schema: &'a FeatureSchema,
    record: &NormalizedRecord,
) -> Result<FeatureVector<'a>, PredictError> {
    let mut values = vec![0.0; schema.len()];

    let encoding = schema.lease_encoding();
    values[slot_index(schema, FLOOR_AREA_SLOT)?] = record.floor_area_sqm;
    values[slot_index(schema, encoding.slot())?] =
        lease_value(encoding, record.lease_remaining_years)?;

    let active = [
        (OneHotGroup::Region, record.region),
        (OneHotGroup::FlatType, record.flat_type),
        (OneHotGroup::FlatModelCategory, record.flat_model_category),
        (OneHotGroup::StoreyCategory, record.storey_category),
    ];
    for (group, value) in active {
        let slot = group.slot_name(value);
        values[slot_index(schema, &slot)?] = 1.0;
    }

    Ok(FeatureVector { schema, values })
}

fn slot_index(schema: &FeatureSchema, slot: &str) -> Result<usize, PredictError> {
    schema
        .index_of(slot)
        .ok_or_else(|| PredictError::SchemaMismatch {
            slot: slot.to_string(),
            schema: schema.name().to_string(),
        })
}
