use crate::domain::{
    FLAT_MODEL_CATEGORIES, FLAT_MODELS, FLAT_TYPES, MODEL_CATEGORIES, REGIONS, STOREY_CATEGORIES,
    TOWN_REGIONS, TOWNS,
};
use crate::model::{CategoryKind, NormalizedRecord, PredictError, RawInputRecord};
use tracing::{debug, info};

/// Maps a raw town or flat model onto the coarse category used by the model.
/// Flat type and storey band have no coarser category and map onto themselves.
pub fn normalize(kind: CategoryKind, raw_value: &str) -> Result<&'static str, PredictError> {
    match kind {
        CategoryKind::Town => lookup(kind, TOWN_REGIONS, raw_value),
        CategoryKind::FlatModel => lookup(kind, FLAT_MODEL_CATEGORIES, raw_value),
        CategoryKind::FlatType | CategoryKind::StoreyCategory => check_member(kind, raw_value),
    }
}

/// Returns the static domain entry equal to `value`.
pub fn check_member(kind: CategoryKind, value: &str) -> Result<&'static str, PredictError> {
    domain_of(kind)
        .iter()
        .copied()
        .find(|v| *v == value)
        .ok_or_else(|| unknown(kind, value))
}

pub fn normalize_record(raw: &RawInputRecord) -> Result<NormalizedRecord, PredictError> {
    let record = NormalizedRecord {
        floor_area_sqm: raw.floor_area_sqm,
        lease_remaining_years: raw.lease_remaining_years,
        region: normalize(CategoryKind::Town, &raw.town)?,
        flat_type: normalize(CategoryKind::FlatType, &raw.flat_type)?,
        flat_model_category: normalize(CategoryKind::FlatModel, &raw.flat_model)?,
        storey_category: normalize(CategoryKind::StoreyCategory, &raw.storey_category)?,
    };
    debug!(
        "Normalized {} → {}, {} → {}",
        raw.town, record.region, raw.flat_model, record.flat_model_category
    );
    Ok(record)
}

/// Checks that both mapping tables cover their domain exactly once and map
/// only onto known coarse categories.
pub fn verify_tables() -> Result<(), String> {
    verify_table("town", TOWNS, TOWN_REGIONS, REGIONS)?;
    verify_table("flat_model", FLAT_MODELS, FLAT_MODEL_CATEGORIES, MODEL_CATEGORIES)?;
    info!(
        "Category tables verified: {} towns, {} flat models",
        TOWNS.len(),
        FLAT_MODELS.len()
    );
    Ok(())
}

fn verify_table(
    name: &str,
    domain: &[&str],
    table: &[(&str, &str)],
    coarse: &[&str],
) -> Result<(), String> {
    for value in domain {
        let hits = table.iter().filter(|(k, _)| k == value).count();
        if hits != 1 {
            return Err(format!("{name} table maps '{value}' {hits} times"));
        }
    }
    for (key, target) in table {
        if !domain.contains(key) {
            return Err(format!("{name} table has key '{key}' outside the domain"));
        }
        if !coarse.contains(target) {
            return Err(format!("{name} table maps '{key}' onto unknown category '{target}'"));
        }
    }
    Ok(())
}

fn lookup(
    kind: CategoryKind,
    table: &'static [(&'static str, &'static str)],
    raw_value: &str,
) -> Result<&'static str, PredictError> {
    table
        .iter()
        .find(|(key, _)| *key == raw_value)
        .map(|(_, coarse)| *coarse)
        .ok_or_else(|| unknown(kind, raw_value))
}

fn domain_of(kind: CategoryKind) -> &'static [&'static str] {
    match kind {
        CategoryKind::Town => TOWNS,
        CategoryKind::FlatType => FLAT_TYPES,
        CategoryKind::FlatModel => FLAT_MODELS,
        CategoryKind::StoreyCategory => STOREY_CATEGORIES,
    }
}

fn unknown(kind: CategoryKind, value: &str) -> PredictError {
    PredictError::UnknownCategoryValue {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn woodlands() -> RawInputRecord {
        RawInputRecord {
            floor_area_sqm: 95.0,
            town: "WOODLANDS".into(),
            flat_type: "4 ROOM".into(),
            flat_model: "MODEL A".into(),
            lease_remaining_years: 90,
            storey_category: "Mid Storey".into(),
        }
    }

    #[test]
    fn every_town_has_a_region() {
        for town in TOWNS {
            let region = normalize(CategoryKind::Town, town).unwrap();
            assert!(REGIONS.contains(&region), "{town} → {region}");
        }
    }

    #[test]
    fn every_flat_model_has_a_category() {
        for flat_model in FLAT_MODELS {
            let category = normalize(CategoryKind::FlatModel, flat_model).unwrap();
            assert!(MODEL_CATEGORIES.contains(&category), "{flat_model} → {category}");
        }
    }

    #[test]
    fn flat_type_and_storey_map_onto_themselves() {
        for flat_type in FLAT_TYPES {
            assert_eq!(normalize(CategoryKind::FlatType, flat_type).unwrap(), *flat_type);
        }
        for storey in STOREY_CATEGORIES {
            assert_eq!(normalize(CategoryKind::StoreyCategory, storey).unwrap(), *storey);
        }
    }

    #[test]
    fn known_mappings() {
        assert_eq!(normalize(CategoryKind::Town, "WOODLANDS").unwrap(), "North");
        assert_eq!(normalize(CategoryKind::Town, "HOUGANG").unwrap(), "North-East");
        assert_eq!(normalize(CategoryKind::FlatModel, "MODEL A").unwrap(), "Smaller Flats");
        assert_eq!(
            normalize(CategoryKind::FlatModel, "IMPROVED-MAISONETTE").unwrap(),
            "Maisonettes"
        );
        assert_eq!(normalize(CategoryKind::FlatModel, "2-ROOM").unwrap(), "Special Models");
    }

    #[test]
    fn unknown_town_is_rejected() {
        let err = normalize(CategoryKind::Town, "ATLANTIS").unwrap_err();
        match err {
            PredictError::UnknownCategoryValue { kind, value } => {
                assert_eq!(kind, CategoryKind::Town);
                assert_eq!(value, "ATLANTIS");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(normalize(CategoryKind::Town, "woodlands").is_err());
        assert!(normalize(CategoryKind::StoreyCategory, "mid storey").is_err());
    }

    #[test]
    fn coarse_value_is_not_a_raw_value() {
        // "North" is a region, not a town
        assert!(normalize(CategoryKind::Town, "North").is_err());
    }

    #[test]
    fn normalize_record_resolves_all_fields() {
        let record = normalize_record(&woodlands()).unwrap();
        assert_eq!(record.region, "North");
        assert_eq!(record.flat_type, "4 ROOM");
        assert_eq!(record.flat_model_category, "Smaller Flats");
        assert_eq!(record.storey_category, "Mid Storey");
        assert_eq!(record.floor_area_sqm, 95.0);
        assert_eq!(record.lease_remaining_years, 90);
    }

    #[test]
    fn normalize_record_rejects_unknown_flat_type() {
        let mut raw = woodlands();
        raw.flat_type = "6 ROOM".into();
        assert!(matches!(
            normalize_record(&raw),
            Err(PredictError::UnknownCategoryValue {
                kind: CategoryKind::FlatType,
                ..
            })
        ));
    }

    #[test]
    fn shipped_tables_are_total() {
        verify_tables().unwrap();
    }

    #[test]
    fn verify_table_reports_gaps() {
        let err = verify_table("town", &["A", "B"], &[("A", "X")], &["X"]).unwrap_err();
        assert!(err.contains("'B'"), "{err}");
    }

    #[test]
    fn verify_table_reports_unknown_target() {
        let err = verify_table("town", &["A"], &[("A", "Unknown")], &["X"]).unwrap_err();
        assert!(err.contains("Unknown"), "{err}");
    }
}
