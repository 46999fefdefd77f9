use crate::domain::{FLAT_TYPES, MODEL_CATEGORIES, REGIONS, STOREY_CATEGORIES};
use crate::model::SchemaError;
use serde::Deserialize;
use std::collections::HashMap;

pub const FLOOR_AREA_SLOT: &str = "floor_area_sqm";
pub const LEASE_AGE_SLOT: &str = "lease_age_years";
pub const LEASE_REMAINING_SLOT: &str = "lease_remaining_years";

/// How the lease-related quantity is presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseEncoding {
    /// Years elapsed since the lease started (99 − remaining).
    LeaseAge,
    /// Years remaining, passed through unchanged.
    LeaseRemaining,
}

impl LeaseEncoding {
    pub fn slot(self) -> &'static str {
        match self {
            LeaseEncoding::LeaseAge => LEASE_AGE_SLOT,
            LeaseEncoding::LeaseRemaining => LEASE_REMAINING_SLOT,
        }
    }

    fn other_slot(self) -> &'static str {
        match self {
            LeaseEncoding::LeaseAge => LEASE_REMAINING_SLOT,
            LeaseEncoding::LeaseRemaining => LEASE_AGE_SLOT,
        }
    }
}

/// Categorical groups encoded one-hot; the slot name is prefix + value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneHotGroup {
    Region,
    FlatType,
    FlatModelCategory,
    StoreyCategory,
}

impl OneHotGroup {
    pub const ALL: [OneHotGroup; 4] = [
        OneHotGroup::Region,
        OneHotGroup::FlatType,
        OneHotGroup::FlatModelCategory,
        OneHotGroup::StoreyCategory,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            OneHotGroup::Region => "region_",
            OneHotGroup::FlatType => "flat_type_",
            OneHotGroup::FlatModelCategory => "flat_model_category_",
            OneHotGroup::StoreyCategory => "storey_category_",
        }
    }

    /// Values the group's slots may carry after the prefix.
    pub fn values(self) -> &'static [&'static str] {
        match self {
            OneHotGroup::Region => REGIONS,
            OneHotGroup::FlatType => FLAT_TYPES,
            OneHotGroup::FlatModelCategory => MODEL_CATEGORIES,
            OneHotGroup::StoreyCategory => STOREY_CATEGORIES,
        }
    }

    pub fn slot_name(self, value: &str) -> String {
        format!("{}{}", self.prefix(), value)
    }

    /// Group a slot belongs to, if any. A bare prefix is not a slot.
    pub fn of_slot(slot: &str) -> Option<OneHotGroup> {
        Self::ALL
            .into_iter()
            .find(|g| slot.len() > g.prefix().len() && slot.starts_with(g.prefix()))
    }
}

/// Serialized form of a schema, as found in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    pub lease_encoding: LeaseEncoding,
    pub slots: Vec<String>,
}

/// The ordered feature slots a trained model was fit on.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    name: String,
    lease_encoding: LeaseEncoding,
    slots: Vec<String>,
    index: HashMap<String, usize>,
}

const CATEGORICAL_SLOTS: &[&str] = &[
    "region_Central",
    "region_East",
    "region_North",
    "region_North-East",
    "region_West",
    "flat_type_1 ROOM",
    "flat_type_2 ROOM",
    "flat_type_3 ROOM",
    "flat_type_4 ROOM",
    "flat_type_5 ROOM",
    "flat_type_EXECUTIVE",
    "flat_type_MULTI GENERATION",
    "flat_model_category_Larger Flats",
    "flat_model_category_Maisonettes",
    "flat_model_category_Smaller Flats",
    "flat_model_category_Special Models",
    "storey_category_Low Storey",
    "storey_category_Mid Storey",
    "storey_category_High Storey",
];

impl FeatureSchema {
    pub fn new(
        name: impl Into<String>,
        lease_encoding: LeaseEncoding,
        slots: Vec<String>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut index = HashMap::with_capacity(slots.len());

        for (i, slot) in slots.iter().enumerate() {
            if index.insert(slot.clone(), i).is_some() {
                return Err(SchemaError::DuplicateSlot {
                    schema: name,
                    slot: slot.clone(),
                });
            }
            if slot == lease_encoding.other_slot() {
                return Err(SchemaError::ConflictingLeaseSlot {
                    schema: name,
                    slot: slot.clone(),
                });
            }
            let numeric = slot == FLOOR_AREA_SLOT || slot == lease_encoding.slot();
            // a one-hot slot must name a value the normalizer can produce
            let categorical = OneHotGroup::of_slot(slot)
                .is_some_and(|g| g.values().contains(&&slot[g.prefix().len()..]));
            if !numeric && !categorical {
                return Err(SchemaError::UnknownSlot {
                    schema: name,
                    slot: slot.clone(),
                });
            }
        }

        for required in [FLOOR_AREA_SLOT, lease_encoding.slot()] {
            if !index.contains_key(required) {
                return Err(SchemaError::MissingSlot {
                    schema: name,
                    slot: required.to_string(),
                });
            }
        }
        for group in OneHotGroup::ALL {
            if !slots.iter().any(|s| OneHotGroup::of_slot(s) == Some(group)) {
                return Err(SchemaError::MissingSlot {
                    schema: name,
                    slot: format!("{}*", group.prefix()),
                });
            }
        }

        Ok(Self {
            name,
            lease_encoding,
            slots,
            index,
        })
    }

    pub fn from_definition(def: SchemaDefinition) -> Result<Self, SchemaError> {
        Self::new(def.name, def.lease_encoding, def.slots)
    }

    /// Feature order of the deployed model: lease keyed by age in years.
    pub fn lease_age() -> Self {
        Self::builtin("lease_age", LeaseEncoding::LeaseAge)
    }

    /// Variant keyed by years remaining on the lease.
    pub fn lease_remaining() -> Self {
        Self::builtin("lease_remaining", LeaseEncoding::LeaseRemaining)
    }

    pub fn builtin_by_name(name: &str) -> Option<Self> {
        match name {
            "lease_age" => Some(Self::lease_age()),
            "lease_remaining" => Some(Self::lease_remaining()),
            _ => None,
        }
    }

    fn builtin(name: &str, lease_encoding: LeaseEncoding) -> Self {
        let mut slots = Vec::with_capacity(CATEGORICAL_SLOTS.len() + 2);
        slots.push(FLOOR_AREA_SLOT.to_string());
        slots.push(lease_encoding.slot().to_string());
        slots.extend(CATEGORICAL_SLOTS.iter().map(|s| s.to_string()));
        let index = slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self {
            name: name.to_string(),
            lease_encoding,
            slots,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lease_encoding(&self) -> LeaseEncoding {
        self.lease_encoding
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn index_of(&self, slot: &str) -> Option<usize> {
        self.index.get(slot).copied()
    }

    /// Slot indices belonging to a one-hot group, in schema order.
    pub fn group_indices(&self, group: OneHotGroup) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| OneHotGroup::of_slot(s) == Some(group))
            .map(|(i, _)| i)
            .collect()
    }
}
