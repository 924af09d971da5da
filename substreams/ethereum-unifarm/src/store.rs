use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use substreams::{
    scalar::BigInt,
    store::{DeltaBigInt, Deltas},
};
use substreams_entity_change::{pb::entity::EntityChanges, tables::Tables};

use crate::{
    entities::{Entity, EntityRecord},
    mapping::EntityStore,
};

/// Key under which `store_entity_counts` tracks how often an entity was saved.
pub fn count_key(entity_name: &str, id: &str) -> String {
    format!("{entity_name}:{id}")
}

/// Entity store scoped to one block.
///
/// The only state carried across blocks is the per-entity save count kept by
/// `store_entity_counts`. An entity whose count was positive before this block exists downstream,
/// so it loads with that count. Its other fields are not restored since every mapping overwrites
/// them.
#[derive(Debug, Default)]
pub struct BlockEntityStore {
    prior_counts: HashMap<String, BigInt>,
    staged: BTreeMap<String, EntityRecord>,
}

impl BlockEntityStore {
    pub fn with_prior_counts(prior_counts: HashMap<String, BigInt>) -> Self {
        Self { prior_counts, staged: BTreeMap::new() }
    }

    /// The count before this block is the `old_value` of the earliest delta of each key.
    pub fn from_count_deltas(deltas: &Deltas<DeltaBigInt>) -> Self {
        let mut prior_counts = HashMap::new();
        for delta in deltas
            .deltas
            .iter()
            .sorted_by_key(|delta| delta.ordinal)
        {
            prior_counts
                .entry(delta.key.clone())
                .or_insert_with(|| delta.old_value.clone());
        }
        Self::with_prior_counts(prior_counts)
    }

    fn prior_count(&self, key: &str) -> Option<&BigInt> {
        self.prior_counts
            .get(key)
            .filter(|count| **count != BigInt::zero())
    }

    /// Emits a `Create` for entities first saved in this block and an `Update` for the rest.
    pub fn into_entity_changes(self) -> EntityChanges {
        let mut tables = Tables::new();
        for (key, record) in &self.staged {
            let row = if self.prior_count(key).is_some() {
                tables.update_row(record.name(), record.id().to_string())
            } else {
                tables.create_row(record.name(), record.id().to_string())
            };
            record.write_fields(row);
        }
        tables.to_entity_changes()
    }
}

impl EntityStore for BlockEntityStore {
    fn load<E: Entity>(&self, id: &str) -> Option<E> {
        let key = count_key(E::NAME, id);
        if let Some(record) = self.staged.get(&key) {
            return E::from_record(record);
        }
        self.prior_count(&key).map(|count| {
            let mut entity = E::new(id.to_string());
            entity.set_count(count.clone());
            entity
        })
    }

    fn save<E: Entity>(&mut self, entity: E) {
        self.staged
            .insert(count_key(E::NAME, entity.id()), entity.into_record());
    }
}
