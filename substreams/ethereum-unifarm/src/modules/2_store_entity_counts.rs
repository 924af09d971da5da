use substreams::{
    scalar::BigInt,
    store::{StoreAdd, StoreAddBigInt, StoreNew},
};

use crate::{
    mapping::{entity_id, persisted_entity},
    params::Params,
    pb::unifarm::v1::Events,
    store::count_key,
};

/// Counts the saves of every entity, keyed by `<EntityName>:<id>`.
///
/// Only events whose mapping saves are counted, so a key with a positive count is an entity that
/// exists downstream.
#[substreams::handlers::store]
fn store_entity_counts(params: String, events: Events, store: StoreAddBigInt) {
    let params = Params::parse(&params).expect("Unable to deserialize params");

    events
        .events
        .iter()
        .filter_map(|event| {
            let entity = persisted_entity(event.kind.as_ref()?, &params)?;
            Some((event.ordinal, count_key(entity, &entity_id(&event.tx_from))))
        })
        .for_each(|(ordinal, key)| store.add(ordinal, key, &BigInt::one()));
}
