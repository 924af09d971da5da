use substreams::store::{DeltaBigInt, Deltas};
use substreams_entity_change::pb::entity::EntityChanges;

use crate::{
    mapping::handle_event,
    params::Params,
    pb::unifarm::v1::{event::Kind, Events},
    store::BlockEntityStore,
};

#[substreams::handlers::map]
fn graph_out(
    params: String,
    events: Events,
    counts: Deltas<DeltaBigInt>,
) -> Result<EntityChanges, anyhow::Error> {
    let params = Params::parse(&params)?;

    events
        .events
        .iter()
        .filter_map(|event| match &event.kind {
            Some(Kind::Disabled(disabled)) => Some((event.ordinal, &disabled.name)),
            _ => None,
        })
        .for_each(|(ordinal, name)| {
            substreams::log::debug!("No mapping for {} event at ordinal {}", name, ordinal)
        });

    let changes = entity_changes(&params, &events, &counts)?;
    if !changes.entity_changes.is_empty() {
        substreams::log::info!("Writing {} entity changes", changes.entity_changes.len());
    }
    Ok(changes)
}

/// Replays the block's events through the mappings against the entities known from `counts`.
fn entity_changes(
    params: &Params,
    events: &Events,
    counts: &Deltas<DeltaBigInt>,
) -> anyhow::Result<EntityChanges> {
    let mut store = BlockEntityStore::from_count_deltas(counts);
    for event in events.events.iter() {
        handle_event(event, &mut store, params)?;
    }
    Ok(store.into_entity_changes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb::unifarm::v1::{Claim, Event, Stake};
    use hex_literal::hex;
    use substreams::{pb::substreams::store_delta::Operation, scalar::BigInt};
    use substreams_entity_change::pb::entity::{
        entity_change::Operation as EntityOperation, value::Typed,
    };

    const SENDER: [u8; 20] = hex!("000000000000000000000000000000000000000a");
    const TOKEN: [u8; 20] = hex!("ac3E018457B222d93114458476f3E3416Abbe38F");
    const ID: &str = "0x000000000000000000000000000000000000000a";
    const KEY: &str = "StakeEntity:0x000000000000000000000000000000000000000a";

    fn params() -> Params {
        Params { contract: TOKEN.to_vec(), persist_claims: false, persist_unstakes: false }
    }

    fn stake_event(ordinal: u64, amount: u64) -> Event {
        Event {
            tx_hash: vec![ordinal as u8; 32],
            tx_from: SENDER.to_vec(),
            ordinal,
            block_number: 17_000_000,
            kind: Some(Kind::Stake(Stake {
                user_address: SENDER.to_vec(),
                stake_id: "7".to_string(),
                referrer_address: vec![0; 20],
                token_address: TOKEN.to_vec(),
                staked_amount: amount.to_string(),
                time: "1700000000".to_string(),
            })),
        }
    }

    fn count_delta(ordinal: u64, old_value: u64) -> DeltaBigInt {
        DeltaBigInt {
            operation: if old_value == 0 { Operation::Create } else { Operation::Update },
            ordinal,
            key: KEY.to_string(),
            old_value: BigInt::from(old_value),
            new_value: BigInt::from(old_value + 1),
        }
    }

    fn count_field(changes: &EntityChanges) -> Option<Typed> {
        changes.entity_changes[0]
            .fields
            .iter()
            .find(|field| field.name == "count")
            .and_then(|field| field.new_value.clone())
            .and_then(|value| value.typed)
    }

    #[test]
    fn test_stakes_accumulate_across_blocks() {
        let first_block = Events { events: vec![stake_event(10, 100), stake_event(20, 100)] };
        let first_counts = Deltas { deltas: vec![count_delta(10, 0), count_delta(20, 1)] };

        let changes = entity_changes(&params(), &first_block, &first_counts).unwrap();

        assert_eq!(changes.entity_changes.len(), 1);
        assert_eq!(changes.entity_changes[0].id, ID);
        assert_eq!(changes.entity_changes[0].operation, EntityOperation::Create as i32);
        assert_eq!(count_field(&changes), Some(Typed::Bigint("2".to_string())));

        let second_block = Events { events: vec![stake_event(5, 250)] };
        let second_counts = Deltas { deltas: vec![count_delta(5, 2)] };

        let changes = entity_changes(&params(), &second_block, &second_counts).unwrap();

        assert_eq!(changes.entity_changes.len(), 1);
        assert_eq!(changes.entity_changes[0].operation, EntityOperation::Update as i32);
        assert_eq!(count_field(&changes), Some(Typed::Bigint("3".to_string())));
    }

    #[test]
    fn test_unsaved_and_disabled_events_emit_nothing() {
        let events = Events {
            events: vec![
                Event {
                    tx_from: SENDER.to_vec(),
                    ordinal: 1,
                    kind: Some(Kind::Claim(Claim {
                        user_address: SENDER.to_vec(),
                        staked_token_address: TOKEN.to_vec(),
                        token_address: TOKEN.to_vec(),
                        claim_rewards: "42".to_string(),
                        time: "1700000000".to_string(),
                    })),
                    ..Default::default()
                },
                Event {
                    tx_from: SENDER.to_vec(),
                    ordinal: 2,
                    kind: Some(Kind::Disabled(crate::pb::unifarm::v1::Disabled {
                        name: "Paused".to_string(),
                    })),
                    ..Default::default()
                },
            ],
        };

        let changes = entity_changes(&params(), &events, &Deltas { deltas: vec![] }).unwrap();

        assert!(changes.entity_changes.is_empty());
    }
}
