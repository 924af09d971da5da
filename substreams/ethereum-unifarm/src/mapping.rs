//! Maps decoded UnifarmV18 events onto their entities.
//!
//! Every handler follows the same shape: derive the entity id from the transaction sender, load
//! the entity or start a new one at `count = 0`, bump `count`, overwrite the remaining fields
//! from the event and save. Because the id is the sender and not the event, repeated events from
//! one address collapse into a single entity where only `count` accumulates.

use std::str::FromStr;

use anyhow::anyhow;
use substreams::scalar::BigInt;

use crate::{
    entities::{ClaimEntity, Entity, StakeEntity, UnStakeEntity},
    params::{encode_addr, Params},
    pb::unifarm::v1::{event::Kind, Claim, Event, Stake, UnStake},
};

/// Load/save access to the entities written by the mappings.
pub trait EntityStore {
    fn load<E: Entity>(&self, id: &str) -> Option<E>;
    fn save<E: Entity>(&mut self, entity: E);
}

pub fn entity_id(sender: &[u8]) -> String {
    encode_addr(sender)
}

fn load_or_create<E: Entity, S: EntityStore>(store: &S, sender: &[u8]) -> E {
    let id = entity_id(sender);
    store
        .load::<E>(&id)
        .unwrap_or_else(|| E::new(id))
}

fn parse_int(value: &str, field: &str) -> anyhow::Result<BigInt> {
    BigInt::from_str(value).map_err(|e| anyhow!("invalid `{}` value {:?}: {}", field, value, e))
}

pub fn handle_stake<S: EntityStore>(
    sender: &[u8],
    event: &Stake,
    store: &mut S,
) -> anyhow::Result<()> {
    let mut entity: StakeEntity = load_or_create(store, sender);
    entity.count = entity.count + BigInt::one();

    entity.user_address = event.user_address.clone();
    entity.stake_id = parse_int(&event.stake_id, "stake_id")?;
    entity.referrer_address = event.referrer_address.clone();
    entity.token_address = event.token_address.clone();
    entity.staked_amount = parse_int(&event.staked_amount, "staked_amount")?;

    store.save(entity);
    Ok(())
}

/// Without `persist` the updated entity is dropped, leaving the store untouched.
pub fn handle_claim<S: EntityStore>(
    sender: &[u8],
    event: &Claim,
    store: &mut S,
    persist: bool,
) -> anyhow::Result<()> {
    let mut entity: ClaimEntity = load_or_create(store, sender);
    entity.count = entity.count + BigInt::one();

    entity.user_address = event.user_address.clone();
    entity.staked_token_address = event.staked_token_address.clone();
    entity.token_address = event.token_address.clone();
    entity.claim_rewards = parse_int(&event.claim_rewards, "claim_rewards")?;

    if persist {
        store.save(entity);
    }
    Ok(())
}

/// Without `persist` the updated entity is dropped, leaving the store untouched.
pub fn handle_unstake<S: EntityStore>(
    sender: &[u8],
    event: &UnStake,
    store: &mut S,
    persist: bool,
) -> anyhow::Result<()> {
    let mut entity: UnStakeEntity = load_or_create(store, sender);
    entity.count = entity.count + BigInt::one();

    entity.user_address = event.user_address.clone();
    entity.un_staked_token_address = event.un_staked_token_address.clone();
    entity.un_staked_amount = parse_int(&event.un_staked_amount, "un_staked_amount")?;
    entity.time = parse_int(&event.time, "time")?;
    entity.stake_id = parse_int(&event.stake_id, "stake_id")?;

    if persist {
        store.save(entity);
    }
    Ok(())
}

pub fn handle_event<S: EntityStore>(
    event: &Event,
    store: &mut S,
    params: &Params,
) -> anyhow::Result<()> {
    match &event.kind {
        Some(Kind::Stake(stake)) => handle_stake(&event.tx_from, stake, store),
        Some(Kind::Claim(claim)) => {
            handle_claim(&event.tx_from, claim, store, params.persist_claims)
        }
        Some(Kind::UnStake(unstake)) => {
            handle_unstake(&event.tx_from, unstake, store, params.persist_unstakes)
        }
        Some(Kind::Disabled(_)) | None => Ok(()),
    }
}

/// Name of the entity `kind` gets saved into, if its mapping saves at all.
pub fn persisted_entity(kind: &Kind, params: &Params) -> Option<&'static str> {
    match kind {
        Kind::Stake(_) => Some(StakeEntity::NAME),
        Kind::Claim(_) if params.persist_claims => Some(ClaimEntity::NAME),
        Kind::UnStake(_) if params.persist_unstakes => Some(UnStakeEntity::NAME),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::EntityRecord, pb::unifarm::v1::Disabled};
    use hex_literal::hex;
    use std::collections::HashMap;

    const SENDER: [u8; 20] = hex!("000000000000000000000000000000000000000a");
    const OTHER_SENDER: [u8; 20] = hex!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
    const TOKEN: [u8; 20] = hex!("ac3E018457B222d93114458476f3E3416Abbe38F");
    const REFERRER: [u8; 20] = hex!("4600D3b12c39AF925C2C07C487d31D17c1e32A35");

    #[derive(Default)]
    struct MemoryStore {
        entities: HashMap<(&'static str, String), EntityRecord>,
        saves: usize,
    }

    impl EntityStore for MemoryStore {
        fn load<E: Entity>(&self, id: &str) -> Option<E> {
            self.entities
                .get(&(E::NAME, id.to_string()))
                .and_then(E::from_record)
        }

        fn save<E: Entity>(&mut self, entity: E) {
            self.saves += 1;
            self.entities
                .insert((E::NAME, entity.id().to_string()), entity.into_record());
        }
    }

    fn params(persist_claims: bool, persist_unstakes: bool) -> Params {
        Params { contract: TOKEN.to_vec(), persist_claims, persist_unstakes }
    }

    fn stake(stake_id: u64, amount: u64) -> Stake {
        Stake {
            user_address: SENDER.to_vec(),
            stake_id: stake_id.to_string(),
            referrer_address: REFERRER.to_vec(),
            token_address: TOKEN.to_vec(),
            staked_amount: amount.to_string(),
            time: "1700000000".to_string(),
        }
    }

    fn event(sender: &[u8], ordinal: u64, kind: Kind) -> Event {
        Event {
            tx_hash: vec![ordinal as u8; 32],
            tx_from: sender.to_vec(),
            ordinal,
            block_number: 17_000_000,
            kind: Some(kind),
        }
    }

    fn claim_event() -> Event {
        event(
            &SENDER,
            3,
            Kind::Claim(Claim {
                user_address: SENDER.to_vec(),
                staked_token_address: TOKEN.to_vec(),
                token_address: REFERRER.to_vec(),
                claim_rewards: "42".to_string(),
                time: "1700000000".to_string(),
            }),
        )
    }

    fn unstake_event() -> Event {
        event(
            &SENDER,
            4,
            Kind::UnStake(UnStake {
                user_address: SENDER.to_vec(),
                un_staked_token_address: TOKEN.to_vec(),
                un_staked_amount: "100".to_string(),
                time: "1700000123".to_string(),
                stake_id: "7".to_string(),
            }),
        )
    }

    #[test]
    fn test_entity_id_is_lowercase_hex_of_sender() {
        assert_eq!(entity_id(&SENDER), "0x000000000000000000000000000000000000000a");
        assert_eq!(entity_id(&OTHER_SENDER), "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f");
    }

    #[test]
    fn test_first_stake_creates_entity() {
        let mut store = MemoryStore::default();
        let id = entity_id(&SENDER);
        assert!(store.load::<StakeEntity>(&id).is_none());

        handle_stake(&SENDER, &stake(7, 100), &mut store).unwrap();

        let entity: StakeEntity = store.load(&id).unwrap();
        assert_eq!(entity.count, BigInt::one());
        assert_eq!(entity.user_address, SENDER.to_vec());
        assert_eq!(entity.stake_id, BigInt::from(7));
        assert_eq!(entity.referrer_address, REFERRER.to_vec());
        assert_eq!(entity.token_address, TOKEN.to_vec());
        assert_eq!(entity.staked_amount, BigInt::from(100));
    }

    #[test]
    fn test_load_or_create_leaves_count_untouched() {
        let mut store = MemoryStore::default();
        let fresh: StakeEntity = load_or_create(&store, &SENDER);
        assert_eq!(fresh.count, BigInt::zero());

        handle_stake(&SENDER, &stake(7, 100), &mut store).unwrap();

        let loaded: StakeEntity = load_or_create(&store, &SENDER);
        assert_eq!(loaded.count, BigInt::one());
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_repeated_stakes_accumulate_count_and_keep_latest_fields() {
        let mut store = MemoryStore::default();

        handle_stake(&SENDER, &stake(7, 100), &mut store).unwrap();
        handle_stake(&SENDER, &stake(8, 250), &mut store).unwrap();
        handle_stake(&SENDER, &stake(9, 100), &mut store).unwrap();

        assert_eq!(store.entities.len(), 1);
        let entity: StakeEntity = store.load(&entity_id(&SENDER)).unwrap();
        assert_eq!(entity.count, BigInt::from(3));
        assert_eq!(entity.stake_id, BigInt::from(9));
        assert_eq!(entity.staked_amount, BigInt::from(100));
    }

    #[test]
    fn test_same_stake_twice_yields_single_entity() {
        let mut store = MemoryStore::default();
        let stake_event = event(&SENDER, 1, Kind::Stake(stake(7, 100)));

        handle_event(&stake_event, &mut store, &params(false, false)).unwrap();
        handle_event(&stake_event, &mut store, &params(false, false)).unwrap();

        let entity: StakeEntity = store
            .load("0x000000000000000000000000000000000000000a")
            .unwrap();
        assert_eq!(store.entities.len(), 1);
        assert_eq!(entity.count, BigInt::from(2));
        assert_eq!(entity.staked_amount, BigInt::from(100));
    }

    #[test]
    fn test_senders_get_separate_entities() {
        let mut store = MemoryStore::default();

        handle_stake(&SENDER, &stake(1, 10), &mut store).unwrap();
        handle_stake(&OTHER_SENDER, &stake(2, 20), &mut store).unwrap();

        let first: StakeEntity = store.load(&entity_id(&SENDER)).unwrap();
        let second: StakeEntity = store.load(&entity_id(&OTHER_SENDER)).unwrap();
        assert_eq!(first.count, BigInt::one());
        assert_eq!(second.count, BigInt::one());
        assert_eq!(second.staked_amount, BigInt::from(20));
    }

    #[test]
    fn test_claim_and_unstake_leave_store_untouched_by_default() {
        let mut store = MemoryStore::default();

        handle_event(&claim_event(), &mut store, &params(false, false)).unwrap();
        handle_event(&unstake_event(), &mut store, &params(false, false)).unwrap();

        assert_eq!(store.saves, 0);
        assert!(store.entities.is_empty());
    }

    #[test]
    fn test_claim_persists_when_enabled() {
        let mut store = MemoryStore::default();

        handle_event(&claim_event(), &mut store, &params(true, false)).unwrap();
        handle_event(&claim_event(), &mut store, &params(true, false)).unwrap();

        let entity: ClaimEntity = store.load(&entity_id(&SENDER)).unwrap();
        assert_eq!(entity.count, BigInt::from(2));
        assert_eq!(entity.user_address, SENDER.to_vec());
        assert_eq!(entity.staked_token_address, TOKEN.to_vec());
        assert_eq!(entity.token_address, REFERRER.to_vec());
        assert_eq!(entity.claim_rewards, BigInt::from(42));
    }

    #[test]
    fn test_unstake_persists_when_enabled() {
        let mut store = MemoryStore::default();

        handle_event(&unstake_event(), &mut store, &params(false, true)).unwrap();

        let entity: UnStakeEntity = store.load(&entity_id(&SENDER)).unwrap();
        assert_eq!(entity.count, BigInt::one());
        assert_eq!(entity.un_staked_token_address, TOKEN.to_vec());
        assert_eq!(entity.un_staked_amount, BigInt::from(100));
        assert_eq!(entity.time, BigInt::from(1_700_000_123u64));
        assert_eq!(entity.stake_id, BigInt::from(7));
        assert!(store.load::<ClaimEntity>(&entity_id(&SENDER)).is_none());
    }

    #[test]
    fn test_disabled_events_do_not_touch_store() {
        let mut store = MemoryStore::default();
        let paused = event(&SENDER, 5, Kind::Disabled(Disabled { name: "Paused".to_string() }));
        let empty = Event { kind: None, ..paused.clone() };

        handle_event(&paused, &mut store, &params(true, true)).unwrap();
        handle_event(&empty, &mut store, &params(true, true)).unwrap();

        assert_eq!(store.saves, 0);
        assert!(store.entities.is_empty());
    }

    #[test]
    fn test_malformed_amount_is_an_error() {
        let mut store = MemoryStore::default();
        let mut bad = stake(7, 100);
        bad.staked_amount = "one hundred".to_string();

        let err = handle_stake(&SENDER, &bad, &mut store).unwrap_err();

        assert!(err.to_string().contains("staked_amount"));
        assert!(store.entities.is_empty());
    }

    #[test]
    fn test_persisted_entity_follows_params() {
        let claim = claim_event().kind.unwrap();
        let unstake = unstake_event().kind.unwrap();
        let stake_kind = Kind::Stake(stake(1, 1));
        let disabled = Kind::Disabled(Disabled { name: "Unpaused".to_string() });

        assert_eq!(persisted_entity(&stake_kind, &params(false, false)), Some("StakeEntity"));
        assert_eq!(persisted_entity(&claim, &params(false, false)), None);
        assert_eq!(persisted_entity(&claim, &params(true, false)), Some("ClaimEntity"));
        assert_eq!(persisted_entity(&unstake, &params(true, false)), None);
        assert_eq!(persisted_entity(&unstake, &params(false, true)), Some("UnStakeEntity"));
        assert_eq!(persisted_entity(&disabled, &params(true, true)), None);
    }
}
