use substreams::scalar::BigInt;
use substreams_entity_change::tables::Row;

/// An entity of `schema.graphql`, keyed by a string id and carrying a running `count`.
pub trait Entity: Clone {
    const NAME: &'static str;

    /// A fresh entity with `count` at zero and every other field empty.
    fn new(id: String) -> Self;
    fn id(&self) -> &str;
    fn set_count(&mut self, count: BigInt);
    fn write_fields(&self, row: &mut Row);
    fn into_record(self) -> EntityRecord;
    fn from_record(record: &EntityRecord) -> Option<Self>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Stake(StakeEntity),
    Claim(ClaimEntity),
    UnStake(UnStakeEntity),
}

impl EntityRecord {
    pub fn name(&self) -> &'static str {
        match self {
            EntityRecord::Stake(_) => StakeEntity::NAME,
            EntityRecord::Claim(_) => ClaimEntity::NAME,
            EntityRecord::UnStake(_) => UnStakeEntity::NAME,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRecord::Stake(entity) => entity.id(),
            EntityRecord::Claim(entity) => entity.id(),
            EntityRecord::UnStake(entity) => entity.id(),
        }
    }

    pub fn write_fields(&self, row: &mut Row) {
        match self {
            EntityRecord::Stake(entity) => entity.write_fields(row),
            EntityRecord::Claim(entity) => entity.write_fields(row),
            EntityRecord::UnStake(entity) => entity.write_fields(row),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StakeEntity {
    pub id: String,
    pub count: BigInt,
    pub user_address: Vec<u8>,
    pub stake_id: BigInt,
    pub referrer_address: Vec<u8>,
    pub token_address: Vec<u8>,
    pub staked_amount: BigInt,
}

impl Entity for StakeEntity {
    const NAME: &'static str = "StakeEntity";

    fn new(id: String) -> Self {
        Self {
            id,
            count: BigInt::zero(),
            user_address: vec![],
            stake_id: BigInt::zero(),
            referrer_address: vec![],
            token_address: vec![],
            staked_amount: BigInt::zero(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_count(&mut self, count: BigInt) {
        self.count = count;
    }

    fn write_fields(&self, row: &mut Row) {
        row.set("count", self.count.clone())
            .set("userAddress", &self.user_address)
            .set("stakeId", self.stake_id.clone())
            .set("referrerAddress", &self.referrer_address)
            .set("tokenAddress", &self.token_address)
            .set("stakedAmount", self.staked_amount.clone());
    }

    fn into_record(self) -> EntityRecord {
        EntityRecord::Stake(self)
    }

    fn from_record(record: &EntityRecord) -> Option<Self> {
        match record {
            EntityRecord::Stake(entity) => Some(entity.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimEntity {
    pub id: String,
    pub count: BigInt,
    pub user_address: Vec<u8>,
    pub staked_token_address: Vec<u8>,
    pub token_address: Vec<u8>,
    pub claim_rewards: BigInt,
}

impl Entity for ClaimEntity {
    const NAME: &'static str = "ClaimEntity";

    fn new(id: String) -> Self {
        Self {
            id,
            count: BigInt::zero(),
            user_address: vec![],
            staked_token_address: vec![],
            token_address: vec![],
            claim_rewards: BigInt::zero(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_count(&mut self, count: BigInt) {
        self.count = count;
    }

    fn write_fields(&self, row: &mut Row) {
        row.set("count", self.count.clone())
            .set("userAddress", &self.user_address)
            .set("stakedTokenAddress", &self.staked_token_address)
            .set("tokenAddress", &self.token_address)
            .set("claimRewards", self.claim_rewards.clone());
    }

    fn into_record(self) -> EntityRecord {
        EntityRecord::Claim(self)
    }

    fn from_record(record: &EntityRecord) -> Option<Self> {
        match record {
            EntityRecord::Claim(entity) => Some(entity.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnStakeEntity {
    pub id: String,
    pub count: BigInt,
    pub user_address: Vec<u8>,
    pub un_staked_token_address: Vec<u8>,
    pub un_staked_amount: BigInt,
    pub time: BigInt,
    pub stake_id: BigInt,
}

impl Entity for UnStakeEntity {
    const NAME: &'static str = "UnStakeEntity";

    fn new(id: String) -> Self {
        Self {
            id,
            count: BigInt::zero(),
            user_address: vec![],
            un_staked_token_address: vec![],
            un_staked_amount: BigInt::zero(),
            time: BigInt::zero(),
            stake_id: BigInt::zero(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_count(&mut self, count: BigInt) {
        self.count = count;
    }

    fn write_fields(&self, row: &mut Row) {
        // The casing of `unStakedtokenAddress` is the deployed schema's.
        row.set("count", self.count.clone())
            .set("userAddress", &self.user_address)
            .set("unStakedtokenAddress", &self.un_staked_token_address)
            .set("unStakedAmount", self.un_staked_amount.clone())
            .set("time", self.time.clone())
            .set("stakeId", self.stake_id.clone());
    }

    fn into_record(self) -> EntityRecord {
        EntityRecord::UnStake(self)
    }

    fn from_record(record: &EntityRecord) -> Option<Self> {
        match record {
            EntityRecord::UnStake(entity) => Some(entity.clone()),
            _ => None,
        }
    }
}
