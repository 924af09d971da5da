// @generated
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Events {
    #[prost(message, repeated, tag="1")]
    pub events: ::prost::alloc::vec::Vec<Event>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(bytes="vec", tag="1")]
    pub tx_hash: ::prost::alloc::vec::Vec<u8>,
    /// Sender of the transaction that emitted the event. Entities are keyed on it.
    #[prost(bytes="vec", tag="2")]
    pub tx_from: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag="3")]
    pub ordinal: u64,
    #[prost(uint64, tag="4")]
    pub block_number: u64,
    #[prost(oneof="event::Kind", tags="10, 11, 12, 13")]
    pub kind: ::core::option::Option<event::Kind>,
}
/// Nested message and enum types in `Event`.
pub mod event {
    #[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag="10")]
        Stake(super::Stake),
        #[prost(message, tag="11")]
        Claim(super::Claim),
        #[prost(message, tag="12")]
        UnStake(super::UnStake),
        #[prost(message, tag="13")]
        Disabled(super::Disabled),
    }
}
/// Integers are base 10 strings.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Stake {
    #[prost(bytes="vec", tag="1")]
    pub user_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="2")]
    pub stake_id: ::prost::alloc::string::String,
    #[prost(bytes="vec", tag="3")]
    pub referrer_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes="vec", tag="4")]
    pub token_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="5")]
    pub staked_amount: ::prost::alloc::string::String,
    #[prost(string, tag="6")]
    pub time: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Claim {
    #[prost(bytes="vec", tag="1")]
    pub user_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes="vec", tag="2")]
    pub staked_token_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes="vec", tag="3")]
    pub token_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="4")]
    pub claim_rewards: ::prost::alloc::string::String,
    #[prost(string, tag="5")]
    pub time: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnStake {
    #[prost(bytes="vec", tag="1")]
    pub user_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes="vec", tag="2")]
    pub un_staked_token_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="3")]
    pub un_staked_amount: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub time: ::prost::alloc::string::String,
    #[prost(string, tag="5")]
    pub stake_id: ::prost::alloc::string::String,
}
/// A contract event without an entity mapping.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Disabled {
    #[prost(string, tag="1")]
    pub name: ::prost::alloc::string::String,
}
// @@protoc_insertion_point(module)
