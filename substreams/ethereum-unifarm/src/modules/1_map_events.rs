use substreams_ethereum::{
    block_view::LogView,
    pb::eth::{self, v2::Log},
    Event as _,
};

use crate::{
    abi::unifarm_v18::events as unifarm_events,
    params::Params,
    pb::unifarm::v1::{event::Kind, Claim, Disabled, Event, Events, Stake, UnStake},
};

type NameMatcher = fn(&Log) -> Option<&'static str>;

/// Contract events that are recognised but have no entity mapping.
const DISABLED_EVENTS: [NameMatcher; 14] = [
    name_if_match::<unifarm_events::BlockedDetails>,
    name_if_match::<unifarm_events::DailyDistributionDetails>,
    name_if_match::<unifarm_events::IntervalDaysDetails>,
    name_if_match::<unifarm_events::LockableTokenDetails>,
    name_if_match::<unifarm_events::OptionableBenefitDetails>,
    name_if_match::<unifarm_events::OwnershipTransferred>,
    name_if_match::<unifarm_events::Paused>,
    name_if_match::<unifarm_events::ReferralEarn>,
    name_if_match::<unifarm_events::ReferrerPercentageDetails>,
    name_if_match::<unifarm_events::SequenceDetails>,
    name_if_match::<unifarm_events::StakeDurationDetails>,
    name_if_match::<unifarm_events::TokenDetails>,
    name_if_match::<unifarm_events::Unpaused>,
    name_if_match::<unifarm_events::WithdrawDetails>,
];

fn name_if_match<E: substreams_ethereum::Event>(log: &Log) -> Option<&'static str> {
    E::match_log(log).then_some(E::NAME)
}

#[substreams::handlers::map]
fn map_events(params: String, block: eth::v2::Block) -> Result<Events, anyhow::Error> {
    let params = Params::parse(&params)?;

    let events = contract_logs(&block, &params.contract)
        .filter_map(|view| {
            let kind = decode_kind(view.log)?;
            Some(Event {
                tx_hash: view.receipt.transaction.hash.clone(),
                tx_from: view.receipt.transaction.from.clone(),
                ordinal: view.ordinal(),
                block_number: block.number,
                kind: Some(kind),
            })
        })
        .collect::<Vec<_>>();

    if !events.is_empty() {
        substreams::log::info!(
            "Decoded {} UnifarmV18 events in block {}",
            events.len(),
            block.number
        );
    }

    Ok(Events { events })
}

/// Logs of successful transactions emitted by `contract`.
fn contract_logs<'a>(
    block: &'a eth::v2::Block,
    contract: &'a [u8],
) -> impl Iterator<Item = LogView<'a>> {
    block
        .logs()
        .filter(move |view| view.address() == contract)
}

fn decode_kind(log: &Log) -> Option<Kind> {
    if let Some(ev) = unifarm_events::Stake::match_and_decode(log) {
        Some(Kind::Stake(Stake {
            user_address: ev.user_address,
            stake_id: ev.stake_id.to_string(),
            referrer_address: ev.referrer_address,
            token_address: ev.token_address,
            staked_amount: ev.staked_amount.to_string(),
            time: ev.time.to_string(),
        }))
    } else if let Some(ev) = unifarm_events::Claim::match_and_decode(log) {
        Some(Kind::Claim(Claim {
            user_address: ev.user_address,
            staked_token_address: ev.staked_token_address,
            token_address: ev.token_address,
            claim_rewards: ev.claim_rewards.to_string(),
            time: ev.time.to_string(),
        }))
    } else if let Some(ev) = unifarm_events::UnStake::match_and_decode(log) {
        Some(Kind::UnStake(UnStake {
            user_address: ev.user_address,
            un_staked_token_address: ev.un_stakedtoken_address,
            un_staked_amount: ev.un_staked_amount.to_string(),
            time: ev.time.to_string(),
            stake_id: ev.stake_id.to_string(),
        }))
    } else {
        DISABLED_EVENTS
            .iter()
            .find_map(|matcher| matcher(log))
            .map(|name| Kind::Disabled(Disabled { name: name.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethabi::{encode, Address, Token, Uint};
    use hex_literal::hex;
    use substreams_ethereum::pb::eth::v2::{
        Block, TransactionReceipt, TransactionTrace, TransactionTraceStatus,
    };

    const USER: [u8; 20] = hex!("000000000000000000000000000000000000000a");
    const REFERRER: [u8; 20] = hex!("4600D3b12c39AF925C2C07C487d31D17c1e32A35");
    const TOKEN: [u8; 20] = hex!("ac3E018457B222d93114458476f3E3416Abbe38F");

    const STAKE_TOPIC: [u8; 32] =
        hex!("8d0a98609f00f26e55cd12ea38ffb8a0dfad170f6f001d682185fdce4ff42444");
    const CLAIM_TOPIC: [u8; 32] =
        hex!("cd5e4f020ddad29434c2200a9edf2f8d7ec30f0d787f03b528ab7279aab0acbe");
    const UNSTAKE_TOPIC: [u8; 32] =
        hex!("a4b627609e711628747558b171b04b9636337afdadac065ee7113fb91eab0b72");
    const PAUSED_TOPIC: [u8; 32] =
        hex!("62e78cea01bee320cd4e420270b5ea74000d11b0c9f74754ebdbfc544b05a258");

    fn address_topic(address: &[u8]) -> Vec<u8> {
        encode(&[Token::Address(Address::from_slice(address))])
    }

    fn uints(values: &[u64]) -> Vec<u8> {
        encode(
            &values
                .iter()
                .map(|value| Token::Uint(Uint::from(*value)))
                .collect::<Vec<_>>(),
        )
    }

    fn log(topics: Vec<Vec<u8>>, data: Vec<u8>) -> Log {
        Log { address: TOKEN.to_vec(), topics, data, ..Default::default() }
    }

    #[test]
    fn test_decode_stake() {
        let stake_log = log(
            vec![
                STAKE_TOPIC.to_vec(),
                address_topic(&USER),
                address_topic(&REFERRER),
                address_topic(&TOKEN),
            ],
            uints(&[7, 100, 1_700_000_000]),
        );

        let kind = decode_kind(&stake_log).unwrap();

        assert_eq!(
            kind,
            Kind::Stake(Stake {
                user_address: USER.to_vec(),
                stake_id: "7".to_string(),
                referrer_address: REFERRER.to_vec(),
                token_address: TOKEN.to_vec(),
                staked_amount: "100".to_string(),
                time: "1700000000".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_claim() {
        let claim_log = log(
            vec![
                CLAIM_TOPIC.to_vec(),
                address_topic(&USER),
                address_topic(&TOKEN),
                address_topic(&REFERRER),
            ],
            uints(&[42, 1_700_000_000]),
        );

        let kind = decode_kind(&claim_log).unwrap();

        assert_eq!(
            kind,
            Kind::Claim(Claim {
                user_address: USER.to_vec(),
                staked_token_address: TOKEN.to_vec(),
                token_address: REFERRER.to_vec(),
                claim_rewards: "42".to_string(),
                time: "1700000000".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_unstake() {
        let unstake_log = log(
            vec![UNSTAKE_TOPIC.to_vec(), address_topic(&USER), address_topic(&TOKEN)],
            uints(&[100, 1_700_000_123, 7]),
        );

        let kind = decode_kind(&unstake_log).unwrap();

        assert_eq!(
            kind,
            Kind::UnStake(UnStake {
                user_address: USER.to_vec(),
                un_staked_token_address: TOKEN.to_vec(),
                un_staked_amount: "100".to_string(),
                time: "1700000123".to_string(),
                stake_id: "7".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_disabled_event() {
        let paused_log = log(vec![PAUSED_TOPIC.to_vec()], address_topic(&USER));

        assert_eq!(
            decode_kind(&paused_log),
            Some(Kind::Disabled(Disabled { name: "Paused".to_string() }))
        );
    }

    #[test]
    fn test_unknown_topic_is_ignored() {
        let transfer_log = log(
            vec![
                hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef").to_vec(),
                address_topic(&USER),
                address_topic(&TOKEN),
            ],
            uints(&[1]),
        );

        assert_eq!(decode_kind(&transfer_log), None);
    }

    #[test]
    fn test_stake_topic_with_wrong_arity_is_ignored() {
        let truncated = log(vec![STAKE_TOPIC.to_vec(), address_topic(&USER)], uints(&[7, 100]));

        assert_eq!(decode_kind(&truncated), None);
    }

    #[test]
    fn test_contract_logs_skip_other_emitters_and_failed_transactions() {
        let paused_log = log(vec![PAUSED_TOPIC.to_vec()], address_topic(&USER));
        let foreign_log = Log { address: REFERRER.to_vec(), ..paused_log.clone() };
        let trace = |status: TransactionTraceStatus, logs: Vec<Log>| TransactionTrace {
            status: status as i32,
            receipt: Some(TransactionReceipt { logs, ..Default::default() }),
            ..Default::default()
        };
        let block = Block {
            transaction_traces: vec![
                trace(TransactionTraceStatus::Succeeded, vec![foreign_log, paused_log.clone()]),
                trace(TransactionTraceStatus::Reverted, vec![paused_log.clone()]),
            ],
            ..Default::default()
        };

        let logs = contract_logs(&block, &TOKEN)
            .map(|view| view.log.clone())
            .collect::<Vec<_>>();

        assert_eq!(logs, vec![paused_log]);
    }
}
