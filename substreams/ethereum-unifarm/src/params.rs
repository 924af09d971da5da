use anyhow::{anyhow, Context};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QueryParams {
    contract: String,
    #[serde(default)]
    persist_claims: bool,
    #[serde(default)]
    persist_unstakes: bool,
}

impl QueryParams {
    fn parse(input: &str) -> anyhow::Result<Self> {
        serde_qs::from_str(input).map_err(|e| anyhow!("Failed to parse query params: {}", e))
    }
}

/// Module parameters shared by every stage of the package.
///
/// `persist_claims` and `persist_unstakes` default to `false`: the Claim and UnStake mappings
/// update their entity but never save it unless switched on.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub contract: Vec<u8>,
    pub persist_claims: bool,
    pub persist_unstakes: bool,
}

impl Params {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let params = QueryParams::parse(input)?;

        Ok(Self {
            contract: decode_addr(&params.contract).context("invalid `contract` param")?,
            persist_claims: params.persist_claims,
            persist_unstakes: params.persist_unstakes,
        })
    }
}

pub fn encode_addr(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn decode_addr(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() != 40 {
        return Err(anyhow!("address must be 20 bytes (40 hex chars), got len={}", s.len()));
    }
    Ok(hex::decode(s)?)
}
