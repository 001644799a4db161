use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Api, StdResult, Uint128};
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ShapeError;
use crate::parse::{delegation_from_value, parse_delegations_response_value};

// These records do not use `cw_serde`, since it rejects unknown fields. Any key that is not
// declared here lands in `extensions` and is written back out on serialization.
// Deserialization goes through `serde_json::Value` rather than `flatten`, so numbers inside
// extensions keep their exact digits.

/// One staking relationship observed at query time.
#[derive(Serialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Delegation {
    pub stake: Uint128,
    // Only trusted state is deserialized into this; user-supplied payloads must go
    // through `DelegationsResponse::validate_addresses` first.
    pub validator: Addr,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl Delegation {
    /// Validates `validator` through the chain API before wrapping it.
    pub fn new(api: &dyn Api, validator: &str, stake: Uint128) -> StdResult<Self> {
        Ok(Self {
            stake,
            validator: api.addr_validate(validator)?,
            extensions: BTreeMap::new(),
        })
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

/// Result of a delegations query. Order of `delegations` is the order returned by the
/// queried contract; duplicates are not collapsed.
#[derive(Serialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct DelegationsResponse {
    pub delegations: Vec<Delegation>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl DelegationsResponse {
    pub fn new(delegations: Vec<Delegation>) -> Self {
        Self {
            delegations,
            extensions: BTreeMap::new(),
        }
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Re-checks every validator address, stopping at the first invalid one.
    pub fn validate_addresses(&self, api: &dyn Api) -> Result<(), ShapeError> {
        for (index, delegation) in self.delegations.iter().enumerate() {
            if let Err(err) = api.addr_validate(delegation.validator.as_str()) {
                api.debug(&format!(
                    "invalid validator address {} in delegation {}: {}",
                    delegation.validator, index, err
                ));
                return Err(err.into());
            }
        }

        Ok(())
    }
}

impl<'de> Deserialize<'de> for Delegation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        delegation_from_value(value, "$").map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DelegationsResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_delegations_response_value(value).map_err(de::Error::custom)
    }
}

pub fn delegations_response_schema() -> RootSchema {
    schema_for!(DelegationsResponse)
}
