use cosmwasm_std::{Addr, Binary, StdError, Uint128};
use serde_json::{Map, Value};

use crate::error::{new_shape_mismatch, ShapeError};
use crate::msg::{Delegation, DelegationsResponse};

const RESPONSE_TYPE: &str = "DelegationsResponse";

/// Parses a raw query payload. Invalid JSON is reported as a `StdError`; a well-formed document
/// that does not match the response shape is reported as `ShapeMismatch` for the first offending
/// field.
pub fn parse_delegations_response(data: &[u8]) -> Result<DelegationsResponse, ShapeError> {
    let value: Value =
        serde_json::from_slice(data).map_err(|err| StdError::parse_err(RESPONSE_TYPE, err))?;

    parse_delegations_response_value(value)
}

pub fn parse_delegations_response_binary(
    data: &Binary,
) -> Result<DelegationsResponse, ShapeError> {
    parse_delegations_response(data.as_slice())
}

pub fn parse_delegations_response_value(value: Value) -> Result<DelegationsResponse, ShapeError> {
    let mut root = into_object(value, "$")?;

    let delegations = match take_field(&mut root, "delegations", "$.delegations")? {
        Value::Array(items) => items,
        other => {
            return Err(new_shape_mismatch(
                "$.delegations",
                format!("expected array, got {}", kind(&other)),
            ))
        }
    };

    let delegations = delegations
        .into_iter()
        .enumerate()
        .map(|(index, item)| delegation_from_value(item, &format!("$.delegations[{}]", index)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DelegationsResponse {
        delegations,
        extensions: root.into_iter().collect(),
    })
}

pub fn delegations_response_to_binary(
    response: &DelegationsResponse,
) -> Result<Binary, ShapeError> {
    let data =
        serde_json::to_vec(response).map_err(|err| StdError::serialize_err(RESPONSE_TYPE, err))?;

    Ok(Binary::from(data))
}

pub(crate) fn delegation_from_value(value: Value, path: &str) -> Result<Delegation, ShapeError> {
    let mut delegation = into_object(value, path)?;

    let stake_path = format!("{}.stake", path);
    let stake = take_field(&mut delegation, "stake", &stake_path)?;
    let stake = parse_stake(&stake).map_err(|reason| new_shape_mismatch(&stake_path, reason))?;

    let validator_path = format!("{}.validator", path);
    let validator = match take_field(&mut delegation, "validator", &validator_path)? {
        // deserialization is the trusted-state path; see `validate_addresses`
        Value::String(validator) => Addr::unchecked(validator),
        other => {
            return Err(new_shape_mismatch(
                validator_path,
                format!("expected string, got {}", kind(&other)),
            ))
        }
    };

    Ok(Delegation {
        stake,
        validator,
        extensions: delegation.into_iter().collect(),
    })
}

// Stake travels as a string of decimal digits so that the full u128 range survives
// JSON decoders limited to 53-bit integers.
fn parse_stake(value: &Value) -> Result<Uint128, String> {
    let digits = value
        .as_str()
        .ok_or_else(|| format!("expected decimal string, got {}", kind(value)))?;

    if digits.is_empty() {
        return Err("empty amount".to_string());
    }

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("amount {:?} contains non-digit characters", digits));
    }

    digits
        .parse::<u128>()
        .map(Uint128::new)
        .map_err(|_| format!("amount {} does not fit in Uint128", digits))
}

fn into_object(value: Value, path: &str) -> Result<Map<String, Value>, ShapeError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(new_shape_mismatch(
            path,
            format!("expected object, got {}", kind(&other)),
        )),
    }
}

fn take_field(
    object: &mut Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Value, ShapeError> {
    object
        .remove(field)
        .ok_or_else(|| new_shape_mismatch(path, "missing field"))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
