// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant <-> JSON mapping.
//!
//! Only the JSON-shaped subset converts: Undefined elements become `null`,
//! tombstones are skipped, Object keys must be Strings and numbers must fit
//! in an `i32`.

use anyhow::{bail, Context, Result};
use dynvar::{Value, Variant};
use serde_json::{Map, Number};

pub fn to_json(variant: &Variant) -> Result<serde_json::Value> {
    Ok(match variant.value() {
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(Number::from(*n)),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items.iter().map(to_json).collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(object) => {
            let mut map = Map::new();
            for (key, value) in object.iter() {
                let Value::String(name) = key.value() else {
                    bail!("{} object key has no JSON form", key.kind());
                };
                map.insert(name.clone(), to_json(value)?);
            }
            serde_json::Value::Object(map)
        }
        Value::Pointer(_) | Value::Function(_) => {
            bail!("{} values have no JSON form", variant.kind())
        }
    })
}

pub fn from_json(json: &serde_json::Value) -> Result<Variant> {
    Ok(match json {
        serde_json::Value::Null => Variant::null(),
        serde_json::Value::Bool(b) => Variant::boolean(*b),
        serde_json::Value::Number(n) => {
            let wide = n
                .as_i64()
                .with_context(|| format!("number {n} is not an integer"))?;
            let narrow =
                i32::try_from(wide).with_context(|| format!("number {n} does not fit in i32"))?;
            Variant::number(narrow)
        }
        serde_json::Value::String(s) => Variant::string(s.as_str()),
        serde_json::Value::Array(items) => Variant::array(
            items
                .iter()
                .map(from_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut object = Variant::object();
            for (name, value) in map {
                object
                    .mem(name.as_str())?
                    .assign(from_json(value).with_context(|| format!("in key {name:?}"))?)?;
            }
            object
        }
    })
}
