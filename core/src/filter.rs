//! Client-side attribute filtering over vehicle records.
//!
//! # Design
//! Criteria are checked against an explicit schema table (`VehicleField` →
//! `FieldType`) before anything is fetched. `FilterCriteria::compile` runs
//! both checks over every key and yields a `VehicleFilter` that only holds
//! known fields with well-typed values, so matching itself cannot fail.
//!
//! Unknown keys are reported all together; a type mismatch reports only the
//! first offending field in criteria order.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::VehicleError;
use crate::types::Vehicle;

/// A filterable attribute of `Vehicle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Name,
    Model,
    Year,
    Color,
    Price,
    Latitude,
    Longitude,
    Id,
}

impl VehicleField {
    pub const ALL: [VehicleField; 8] = [
        VehicleField::Name,
        VehicleField::Model,
        VehicleField::Year,
        VehicleField::Color,
        VehicleField::Price,
        VehicleField::Latitude,
        VehicleField::Longitude,
        VehicleField::Id,
    ];

    /// The field's key in the wire format and in filter criteria.
    pub fn name(self) -> &'static str {
        match self {
            VehicleField::Name => "name",
            VehicleField::Model => "model",
            VehicleField::Year => "year",
            VehicleField::Color => "color",
            VehicleField::Price => "price",
            VehicleField::Latitude => "latitude",
            VehicleField::Longitude => "longitude",
            VehicleField::Id => "id",
        }
    }

    pub fn field_type(self) -> FieldType {
        match self {
            VehicleField::Name | VehicleField::Model | VehicleField::Color => FieldType::Text,
            VehicleField::Year | VehicleField::Price => FieldType::Integer,
            VehicleField::Latitude | VehicleField::Longitude => FieldType::Float,
            VehicleField::Id => FieldType::OptionalInteger,
        }
    }

    /// Whether `vehicle`'s value for this field equals `value`.
    ///
    /// `value` is expected to be accepted by `field_type()`; values of any
    /// other kind never match.
    pub fn matches(self, vehicle: &Vehicle, value: &Value) -> bool {
        match self {
            VehicleField::Name => value.as_str() == Some(vehicle.name.as_str()),
            VehicleField::Model => value.as_str() == Some(vehicle.model.as_str()),
            VehicleField::Color => value.as_str() == Some(vehicle.color.as_str()),
            VehicleField::Year => value.as_i64() == Some(vehicle.year),
            VehicleField::Price => value.as_i64() == Some(vehicle.price),
            VehicleField::Latitude => value.as_f64() == Some(vehicle.latitude),
            VehicleField::Longitude => value.as_f64() == Some(vehicle.longitude),
            VehicleField::Id => match value {
                Value::Null => vehicle.id.is_none(),
                other => other.as_i64().is_some() && other.as_i64() == vehicle.id,
            },
        }
    }
}

impl fmt::Display for VehicleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleField {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| VehicleError::InvalidFilterField {
                fields: vec![s.to_string()],
            })
    }
}

/// Declared type of a vehicle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Float,
    /// Integer or null; only `id` has this type.
    OptionalInteger,
}

impl FieldType {
    /// Whether a JSON value has the kind this type requires.
    ///
    /// Integers are not accepted for floats, nor floats for integers.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Text => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_f64(),
            FieldType::OptionalInteger => value.is_null() || FieldType::Integer.accepts(value),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Text => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::OptionalInteger => "integer or null",
        })
    }
}

/// Runtime kind of a JSON value supplied as a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// Field-name → required-value pairs, kept in insertion order.
///
/// Inserting a key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    entries: Vec<(String, Value)>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Typed-key variant of `with`; the key is always a known field.
    pub fn with_field(self, field: VehicleField, value: impl Into<Value>) -> Self {
        self.with(field.name(), value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validate every key and value against the vehicle schema.
    ///
    /// Fails with `InvalidFilterField` listing every unknown key, otherwise
    /// with `InvalidFilterValue` for the first value of the wrong kind.
    pub fn compile(&self) -> Result<VehicleFilter<'_>, VehicleError> {
        let mut terms = Vec::with_capacity(self.entries.len());
        let mut unknown = Vec::new();
        for (key, value) in &self.entries {
            match key.parse::<VehicleField>() {
                Ok(field) => terms.push((field, value)),
                Err(_) => unknown.push(key.clone()),
            }
        }
        if !unknown.is_empty() {
            return Err(VehicleError::InvalidFilterField { fields: unknown });
        }

        if let Some((field, value)) = terms
            .iter()
            .find(|(field, value)| !field.field_type().accepts(value))
        {
            return Err(VehicleError::InvalidFilterValue {
                field: field.name().to_string(),
                expected: field.field_type(),
                received: ValueKind::of(value),
            });
        }

        Ok(VehicleFilter { terms })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Self::new();
        for (key, value) in iter {
            criteria.insert(key, value);
        }
        criteria
    }
}

impl From<Map<String, Value>> for FilterCriteria {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Validated criteria, ready to test vehicles against.
#[derive(Debug, Clone)]
pub struct VehicleFilter<'a> {
    terms: Vec<(VehicleField, &'a Value)>,
}

impl VehicleFilter<'_> {
    /// True when the vehicle matches every term; an empty filter matches all.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.terms
            .iter()
            .all(|(field, value)| field.matches(vehicle, value))
    }

    /// Keep the matching vehicles, preserving their order.
    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}
