//! The envelope codec: outbound serialization and inbound response
//! application.
//!
//! An [`Envelope`] is built fresh for each outgoing create/update and
//! discarded once the response has been applied. The nested-attributes wire
//! convention is the backend's contract, not a client choice: embedded
//! associations go under `<key>_attributes` (with `id` and `_destroy` markers
//! on nested records), foreign-key references under `<key>_id`.
//!
//! Inbound, [`apply`] walks a response body and refreshes every mapped
//! property, reusing associated objects by [`RemoteId`] so a refresh never
//! duplicates list entries.

use crate::error::{MappingError, MappingResult};
use crate::id::RemoteId;
use crate::mapping::{NestingPolicy, Property, PropertyKind, TypeHint};
use crate::remote::RemoteModel;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// The JSON payload for one outgoing write, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// The payload as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Wraps the payload under the model-name key, the shape Rails
    /// controllers expect: `{"post": {...}}`.
    #[must_use]
    pub fn wrapped(self, model_name: &str) -> Value {
        let mut outer = Map::new();
        outer.insert(model_name.to_string(), Value::Object(self.0));
        Value::Object(outer)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One associated object captured for nesting: its identity, its attribute
/// map, and whether it is flagged for nested destruction. The rendering
/// policy (full attributes vs. id only) is applied later from the parent's
/// declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedRecord {
    id: Option<RemoteId>,
    attributes: Map<String, Value>,
    destroy: bool,
}

impl NestedRecord {
    /// Captures an object as a nested record (shallow: the object's own
    /// embedded associations are skipped unless it opts them in via
    /// [`RemoteModel::include_when_nested`]).
    pub fn of<T: RemoteModel>(obj: &T) -> MappingResult<Self> {
        Ok(Self {
            id: obj.remote_id(),
            attributes: attributes(obj, true)?,
            destroy: obj.destroy_on_nesting(),
        })
    }

    fn render(self) -> Value {
        let mut map = self.attributes;
        if let Some(id) = self.id {
            map.insert("id".to_string(), Value::from(id.as_i64()));
        }
        if self.destroy {
            map.insert("_destroy".to_string(), Value::Bool(true));
        }
        Value::Object(map)
    }
}

/// What a model hands back for one declared property during serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// A plain JSON value.
    Value(Value),
    /// A timestamp, formatted by the codec with the wire format.
    DateTime(Option<DateTime<Utc>>),
    /// A to-one association's contents.
    One(Option<NestedRecord>),
    /// A to-many association's contents, in order.
    Many(Vec<NestedRecord>),
}

impl Encoded {
    /// A plain scalar value.
    pub fn value(v: impl Into<Value>) -> Self {
        Encoded::Value(v.into())
    }

    /// A timestamp scalar.
    #[must_use]
    pub fn datetime(ts: Option<DateTime<Utc>>) -> Self {
        Encoded::DateTime(ts)
    }

    /// Captures a to-one association.
    pub fn one<T: RemoteModel>(obj: Option<&T>) -> MappingResult<Self> {
        Ok(Encoded::One(match obj {
            Some(obj) => Some(NestedRecord::of(obj)?),
            None => None,
        }))
    }

    /// Captures a to-many association.
    pub fn many<'a, T, I>(items: I) -> MappingResult<Self>
    where
        T: RemoteModel + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut records = Vec::new();
        for item in items {
            records.push(NestedRecord::of(item)?);
        }
        Ok(Encoded::Many(records))
    }

    fn shape(&self) -> &'static str {
        match self {
            Encoded::Value(_) => "a plain value",
            Encoded::DateTime(_) => "a timestamp",
            Encoded::One(_) => "a to-one record",
            Encoded::Many(_) => "to-many records",
        }
    }
}

/// Builds the outgoing envelope for an object.
///
/// The object's own `id` is never included at the top level — it is already
/// in the request route. Validates the mapping first, so declaration errors
/// fail loudly on the first serialization attempt.
pub fn envelope<T: RemoteModel>(obj: &T) -> MappingResult<Envelope> {
    Ok(Envelope(attributes(obj, false)?))
}

fn attributes<T: RemoteModel>(obj: &T, nested: bool) -> MappingResult<Map<String, Value>> {
    let mapping = T::mapping();
    mapping.validate()?;
    let mut out = Map::new();
    for property in mapping.properties() {
        if nested && property.is_embedded() && !obj.include_when_nested(&property.name) {
            continue;
        }
        let Some(encoded) = obj.encode_property(&property.name)? else {
            continue;
        };
        let (key, value) = render(property, encoded)?;
        out.insert(key, value);
    }
    Ok(out)
}

fn render(property: &Property, encoded: Encoded) -> MappingResult<(String, Value)> {
    let key = property.outbound_key();
    let value = match (&property.kind, encoded) {
        (PropertyKind::Scalar { .. }, Encoded::Value(v)) => v,
        (
            PropertyKind::Scalar {
                hint: Some(TypeHint::DateTime),
            },
            Encoded::DateTime(ts),
        ) => match ts {
            Some(ts) => Value::String(format_datetime(&ts)),
            None => Value::Null,
        },
        (
            PropertyKind::Association {
                to_many: false,
                policy: NestingPolicy::Embed,
            },
            Encoded::One(record),
        ) => record.map_or(Value::Null, NestedRecord::render),
        (
            PropertyKind::Association {
                to_many: true,
                policy: NestingPolicy::Embed,
            },
            Encoded::Many(records),
        ) => Value::Array(records.into_iter().map(NestedRecord::render).collect()),
        (
            PropertyKind::Association {
                to_many: false,
                policy: NestingPolicy::ReferenceById,
            },
            Encoded::One(record),
        ) => record
            .and_then(|r| r.id)
            .map_or(Value::Null, |id| Value::from(id.as_i64())),
        (
            PropertyKind::Association {
                to_many: true,
                policy: NestingPolicy::ReferenceById,
            },
            Encoded::Many(records),
        ) => Value::Array(
            records
                .into_iter()
                .filter_map(|r| r.id)
                .map(|id| Value::from(id.as_i64()))
                .collect(),
        ),
        (kind, encoded) => {
            return Err(MappingError::KindMismatch {
                property: property.name.clone(),
                expected: match kind {
                    PropertyKind::Scalar {
                        hint: Some(TypeHint::DateTime),
                    } => "a timestamp",
                    PropertyKind::Scalar { hint: None } => "a plain value",
                    PropertyKind::Association { to_many: false, .. } => "a to-one record",
                    PropertyKind::Association { to_many: true, .. } => "to-many records",
                },
                got: encoded.shape(),
            });
        }
    };
    Ok((key, value))
}

/// Applies a response body onto an object.
///
/// Walks the response's keys: `id` populates the object's [`RemoteId`] (an
/// already-set, different id is a [`MappingError::RemoteIdConflict`]); every
/// other key reverse-maps through the declaration and is handed to the
/// model's decode hook. Keys with no declaration are ignored.
pub fn apply<T: RemoteModel>(obj: &mut T, body: &Value) -> MappingResult<()> {
    let map = body
        .as_object()
        .ok_or(MappingError::MalformedResponse("a JSON object"))?;
    let mapping = T::mapping();
    for (key, value) in map {
        if key == "id" {
            if value.is_null() {
                continue;
            }
            let incoming = RemoteId::from(value.as_i64().ok_or(MappingError::UnexpectedValue {
                property: "id".to_string(),
                expected: "an integer id",
            })?);
            match obj.remote_id() {
                None => obj.set_remote_id(Some(incoming)),
                Some(assigned) if assigned == incoming => {}
                Some(assigned) => {
                    return Err(MappingError::RemoteIdConflict { assigned, incoming });
                }
            }
            continue;
        }
        if let Some(property) = mapping.property_for_remote_key(key) {
            let name = property.name.clone();
            obj.decode_property(&name, value)?;
        }
    }
    Ok(())
}

/// Refreshes a to-many association from a response value.
///
/// Entries carrying an `id` that matches an existing member update that
/// member in place; entries without a match are freshly constructed. Members
/// absent from the response are dropped — the server is authoritative for a
/// refresh. `null` clears the collection.
pub fn merge_many<T: RemoteModel>(items: &mut Vec<T>, value: &Value) -> MappingResult<()> {
    if value.is_null() {
        items.clear();
        return Ok(());
    }
    let entries = value
        .as_array()
        .ok_or(MappingError::MalformedResponse("a JSON array"))?;
    let mut refreshed = Vec::with_capacity(entries.len());
    for entry in entries {
        let incoming_id = entry.get("id").and_then(Value::as_i64).map(RemoteId::from);
        let mut member = match incoming_id
            .and_then(|id| items.iter().position(|m| m.remote_id() == Some(id)))
        {
            Some(pos) => items.remove(pos),
            None => T::default(),
        };
        apply(&mut member, entry)?;
        refreshed.push(member);
    }
    *items = refreshed;
    Ok(())
}

/// Refreshes a to-one association from a response value. Reuses the existing
/// object when the incoming `id` matches; `null` clears the slot.
pub fn merge_one<T: RemoteModel>(slot: &mut Option<T>, value: &Value) -> MappingResult<()> {
    if value.is_null() {
        *slot = None;
        return Ok(());
    }
    let incoming_id = value.get("id").and_then(Value::as_i64).map(RemoteId::from);
    let mut member = match (slot.take(), incoming_id) {
        (Some(existing), Some(id)) if existing.remote_id() == Some(id) => existing,
        _ => T::default(),
    };
    apply(&mut member, value)?;
    *slot = Some(member);
    Ok(())
}

fn format_datetime(ts: &DateTime<Utc>) -> String {
    // AutoSi keeps whole-second values in the Rails default shape
    // ("2014-01-01T00:00:00Z") while round-tripping subsecond precision.
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decode helpers for use inside [`RemoteModel::decode_property`]
/// implementations.
pub mod decode {
    use super::*;

    /// A string value; `null` decodes as the empty string.
    pub fn string(property: &str, value: &Value) -> MappingResult<String> {
        match value {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            _ => Err(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "a string",
            }),
        }
    }

    /// An optional string value.
    pub fn opt_string(property: &str, value: &Value) -> MappingResult<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "a string",
            }),
        }
    }

    /// An optional integer value.
    pub fn opt_i64(property: &str, value: &Value) -> MappingResult<Option<i64>> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n.as_i64().ok_or(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "an integer",
            })
            .map(Some),
            _ => Err(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "an integer",
            }),
        }
    }

    /// A boolean value; `null` decodes as `false`.
    pub fn bool(property: &str, value: &Value) -> MappingResult<bool> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            _ => Err(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "a boolean",
            }),
        }
    }

    /// An optional RFC 3339 timestamp.
    pub fn datetime(property: &str, value: &Value) -> MappingResult<Option<DateTime<Utc>>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|_| MappingError::InvalidTimestamp(s.clone())),
            _ => Err(MappingError::UnexpectedValue {
                property: property.to_string(),
                expected: "a timestamp string",
            }),
        }
    }
}
