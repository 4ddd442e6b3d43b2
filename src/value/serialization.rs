//! Serde support for [`Value`].
//!
//! Values map onto the JSON data model: `Undefined` and `Null` serialize as
//! unit, sequences as seqs and mappings as maps. Functions and cyclic
//! containers have no representation and fail to serialize.

use std::cell::RefCell;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Mapping, Scalar, Sequence, Value};

/// Serializes a value while tracking the containers above it.
struct Guarded<'a> {
    value: &'a Value,
    ancestors: &'a RefCell<Vec<usize>>,
}

impl Guarded<'_> {
    fn enter<E: ser::Error>(&self, id: usize) -> Result<(), E> {
        let mut ancestors = self.ancestors.borrow_mut();
        if ancestors.contains(&id) {
            return Err(E::custom("cyclic structure cannot be serialized"));
        }
        ancestors.push(id);
        Ok(())
    }

    fn leave(&self) {
        self.ancestors.borrow_mut().pop();
    }
}

impl Serialize for Guarded<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value {
            Value::Scalar(Scalar::Undefined | Scalar::Null) => serializer.serialize_unit(),
            Value::Scalar(Scalar::Bool(flag)) => serializer.serialize_bool(*flag),
            Value::Scalar(Scalar::Integer(integer)) => serializer.serialize_i64(*integer),
            Value::Scalar(Scalar::Float(float)) => serializer.serialize_f64(*float),
            Value::Scalar(Scalar::Text(text)) => serializer.serialize_str(text),
            Value::Function(_) => Err(ser::Error::custom("functions cannot be serialized")),
            Value::Sequence(sequence) => {
                self.enter(sequence.id())?;
                let elements = sequence.to_vec();
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in &elements {
                    seq.serialize_element(&Guarded {
                        value: element,
                        ancestors: self.ancestors,
                    })?;
                }
                self.leave();
                seq.end()
            }
            Value::Mapping(mapping) => {
                self.enter(mapping.id())?;
                let entries = mapping.entries();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, entry) in &entries {
                    map.serialize_entry(
                        key,
                        &Guarded {
                            value: entry,
                            ancestors: self.ancestors,
                        },
                    )?;
                }
                self.leave();
                map.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Guarded {
            value: self,
            ancestors: &RefCell::new(Vec::new()),
        }
        .serialize(serializer)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON-like value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::null())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        match i64::try_from(value) {
            Ok(integer) => Ok(Value::from(integer)),
            Err(_) => Ok(Value::from(value as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let sequence = Sequence::new();
        while let Some(element) = access.next_element::<Value>()? {
            sequence.push(element);
        }
        Ok(Value::Sequence(sequence))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mapping = Mapping::new();
        while let Some((key, entry)) = access.next_entry::<String, Value>()? {
            mapping.insert(key, entry);
        }
        Ok(Value::Mapping(mapping))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
