//! Serialization support for querystrings.

mod encode;
mod key;
mod skip;
mod value;

pub use encode::encode;

use key::KeySerializer;
use skip::Skip;
use value::ValueSerializer;

use serde::ser::{self, Serialize};

use crate::error::*;

use std::io::Write;

/// Serializes a value into a querystring using the default
/// [`Config`](crate::Config).
///
/// Only map-like values (maps, structs, sequences) produce output; anything
/// else yields an empty string. Entries are kept only when their value is a
/// non-empty string or a non-empty sequence. Numbers, booleans and nested
/// maps are dropped.
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     nickname: Option<String>,
///     tags: Vec<&'static str>,
///     page: u32,
/// }
///
/// # fn main(){
/// let q = Query {
///     name: "Alice Smith".to_owned(),
///     nickname: None,
///     tags: vec!["a", "b"],
///     page: 2,
/// };
///
/// assert_eq!(
///     querify::stringify(&q).unwrap(),
///     "name=Alice%20Smith&tags=a%2Cb");
/// assert_eq!(querify::stringify(&42).unwrap(), "");
/// # }
/// ```
pub fn stringify<T: ?Sized + Serialize>(input: &T) -> Result<String> {
    crate::Config::default().stringify(input)
}

/// Serializes a value into a generic writer object.
///
/// ```
/// use std::collections::BTreeMap;
///
/// let query = BTreeMap::from([("empty", ""), ("foo", "bar")]);
/// let mut buffer = Vec::new();
/// querify::to_writer(&query, &mut buffer).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "foo=bar");
/// ```
pub fn to_writer<T: ?Sized + Serialize, W: Write>(input: &T, writer: &mut W) -> Result<()> {
    crate::Config::default().stringify_to_writer(input, writer)
}

/// A serializer for the querystring format.
///
/// Writes one `key=value` pair per entry of the top-level map, struct or
/// sequence (sequences use their indices as keys). Values are rendered by a
/// separate value serializer which drops empty and non-text values and joins
/// sequences with `,`.
pub struct QsSerializer<W: Write> {
    writer: W,
    first_kv: bool,
    encode: bool,
}

impl<W: Write> QsSerializer<W> {
    /// Creates a new `QsSerializer` with the given writer.
    pub fn new(writer: W, encode: bool) -> Self {
        Self {
            writer,
            first_kv: true,
            encode,
        }
    }

    fn write_component(&mut self, component: &str) -> Result<()> {
        if self.encode {
            self.writer.write_all(encode(component).as_bytes())?;
        } else {
            self.writer.write_all(component.as_bytes())?;
        }
        Ok(())
    }

    fn write_pair(&mut self, key: &str, value: &str) -> Result<()> {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.writer.write_all(b"&")?;
        }
        self.write_component(key)?;
        self.writer.write_all(b"=")?;
        self.write_component(value)
    }

    /// Renders `value` and writes it under `key`, unless the value is empty.
    fn write_entry<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        match value.serialize(ValueSerializer::ENTRY)? {
            Some(value) => self.write_pair(key, &value),
            None => {
                tracing::trace!(key, "skipping empty value");
                Ok(())
            }
        }
    }
}

impl<'a, W: Write> ser::Serializer for &'a mut QsSerializer<W> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = QsSeq<'a, W>;
    type SerializeTuple = QsSeq<'a, W>;
    type SerializeTupleStruct = QsSeq<'a, W>;
    type SerializeTupleVariant = Skip<()>;
    type SerializeMap = QsMap<'a, W>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Skip<()>;

    // scalars are not map-like and produce no output

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<()> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<()> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<()> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<()> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        Ok(())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Ok(())
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Ok(())
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    /// Externally tagged: `Variant(value)` is written as `Variant=value`.
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.write_entry(variant, value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(QsSeq::new(self))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(QsSeq::new(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(QsSeq::new(self))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Skip::new("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(QsMap::new(self))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Skip::new("struct variant"))
    }
}

impl<W: Write> ser::SerializeStruct for &mut QsSerializer<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.write_entry(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

#[doc(hidden)]
pub struct QsSeq<'s, W: Write> {
    qs: &'s mut QsSerializer<W>,
    counter: usize,
}

impl<'a, W: Write> QsSeq<'a, W> {
    fn new(qs: &'a mut QsSerializer<W>) -> Self {
        Self { qs, counter: 0 }
    }

    /// Writes the element under its index.
    fn write_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        let key = buffer.format(self.counter);
        self.counter += 1;
        self.qs.write_entry(key, value)
    }
}

impl<W: Write> ser::SerializeSeq for QsSeq<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.write_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl<W: Write> ser::SerializeTuple for QsSeq<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.write_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl<W: Write> ser::SerializeTupleStruct for QsSeq<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.write_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

#[doc(hidden)]
pub struct QsMap<'s, W: Write> {
    qs: &'s mut QsSerializer<W>,
    key: Option<Option<String>>,
}

impl<'a, W: Write> QsMap<'a, W> {
    fn new(qs: &'a mut QsSerializer<W>) -> Self {
        Self { qs, key: None }
    }
}

impl<W: Write> ser::SerializeMap for QsMap<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let Some(key) = self.key.take() else {
            return Err(Error::Custom(
                "internal error: value serialized before its key".to_string(),
            ));
        };
        match key {
            Some(key) => self.qs.write_entry(&key, value),
            None => {
                tracing::trace!("skipping entry whose key has no text form");
                Ok(())
            }
        }
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}
