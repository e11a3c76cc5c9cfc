use serde::ser::{self, Serialize};

use crate::error::{Error, Result};

use super::skip::Skip;

/// Renders a single value into its querystring text.
///
/// Returns `None` when the entry should be dropped: an empty string, `None`,
/// unit, an empty sequence, and anything that is neither a string nor a
/// sequence (numbers, booleans, maps, structs, enum variants with data).
/// Non-empty sequences are joined with `,`, their elements coerced to text.
#[derive(Clone, Copy)]
pub struct ValueSerializer {
    in_sequence: bool,
}

impl ValueSerializer {
    /// Renders the value of a top-level entry.
    pub const ENTRY: Self = Self { in_sequence: false };
    /// Renders one element of a sequence value.
    const ELEMENT: Self = Self { in_sequence: true };

    /// Scalars only have a text form inside a sequence.
    fn scalar(self, text: impl FnOnce() -> String) -> Option<String> {
        self.in_sequence.then(text)
    }
}

macro_rules! serialize_itoa {
    (
        $($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                Ok(self.scalar(|| {
                    let mut buffer = itoa::Buffer::new();
                    buffer.format(v).to_owned()
                }))
            }
        )*
    };
}

/// Formats a float the way a querystring user expects to read it back:
/// integral values have no fractional part.
pub(crate) fn format_f64(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_owned()
    } else if v.is_infinite() {
        let s = if v > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_owned()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        buffer.format(v as i64).to_owned()
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format_finite(v).to_owned()
    }
}

pub(crate) fn format_f32(v: f32) -> String {
    if !v.is_finite() || v.fract() == 0.0 {
        return format_f64(f64::from(v));
    }
    let mut buffer = ryu::Buffer::new();
    buffer.format_finite(v).to_owned()
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<String>;
    type Error = Error;
    type SerializeSeq = ValueSeq;
    type SerializeTuple = ValueSeq;
    type SerializeTupleStruct = ValueSeq;
    type SerializeTupleVariant = Skip<Self::Ok>;
    type SerializeMap = Skip<Self::Ok>;
    type SerializeStruct = Skip<Self::Ok>;
    type SerializeStructVariant = Skip<Self::Ok>;

    serialize_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        u128 => serialize_u128,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
        i128 => serialize_i128,
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        Ok(self.scalar(|| format_f32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(self.scalar(|| format_f64(v)))
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(self.scalar(|| if v { "true" } else { "false" }.to_owned()))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        if v.is_empty() {
            return Ok(None);
        }
        Ok(Some(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ValueSeq {
            parts: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
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
        Ok(Skip::new("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(Skip::new("struct"))
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

/// Collects the elements of a sequence value.
///
/// Empty elements (`None`, `""`) still take up a slot, so `[None, "a"]`
/// renders as `,a`.
#[doc(hidden)]
pub struct ValueSeq {
    parts: Vec<String>,
}

impl ValueSeq {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let part = value.serialize(ValueSerializer::ELEMENT)?;
        self.parts.push(part.unwrap_or_default());
        Ok(())
    }

    fn finish(self) -> Option<String> {
        if self.parts.is_empty() {
            None
        } else {
            Some(self.parts.join(","))
        }
    }
}

impl ser::SerializeSeq for ValueSeq {
    type Ok = Option<String>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for ValueSeq {
    type Ok = Option<String>;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for ValueSeq {
    type Ok = Option<String>;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.finish())
    }
}
