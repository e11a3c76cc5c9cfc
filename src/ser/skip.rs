use std::marker::PhantomData;

use serde::ser::{self, Serialize};

use crate::error::{Error, Result};

/// Swallows a compound value that has no querystring form.
///
/// Finishes with `O::default()`, so the surrounding entry is dropped
/// instead of failing the whole call.
pub struct Skip<O>(PhantomData<O>);

impl<O: Default> Skip<O> {
    pub fn new(shape: &'static str) -> Self {
        tracing::trace!(shape, "dropping value without a querystring form");
        Skip(PhantomData)
    }
}

macro_rules! skip_elements {
    ($($trait:ident::$meth:ident,)*) => {
        $(
            impl<O: Default> ser::$trait for Skip<O> {
                type Ok = O;
                type Error = Error;

                fn $meth<T: ?Sized + Serialize>(&mut self, _value: &T) -> Result<()> {
                    Ok(())
                }

                fn end(self) -> Result<O> {
                    Ok(O::default())
                }
            }
        )*
    };
}

skip_elements! {
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field,
}

impl<O: Default> ser::SerializeMap for Skip<O> {
    type Ok = O;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, _key: &T) -> Result<()> {
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<O> {
        Ok(O::default())
    }
}

impl<O: Default> ser::SerializeStruct for Skip<O> {
    type Ok = O;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<O> {
        Ok(O::default())
    }
}

impl<O: Default> ser::SerializeStructVariant for Skip<O> {
    type Ok = O;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<O> {
        Ok(O::default())
    }
}
