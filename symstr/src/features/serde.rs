use core::fmt;

use serde::de::{
    Deserializer,
    Error,
    Unexpected,
    Visitor,
};

use crate::{
    SymStr,
    SymString,
};

fn sym_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SymString, D::Error> {
    struct SymStringVisitor;

    impl<'a> Visitor<'a> for SymStringVisitor {
        type Value = SymString;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(SymString::new(v))
        }

        fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(SymString::new(&v))
        }

        fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            match core::str::from_utf8(v) {
                Ok(s) => Ok(SymString::new(s)),
                Err(_) => Err(Error::invalid_value(Unexpected::Bytes(v), &self)),
            }
        }
    }

    deserializer.deserialize_str(SymStringVisitor)
}

impl serde::Serialize for SymString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl serde::Serialize for SymStr<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for SymString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        sym_string(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        sym,
        SymString,
    };

    #[test]
    fn test_round_trip() {
        let original = SymString::new("content-type");
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"content-type\"");

        let back: SymString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_serialize_view() {
        let view = sym!("etag");
        assert_eq!(serde_json::to_string(&view).unwrap(), "\"etag\"");
    }
}
