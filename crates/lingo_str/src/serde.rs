use std::fmt;

use indexmap::IndexMap;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Serialize,
};

use crate::types::StringMap;

impl Serialize for StringMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (hash, value) in self.iter() {
            map.serialize_entry(hash, value)?;
        }
        map.end()
    }
}

struct StringMapVisitor {}

impl StringMapVisitor {
    fn new() -> Self {
        StringMapVisitor {}
    }
}

impl<'de> Visitor<'de> for StringMapVisitor {
    type Value = StringMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a hash/string map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

        while let Some((hash, value)) = access.next_entry::<u32, String>()? {
            map.insert(hash, value);
        }

        Ok(map.into())
    }
}

impl<'de> Deserialize<'de> for StringMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(StringMapVisitor::new())
    }
}

#[cfg(test)]
mod test {
    use crate::types::StringMap;

    #[test]
    fn serialize_in_map_order() -> serde_json::Result<()> {
        let map = StringMap::compile([("title", "Antkeeper"), ("back", "Back")]);

        let json = serde_json::to_string(&map)?;
        assert_eq!(json, r#"{"2556802313":"Antkeeper","1538531746":"Back"}"#);
        Ok(())
    }

    #[test]
    fn deserialize_hash_keys() -> serde_json::Result<()> {
        let map: StringMap = serde_json::from_str(r#"{"1538531746":"Back","2556802313":"Antkeeper"}"#)?;

        assert_eq!(map.get_str("back"), Some("Back"));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1538531746, 2556802313]);
        Ok(())
    }
}
