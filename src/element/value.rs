//! Dynamic element values.
//!
//! [`Value`] lets one Rust collection type hold differently shaped data while
//! the runtime [`ElementType`] tag keeps each instance homogeneous.

use std::cmp::Ordering;
use std::fmt;

use super::{Element, ElementType};

/// A dynamically typed element.
///
/// Map entries keep their insertion order.
///
/// # Examples
///
/// ```rust
/// use strict_collections::element::{Element, ElementType, Value};
///
/// let value = Value::from(vec![Value::from(1), Value::from(2)]);
/// assert_eq!(value.element_type(), ElementType::List);
/// assert_eq!(format!("{value}"), "[1, 2]");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
    /// A sequence of values.
    List(Vec<Value>),
    /// String keys mapped to values, in insertion order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Element for Value {
    fn element_type(&self) -> ElementType {
        match self {
            Self::Null => ElementType::Null,
            Self::Bool(_) => ElementType::Bool,
            Self::Integer(_) => ElementType::Integer,
            Self::Float(_) => ElementType::Float,
            Self::Text(_) => ElementType::Text,
            Self::List(_) => ElementType::List,
            Self::Map(_) => ElementType::Map,
        }
    }

    /// Scalars of the same variant compare naturally; everything else is
    /// incomparable.
    fn try_compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (Self::Integer(left), Self::Integer(right)) => Some(left.cmp(right)),
            (Self::Float(left), Self::Float(right)) => left.partial_cmp(right),
            (Self::Text(left), Self::Text(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }

    fn is_json_representable(&self) -> bool {
        match self {
            Self::Float(float) => float.is_finite(),
            Self::List(elements) => elements.iter().all(Element::is_json_representable),
            Self::Map(entries) => entries
                .iter()
                .all(|(_, value)| value.is_json_representable()),
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float}"),
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::List(elements) => {
                formatter.write_str("[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Map(entries) => {
                formatter.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key:?}: {value}")?;
                }
                formatter.write_str("}")
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Integer(i64::from(integer))
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::List(elements)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

// =============================================================================
// Serde Support
// =============================================================================
//
// Human-readable formats see plain JSON shapes. Binary formats such as bincode
// cannot drive `deserialize_any`, so they see an externally tagged mirror enum.

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
enum TaggedValueRef<'a> {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(&'a str),
    List(&'a [Value]),
    Map(&'a [(String, Value)]),
}


#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error, SerializeMap};

        if !serializer.is_human_readable() {
            let tagged = match self {
                Self::Null => TaggedValueRef::Null,
                Self::Bool(boolean) => TaggedValueRef::Bool(*boolean),
                Self::Integer(integer) => TaggedValueRef::Integer(*integer),
                Self::Float(float) => TaggedValueRef::Float(*float),
                Self::Text(text) => TaggedValueRef::Text(text),
                Self::List(elements) => TaggedValueRef::List(elements),
                Self::Map(entries) => TaggedValueRef::Map(entries),
            };
            return serde::Serialize::serialize(&tagged, serializer);
        }

        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(boolean) => serializer.serialize_bool(*boolean),
            Self::Integer(integer) => serializer.serialize_i64(*integer),
            Self::Float(float) if float.is_finite() => serializer.serialize_f64(*float),
            Self::Float(float) => Err(S::Error::custom(format!(
                "non-finite float {float} has no JSON representation"
            ))),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(elements) => serializer.collect_seq(elements),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-compatible value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: serde::de::Error>(self, boolean: bool) -> Result<Value, E> {
        Ok(Value::Bool(boolean))
    }

    fn visit_i64<E: serde::de::Error>(self, integer: i64) -> Result<Value, E> {
        Ok(Value::Integer(integer))
    }

    fn visit_u64<E: serde::de::Error>(self, integer: u64) -> Result<Value, E> {
        i64::try_from(integer)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer {integer} does not fit in i64")))
    }

    fn visit_f64<E: serde::de::Error>(self, float: f64) -> Result<Value, E> {
        Ok(Value::Float(float))
    }

    fn visit_str<E: serde::de::Error>(self, text: &str) -> Result<Value, E> {
        Ok(Value::Text(text.to_owned()))
    }

    fn visit_string<E: serde::de::Error>(self, text: String) -> Result<Value, E> {
        Ok(Value::Text(text))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(Value::List(elements))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries: Vec<(String, Value)> = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Value::Map(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if !deserializer.is_human_readable() {
            return serde::de::DeserializeSeed::deserialize(
                tagged::TaggedSeed::root(),
                deserializer,
            );
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Decoding of the tagged binary shape.
///
/// Each `List` or `Map` level spends one unit of depth. Decoding fails once
/// more than `MAX_DEPTH` levels are nested.
#[cfg(feature = "serde")]
mod tagged {
    use std::fmt;

    use serde::de::{
        DeserializeSeed, Deserializer, EnumAccess, Error, SeqAccess, Unexpected, VariantAccess,
        Visitor,
    };

    use super::Value;

    /// Deepest `List`/`Map` nesting accepted from a binary payload.
    pub(super) const MAX_DEPTH: usize = 128;

    const MAX_PREALLOCATE: usize = 4096;

    const VARIANTS: &[&str] = &["Null", "Bool", "Integer", "Float", "Text", "List", "Map"];

    enum Tag {
        Null,
        Bool,
        Integer,
        Float,
        Text,
        List,
        Map,
    }

    impl Tag {
        const fn from_index(index: u64) -> Option<Self> {
            match index {
                0 => Some(Self::Null),
                1 => Some(Self::Bool),
                2 => Some(Self::Integer),
                3 => Some(Self::Float),
                4 => Some(Self::Text),
                5 => Some(Self::List),
                6 => Some(Self::Map),
                _ => None,
            }
        }
    }

    struct TagVisitor;

    impl Visitor<'_> for TagVisitor {
        type Value = Tag;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a value variant")
        }

        fn visit_u64<E: Error>(self, index: u64) -> Result<Tag, E> {
            Tag::from_index(index).ok_or_else(|| {
                E::invalid_value(Unexpected::Unsigned(index), &"variant index 0 <= i < 7")
            })
        }

        fn visit_str<E: Error>(self, name: &str) -> Result<Tag, E> {
            VARIANTS
                .iter()
                .position(|variant| *variant == name)
                .and_then(|index| u64::try_from(index).ok())
                .and_then(Tag::from_index)
                .ok_or_else(|| E::unknown_variant(name, VARIANTS))
        }
    }

    impl<'de> serde::Deserialize<'de> for Tag {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_identifier(TagVisitor)
        }
    }

    /// Decodes one tagged [`Value`] with `remaining_depth` levels left.
    #[derive(Clone, Copy)]
    pub(super) struct TaggedSeed {
        remaining_depth: usize,
    }

    impl TaggedSeed {
        pub(super) const fn root() -> Self {
            Self {
                remaining_depth: MAX_DEPTH,
            }
        }

        fn nested<E: Error>(self) -> Result<Self, E> {
            self.remaining_depth
                .checked_sub(1)
                .map(|remaining_depth| Self { remaining_depth })
                .ok_or_else(|| E::custom(format!("value nesting exceeds {MAX_DEPTH} levels")))
        }
    }

    impl<'de> DeserializeSeed<'de> for TaggedSeed {
        type Value = Value;

        fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_enum("Value", VARIANTS, self)
        }
    }

    impl<'de> Visitor<'de> for TaggedSeed {
        type Value = Value;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a tagged value")
        }

        fn visit_enum<A>(self, data: A) -> Result<Value, A::Error>
        where
            A: EnumAccess<'de>,
        {
            let (tag, variant) = data.variant::<Tag>()?;
            match tag {
                Tag::Null => variant.unit_variant().map(|()| Value::Null),
                Tag::Bool => variant.newtype_variant().map(Value::Bool),
                Tag::Integer => variant.newtype_variant().map(Value::Integer),
                Tag::Float => variant.newtype_variant().map(Value::Float),
                Tag::Text => variant.newtype_variant().map(Value::Text),
                Tag::List => variant
                    .newtype_variant_seed(ListSeed(self.nested::<A::Error>()?))
                    .map(Value::List),
                Tag::Map => variant
                    .newtype_variant_seed(MapSeed(self.nested::<A::Error>()?))
                    .map(Value::Map),
            }
        }
    }

    struct ListSeed(TaggedSeed);

    impl<'de> DeserializeSeed<'de> for ListSeed {
        type Value = Vec<Value>;

        fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(self)
        }
    }

    impl<'de> Visitor<'de> for ListSeed {
        type Value = Vec<Value>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of tagged values")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
            let mut elements = Vec::with_capacity(capacity);
            while let Some(element) = seq.next_element_seed(self.0)? {
                elements.push(element);
            }
            Ok(elements)
        }
    }

    struct MapSeed(TaggedSeed);

    impl<'de> DeserializeSeed<'de> for MapSeed {
        type Value = Vec<(String, Value)>;

        fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(self)
        }
    }

    impl<'de> Visitor<'de> for MapSeed {
        type Value = Vec<(String, Value)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of tagged entries")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
            let mut entries = Vec::with_capacity(capacity);
            while let Some(entry) = seq.next_element_seed(EntrySeed(self.0))? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    struct EntrySeed(TaggedSeed);

    impl<'de> DeserializeSeed<'de> for EntrySeed {
        type Value = (String, Value);

        fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_tuple(2, self)
        }
    }

    impl<'de> Visitor<'de> for EntrySeed {
        type Value = (String, Value);

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a key and a tagged value")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let key = seq
                .next_element::<String>()?
                .ok_or_else(|| A::Error::invalid_length(0, &self))?;
            let value = seq
                .next_element_seed(self.0)?
                .ok_or_else(|| A::Error::invalid_length(1, &self))?;
            Ok((key, value))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, ElementType::Null)]
    #[case(Value::from(true), ElementType::Bool)]
    #[case(Value::from(7), ElementType::Integer)]
    #[case(Value::from(0.5), ElementType::Float)]
    #[case(Value::from("seven"), ElementType::Text)]
    #[case(Value::List(vec![]), ElementType::List)]
    #[case(Value::Map(vec![]), ElementType::Map)]
    fn test_variant_element_types(#[case] value: Value, #[case] expected: ElementType) {
        assert_eq!(value.element_type(), expected);
    }

    #[rstest]
    fn test_mixed_variants_are_incomparable() {
        assert_eq!(Value::from(1).try_compare(&Value::from("1")), None);
        assert_eq!(Value::Null.try_compare(&Value::Null), None);
        assert_eq!(
            Value::from("a").try_compare(&Value::from("b")),
            Some(Ordering::Less)
        );
    }

    #[rstest]
    fn test_nested_non_finite_float_is_not_json_representable() {
        let value = Value::Map(vec![(
            "inner".to_string(),
            Value::List(vec![Value::from(f64::NAN)]),
        )]);
        assert!(!value.is_json_representable());
    }

    #[rstest]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[rstest]
    fn test_display_map() {
        let value = Value::Map(vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::Null),
        ]);
        assert_eq!(format!("{value}"), "{\"a\": 1, \"b\": null}");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Value {
        Value::Map(vec![
            ("name".to_string(), Value::from("widget")),
            ("count".to_string(), Value::from(3)),
            ("ratio".to_string(), Value::from(0.25)),
            (
                "tags".to_string(),
                Value::List(vec![Value::from(true), Value::Null]),
            ),
        ])
    }

    #[rstest]
    fn test_json_uses_plain_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"widget","count":3,"ratio":0.25,"tags":[true,null]}"#
        );
    }

    #[rstest]
    fn test_json_roundtrip_preserves_map_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let restored: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sample());
    }

    #[rstest]
    fn test_bincode_roundtrip_uses_tagged_shape() {
        let bytes = bincode::serialize(&sample()).unwrap();
        let restored: Value = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, sample());
    }

    #[rstest]
    fn test_bincode_roundtrip_keeps_non_finite_float() {
        let bytes = bincode::serialize(&Value::from(f64::INFINITY)).unwrap();
        let restored: Value = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, Value::Float(f64::INFINITY));
    }

    fn nested_list(depth: usize) -> Value {
        (0..depth).fold(Value::Null, |inner, _| Value::List(vec![inner]))
    }

    #[rstest]
    fn test_bincode_accepts_nesting_up_to_limit() {
        let value = nested_list(tagged::MAX_DEPTH);
        let bytes = bincode::serialize(&value).unwrap();
        let restored: Value = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, value);
    }

    #[rstest]
    fn test_bincode_rejects_nesting_past_limit() {
        let bytes = bincode::serialize(&nested_list(tagged::MAX_DEPTH + 1)).unwrap();
        let error = bincode::deserialize::<Value>(&bytes).unwrap_err();
        assert!(error.to_string().contains("nesting exceeds 128 levels"));
    }

    #[rstest]
    fn test_bincode_rejects_unknown_variant() {
        let bytes = 9_u32.to_le_bytes();
        assert!(bincode::deserialize::<Value>(&bytes).is_err());
    }

    #[rstest]
    fn test_json_rejects_non_finite_float() {
        assert!(serde_json::to_string(&Value::from(f64::NAN)).is_err());
    }

    #[rstest]
    fn test_json_rejects_oversized_unsigned_integer() {
        assert!(serde_json::from_str::<Value>("18446744073709551615").is_err());
    }
}
