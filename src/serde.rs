use core::{fmt, marker::PhantomData};
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
};

use crate::SpillVec;

impl<T: Serialize, const N: usize> Serialize for SpillVec<T, N> {
    /// Serialize a `SpillVec` as a sequence.
    ///
    /// The output does not depend on where the elements are stored.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for SpillVec<T, N> {
    /// Deserialize a `SpillVec` from a sequence.
    ///
    /// Elements are pushed one by one, so more than `N` of them end up on the heap.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpillVecVisitor<T, const N: usize> {
            _marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for SpillVecVisitor<T, N> {
            type Value = SpillVec<T, N>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vec = SpillVec::new();
                while let Some(element) = seq.next_element()? {
                    vec.push(element);
                }
                Ok(vec)
            }
        }

        deserializer.deserialize_seq(SpillVecVisitor {
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{SpillVec, spillvec};

    #[test]
    fn inline_json() {
        let v: SpillVec<_, 5> = spillvec![1, 2, 3];
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, "[1,2,3]");
        let r: SpillVec<i32, 5> = serde_json::from_str(&s).unwrap();
        assert_eq!(r, [1, 2, 3]);
        assert!(r.is_inline());
    }

    #[test]
    fn heap_json() {
        let v: SpillVec<_, 2> = spillvec!["a", "b", "c"];
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"["a","b","c"]"#);
        let r: SpillVec<alloc::string::String, 2> = serde_json::from_str(&s).unwrap();
        assert_eq!(r, ["a", "b", "c"]);
        assert_eq!(r.capacity(), 4);
    }

    #[test]
    fn rejects_non_sequence() {
        assert!(serde_json::from_str::<SpillVec<i32, 2>>("{}").is_err());
    }
}
