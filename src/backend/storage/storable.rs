// src/backend/storage/storable.rs
use ic_stable_structures::{storable::Bound, Storable};
use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;

/// Wraps any serde type to make it Storable using CBOR encoding.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct Cbor<T>(pub T)
where
    T: Serialize + DeserializeOwned;

impl<T> Storable for Cbor<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        let mut writer = vec![];
        ciborium::ser::into_writer(&self.0, &mut writer)
            .expect("Failed to serialize value to CBOR for stable storage");
        Cow::Owned(writer)
    }

    fn from_bytes(bytes: Cow<[u8]>) -> Self {
        let value: T = ciborium::de::from_reader(bytes.as_ref())
            .expect("Failed to deserialize value from CBOR from stable storage");
        Cbor(value)
    }

    // Story titles and chapter bodies vary widely in size.
    const BOUND: Bound = Bound::Unbounded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlotDecision, PlotOption};

    #[test]
    fn test_cbor_wrapper_restores_stored_value() {
        let mut decision = PlotDecision::open("left".to_string(), "right".to_string());
        decision.record_vote(PlotOption::OptionA);

        let bytes = Cbor(decision.clone()).to_bytes().into_owned();
        let restored: Cbor<PlotDecision> = Cbor::from_bytes(Cow::Owned(bytes));

        assert_eq!(restored.0, decision);
    }
}
