/*
 * Copyright 2016-2019 Ben Ashford
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Helpers for common requirements when producing JSON

use serde::ser::{Serialize, SerializeMap, Serializer};

/// To tell Serde to skip various fields
pub trait ShouldSkip {
    fn should_skip(&self) -> bool;
}

/// To indicate whether an optional field should be skipped if None
impl<T> ShouldSkip for Option<T> {
    fn should_skip(&self) -> bool {
        self.is_none()
    }
}

/// No outer options
///
/// Literally serializes to nothing
#[derive(Debug, Default)]
pub struct NoOuter;

impl MergeSerialize for NoOuter {
    fn merge_serialize<S>(&self, _: &mut S) -> Result<(), S::Error>
    where
        S: SerializeMap,
    {
        // No-op
        Ok(())
    }
}

/// A recurring theme in ElasticSearch is for JSON to be `{"variable": {..map of options..}}`
#[derive(Debug)]
pub struct FieldBased<F, I, O> {
    pub field: F,
    pub inner: I,
    pub outer: O,
}

impl<F, I, O> FieldBased<F, I, O> {
    pub fn new(field: F, inner: I, outer: O) -> Self {
        FieldBased {
            field,
            inner,
            outer,
        }
    }
}

impl<F, I, O> Serialize for FieldBased<F, I, O>
where
    F: Serialize,
    I: Serialize,
    O: MergeSerialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry(&self.field, &self.inner)?;
        self.outer.merge_serialize(&mut map)?;

        map.end()
    }
}

/// MergeSerialize, implemented by structs that want to add to an existing struct
pub trait MergeSerialize {
    fn merge_serialize<S>(&self, serializer: &mut S) -> Result<(), S::Error>
    where
        S: SerializeMap;
}

/// Macro to allow access to the inner object, assumes FieldBased is wrapped in a newtype
macro_rules! add_inner_field {
    ($n:ident, $f:ident, $t:ty) => {
        pub fn $n<T: Into<$t>>(mut self, val: T) -> Self {
            self.0.inner.$f = Some(val.into());
            self
        }
    };
}

#[cfg(test)]
pub mod tests {
    use serde::Serialize;

    use super::{FieldBased, NoOuter, ShouldSkip};

    #[derive(Serialize)]
    struct RequestOptions {
        timeout: String,
        #[serde(skip_serializing_if = "ShouldSkip::should_skip")]
        routing: Option<String>,
    }

    #[derive(Serialize)]
    struct Directive(FieldBased<String, RequestOptions, NoOuter>);

    impl Directive {
        fn new(key: String, options: RequestOptions) -> Self {
            Directive(FieldBased::new(key, options, NoOuter))
        }
    }

    #[test]
    fn test_field_based() {
        let d = Directive::new(
            "refresh".to_owned(),
            RequestOptions {
                timeout: "5s".to_owned(),
                routing: None,
            },
        );
        let s = serde_json::to_string(&d).unwrap();
        assert_eq!("{\"refresh\":{\"timeout\":\"5s\"}}", s);
    }

    #[test]
    fn test_field_based_keeps_present_options() {
        let d = Directive::new(
            "refresh".to_owned(),
            RequestOptions {
                timeout: "1s".to_owned(),
                routing: Some("abc".to_owned()),
            },
        );
        let s = serde_json::to_string(&d).unwrap();
        assert_eq!("{\"refresh\":{\"timeout\":\"1s\",\"routing\":\"abc\"}}", s);
    }
}
