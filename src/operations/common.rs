/*
 * Copyright 2015-2019 Ben Ashford
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

//! Common options for the various operations

use std::fmt;

/// A newtype for the value of a query-string parameter
#[derive(Debug)]
pub struct OptionVal(pub String);

impl From<&str> for OptionVal {
    fn from(from: &str) -> OptionVal {
        OptionVal(from.to_owned())
    }
}

impl From<String> for OptionVal {
    fn from(from: String) -> OptionVal {
        OptionVal(from)
    }
}

macro_rules! from_display {
    ($t:ty) => {
        impl From<$t> for OptionVal {
            fn from(from: $t) -> OptionVal {
                OptionVal(from.to_string())
            }
        }
    };
}

from_display!(bool);
from_display!(i32);
from_display!(i64);
from_display!(u32);
from_display!(u64);

/// Every ES operation has a set of options
#[derive(Debug, Default)]
pub struct Options<'a>(Vec<(&'a str, OptionVal)>);

impl<'a> Options<'a> {
    pub fn new() -> Options<'a> {
        Options(Vec::new())
    }

    pub fn push<O: Into<OptionVal>>(&mut self, key: &'a str, val: O) {
        self.0.push((key, val.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Formats the options as a query string, or nothing at all when no options
/// are set
impl<'a> fmt::Display for Options<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        for (i, (key, OptionVal(val))) in self.0.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, val)?;
        }
        Ok(())
    }
}

/// Adds a function to an operation to add specific options to that operations
/// builder interface.
macro_rules! add_option {
    ($n:ident, $e:expr) => {
        pub fn $n<T: Into<$crate::operations::common::OptionVal>>(&'b mut self, val: T) -> &'b mut Self {
            self.options.push($e, val);
            self
        }
    };
}

#[cfg(test)]
mod tests {
    use super::Options;

    #[test]
    fn test_no_options_is_empty_string() {
        let options = Options::new();
        assert_eq!("", options.to_string());
    }

    #[test]
    fn test_query_string_format() {
        let mut options = Options::new();
        options.push("wait_for_status", "yellow");
        options.push("timeout", "5s");
        options.push("local", true);
        assert_eq!(
            "?wait_for_status=yellow&timeout=5s&local=true",
            options.to_string()
        );
    }
}
