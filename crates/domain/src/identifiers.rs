//! Identifier types used to address records on the evaluation service.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Separator placed between a dataset name and its sub-dataset
pub const SUB_DATASET_SEPARATOR: char = '.';

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued by the service
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the underlying string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(SystemId, "Identifier of a system (one evaluated output) on the service");
define_id!(
    DatasetId,
    "Identifier of the reference dataset metadata record on the service"
);

impl DatasetId {
    /// Derive the dataset identifier for a dataset and optional sub-dataset.
    ///
    /// The input is not validated; the service decides whether the dataset exists.
    pub fn resolve(dataset_name: &str, sub_dataset: Option<&str>) -> Self {
        match sub_dataset {
            Some(sub) => Self(format!("{dataset_name}{SUB_DATASET_SEPARATOR}{sub}")),
            None => Self(dataset_name.to_string()),
        }
    }
}
