use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RequestId);

/// Questions offered as one-click shortcuts in the chat view.
pub const SAMPLE_QUERIES: &[&str] = &[
    "What is the average salinity in the region lat 8-12, lon 75-78?",
    "What is the maximum sea surface temperature in the dataset?",
    "Show the minimum temperature between lat 10-15 and lon 80-85.",
    "Which variables are available in the dataset?",
];

/// Placeholder shown when the backend answered without any text.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer received.";

/// Text a metadata panel shows when it has no entries.
pub const EMPTY_PANEL_TEXT: &str = "None";
