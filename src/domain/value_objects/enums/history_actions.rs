use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Created,
    Activated,
    Canceled,
}

impl Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            HistoryAction::Created => "created",
            HistoryAction::Activated => "activated",
            HistoryAction::Canceled => "canceled",
        };
        write!(f, "{}", action)
    }
}
