use serde::{Deserialize, Serialize};

use crate::Money;

pub const DEFAULT_RICE_PRICE: Money = Money::new(20.0);
pub const DEFAULT_EGG_PRICE: Money = Money::new(15.0);

/// Unit prices of the individually billed extras.
///
/// Changing prices never touches stored counts; it only changes derived costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    pub rice: Money,
    pub egg: Money,
}

impl Prices {
    pub fn new(rice: Money, egg: Money) -> Self {
        Self { rice, egg }
    }
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            rice: DEFAULT_RICE_PRICE,
            egg: DEFAULT_EGG_PRICE,
        }
    }
}
