//! Purchasable offerings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Annual,
    Lifetime,
}

/// A single purchasable package inside an offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub product_id: String,
    pub period: BillingPeriod,
    /// Localized price string as shown to the user, e.g. "$9.99".
    pub price_display: String,
    #[serde(default)]
    pub trial_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// Offerings presented to the user, with the one the backend marks current.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offerings {
    #[serde(default)]
    pub current_offering_id: Option<String>,
    #[serde(default)]
    pub offerings: Vec<Offering>,
}

impl Offerings {
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn current(&self) -> Option<&Offering> {
        let id = self.current_offering_id.as_deref()?;
        self.offerings.iter().find(|o| o.id == id)
    }

    /// Finds a package by id across all offerings.
    pub fn find_package(&self, package_id: &str) -> Option<&Package> {
        self.offerings
            .iter()
            .flat_map(|o| o.packages.iter())
            .find(|p| p.id == package_id)
    }
}
