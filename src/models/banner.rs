//! Sponsor banner form draft.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Where a sponsor banner may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Homepage,
    Collect,
    Museums,
    Artists,
    Galleries,
    PriceIndex,
}

/// Draft of a sponsor banner as edited in the admin modal.
///
/// Text inputs stay strings until submission; `budget` is coerced to a
/// number in [`BannerDraft::to_payload`] because the server rejects string
/// budgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDraft {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub sponsor_name: String,

    #[serde(default)]
    pub sponsor_website: String,

    #[serde(default)]
    pub placement: Option<Placement>,

    /// ISO date, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: String,

    /// ISO date, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: String,

    #[serde(default)]
    pub contact_email: String,

    /// Raw budget input, coerced to a number on submit
    #[serde(default)]
    pub budget: String,
}

impl BannerDraft {
    /// Required fields that are empty or unset, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let text_fields: [(&'static str, &str); 9] = [
            ("title", &self.title),
            ("description", &self.description),
            ("image", &self.image),
            ("link", &self.link),
            ("sponsorName", &self.sponsor_name),
            ("sponsorWebsite", &self.sponsor_website),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("contactEmail", &self.contact_email),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if self.placement.is_none() {
            missing.push("placement");
        }
        if self.budget.trim().is_empty() {
            missing.push("budget");
        }
        missing
    }

    /// Build the submit payload, coercing `budget` to a number and
    /// checking the date fields parse as `YYYY-MM-DD`.
    pub fn to_payload(&self) -> Result<serde_json::Value> {
        let budget: f64 = self
            .budget
            .trim()
            .parse()
            .map_err(|_| AppError::validation(format!("budget is not a number: {}", self.budget)))?;

        for (field, value) in [("startDate", &self.start_date), ("endDate", &self.end_date)] {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| AppError::validation(format!("{field} is not a valid date: {value}")))?;
        }

        let mut payload = serde_json::to_value(self)?;
        payload["budget"] = serde_json::json!(budget);
        Ok(payload)
    }
}
