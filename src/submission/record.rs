use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// One newsletter-signup form submission, as the landing page posts it.
///
/// Everything except `email` is optional. `filters` accepts any category
/// name so new front-end filter groups flow through without a deploy here.
/// The form sends explicit nulls for untouched fields, hence `nullable` on
/// everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub country_of_residence: String,
    #[serde(deserialize_with = "nullable")]
    pub timezone: String,
    #[serde(deserialize_with = "nullable")]
    pub send_window: String,
    #[serde(deserialize_with = "nullable")]
    pub alerts_plan: String,
    #[serde(deserialize_with = "nullable")]
    pub asap_mode_enabled: bool,
    #[serde(deserialize_with = "nullable")]
    pub instant_alerts: bool,
    #[serde(deserialize_with = "nullable")]
    pub hourly_alerts: bool,
    #[serde(deserialize_with = "nullable")]
    pub filters: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "nullable")]
    pub high_salary_only: bool,
    pub salary_band: Option<SalaryBand>,
    #[serde(deserialize_with = "nullable")]
    pub frequency: String,
    #[serde(deserialize_with = "nullable")]
    pub urgency: String,
    #[serde(deserialize_with = "nullable")]
    pub exclude_keywords: String,
    #[serde(deserialize_with = "nullable")]
    pub search_term: String,
}

/// Salary bounds come from a range slider; min/max stay as raw JSON values
/// so a non-numeric bound is dropped by the mapper instead of failing the
/// whole submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalaryBand {
    pub min: Option<Value>,
    pub max: Option<Value>,
    #[serde(deserialize_with = "nullable")]
    pub currency: String,
}

/// Treat an explicit JSON null the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse and validate a raw JSON request body. Pure, no side effects.
pub fn parse(body: &[u8]) -> Result<Submission, ApiError> {
    let mut submission: Submission = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?;

    submission.email = submission.email.trim().to_string();
    if submission.email.is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }

    // Email syntax is Beehiiv's problem; we only require presence.
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_email() {
        let err = parse(br#"{"firstName":"Ann"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Email is required"));
    }

    #[test]
    fn rejects_whitespace_email() {
        let err = parse(br#"{"email":"   "}"#).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Email is required"));
    }

    #[test]
    fn rejects_unparseable_body() {
        let err = parse(b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn defaults_optional_fields() {
        let sub = parse(br#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(sub.email, "a@b.com");
        assert_eq!(sub.first_name, "");
        assert!(!sub.high_salary_only);
        assert!(sub.filters.is_empty());
        assert!(sub.salary_band.is_none());
    }

    #[test]
    fn trims_email() {
        let sub = parse(br#"{"email":"  a@b.com  "}"#).unwrap();
        assert_eq!(sub.email, "a@b.com");
    }

    #[test]
    fn accepts_null_salary_band() {
        let sub = parse(br#"{"email":"a@b.com","salaryBand":null}"#).unwrap();
        assert!(sub.salary_band.is_none());
    }

    #[test]
    fn treats_explicit_nulls_as_defaults() {
        let sub = parse(
            br#"{"email":"a@b.com","firstName":null,"filters":null,"highSalaryOnly":null}"#,
        )
        .unwrap();
        assert_eq!(sub.first_name, "");
        assert!(sub.filters.is_empty());
        assert!(!sub.high_salary_only);
    }

    #[test]
    fn null_email_is_missing_email() {
        let err = parse(br#"{"email":null}"#).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Email is required"));
    }

    #[test]
    fn keeps_unknown_filter_categories() {
        let sub = parse(
            br#"{"email":"a@b.com","filters":{"visaSponsorship":["yes"],"locations":["NYC"]}}"#,
        )
        .unwrap();
        assert_eq!(sub.filters.len(), 2);
        assert_eq!(sub.filters["visaSponsorship"], vec!["yes"]);
    }
}
