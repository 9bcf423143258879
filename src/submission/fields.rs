use serde_json::Value;

use super::record::Submission;
use crate::beehiiv::CustomField;

/// Filter categories the front end is known to send, in the order their
/// flattened fields appear in the outbound payload. The right-hand names
/// are Beehiiv custom-field names and must match the publication exactly.
const KNOWN_CATEGORIES: &[(&str, &str)] = &[
    ("locations", "location_pref"),
    ("employment", "employment_type"),
    ("experience", "experience_level"),
    ("jobRoles", "job_roles"),
    ("jobCategories", "job_categories"),
    ("benefits", "benefits_pref"),
    ("technologies", "technologies_pref"),
    ("industries", "industries_pref"),
    ("languages", "languages_pref"),
    ("companySizes", "company_sizes_pref"),
];

/// Map a submission onto Beehiiv custom fields. Never fails: unknown filter
/// categories get a derived field name, malformed salary bounds are dropped.
///
/// Every value is a string. Booleans are always present as "true"/"false";
/// string fields are omitted when empty so Beehiiv never stores blanks.
pub fn custom_fields(sub: &Submission) -> Vec<CustomField> {
    let mut fields = Vec::new();

    // Core profile
    push_nonempty(&mut fields, "first_name", &sub.first_name);
    push_nonempty(&mut fields, "country_of_residence", &sub.country_of_residence);
    push_nonempty(&mut fields, "timezone", &sub.timezone);
    push_nonempty(&mut fields, "send_window", &sub.send_window);
    push_nonempty(&mut fields, "alerts_plan", &sub.alerts_plan);

    push_bool(&mut fields, "asap_mode_enabled", sub.asap_mode_enabled);
    push_bool(&mut fields, "instant_alerts", sub.instant_alerts);
    push_bool(&mut fields, "hourly_alerts", sub.hourly_alerts);

    // Preferences
    push_bool(&mut fields, "high_salary_only", sub.high_salary_only);
    push_nonempty(&mut fields, "frequency", &sub.frequency);
    push_nonempty(&mut fields, "urgency", &sub.urgency);
    push_nonempty(&mut fields, "exclude_keywords", &sub.exclude_keywords);

    let active: Vec<&str> = ordered_categories(sub)
        .into_iter()
        .filter(|cat| has_values(sub, cat))
        .collect();
    push_nonempty(&mut fields, "active_filters", &active.join(","));

    for category in ordered_categories(sub) {
        if let Some(values) = sub.filters.get(category).filter(|v| !v.is_empty()) {
            fields.push(CustomField {
                name: field_name_for(category),
                value: values.join(" | "),
            });
        }
    }

    // Salary band
    if let Some(band) = &sub.salary_band {
        if let Some(Value::Number(min)) = &band.min {
            fields.push(CustomField {
                name: "salary_band_min".to_string(),
                value: min.to_string(),
            });
        }
        if let Some(Value::Number(max)) = &band.max {
            fields.push(CustomField {
                name: "salary_band_max".to_string(),
                value: max.to_string(),
            });
        }
        push_nonempty(&mut fields, "salary_band_currency", &band.currency);
    }

    // Handy for debugging / segmentation
    push_nonempty(&mut fields, "search_term", &sub.search_term);

    fields
}

/// Category names in deterministic output order: the known list first, then
/// anything the front end invented, in the (sorted) order of the map.
fn ordered_categories(sub: &Submission) -> Vec<&str> {
    let mut categories: Vec<&str> = KNOWN_CATEGORIES
        .iter()
        .map(|(cat, _)| *cat)
        .filter(|cat| sub.filters.contains_key(*cat))
        .collect();
    categories.extend(
        sub.filters
            .keys()
            .map(String::as_str)
            .filter(|k| !KNOWN_CATEGORIES.iter().any(|(cat, _)| cat == k)),
    );
    categories
}

fn has_values(sub: &Submission, category: &str) -> bool {
    sub.filters.get(category).is_some_and(|v| !v.is_empty())
}

fn field_name_for(category: &str) -> String {
    KNOWN_CATEGORIES
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, field)| field.to_string())
        .unwrap_or_else(|| snake_case(category))
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn push_nonempty(fields: &mut Vec<CustomField>, name: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        fields.push(CustomField {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

fn push_bool(fields: &mut Vec<CustomField>, name: &str, value: bool) {
    fields.push(CustomField {
        name: name.to_string(),
        value: if value { "true" } else { "false" }.to_string(),
    });
}
