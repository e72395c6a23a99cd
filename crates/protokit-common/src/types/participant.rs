//! ParticipantProfile - read-only, name-indexed access to the participating child
//!
//! Builders never see the host's record layout. They ask for a field by
//! name and get back a [`FieldValue`], so the host can grow or reshape its
//! participant schema without breaking existing protocols.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Field names understood by [`ChildProfile`]
pub mod fields {
    pub const GIVEN_NAME: &str = "givenName";
    pub const BIRTHDAY: &str = "birthday";
    pub const GENDER: &str = "gender";
    pub const AGE_AT_BIRTH: &str = "ageAtBirth";
    pub const ADDITIONAL_INFORMATION: &str = "additionalInformation";
    pub const LANGUAGE_LIST: &str = "languageList";
    pub const CONDITION_LIST: &str = "conditionList";

    /// Every field a [`super::ChildProfile`] answers for
    pub const ALL: [&str; 7] = [
        GIVEN_NAME,
        BIRTHDAY,
        GENDER,
        AGE_AT_BIRTH,
        ADDITIONAL_INFORMATION,
        LANGUAGE_LIST,
        CONDITION_LIST,
    ];
}

/// Value returned by a profile field lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Tags(BTreeSet<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&BTreeSet<String>> {
        match self {
            FieldValue::Tags(tags) => Some(tags),
            _ => None,
        }
    }
}

/// Read-only participant record
///
/// The single accessor is the whole contract. Typed helpers live on
/// [`ProfileExt`], which every implementor gets for free.
pub trait ParticipantProfile: Send + Sync {
    /// Look up a field by name. Unknown or unset fields return `None`.
    fn get(&self, field: &str) -> Option<FieldValue>;
}

/// Typed convenience getters layered over [`ParticipantProfile::get`]
pub trait ProfileExt: ParticipantProfile {
    fn given_name(&self) -> Option<String> {
        self.get(fields::GIVEN_NAME)
            .and_then(|v| v.as_text().map(str::to_owned))
    }

    fn birthday(&self) -> Option<NaiveDate> {
        self.get(fields::BIRTHDAY).and_then(|v| v.as_date())
    }

    fn gender(&self) -> Option<Sex> {
        self.get(fields::GENDER)
            .and_then(|v| v.as_text().and_then(|t| t.parse().ok()))
    }

    fn age_at_birth(&self) -> Option<GestationalAge> {
        self.get(fields::AGE_AT_BIRTH)
            .and_then(|v| v.as_text().and_then(|t| t.parse().ok()))
    }

    fn languages(&self) -> BTreeSet<String> {
        self.get(fields::LANGUAGE_LIST)
            .and_then(|v| v.as_tags().cloned())
            .unwrap_or_default()
    }

    fn conditions(&self) -> BTreeSet<String> {
        self.get(fields::CONDITION_LIST)
            .and_then(|v| v.as_tags().cloned())
            .unwrap_or_default()
    }

    fn has_condition(&self, tag: &str) -> bool {
        self.conditions().contains(tag)
    }

    fn speaks(&self, language: &str) -> bool {
        self.languages().contains(language)
    }

    /// Age in whole days at `at`, typically the current session's creation time
    fn age_in_days(&self, at: DateTime<Utc>) -> Option<i64> {
        self.birthday()
            .map(|born| (at.date_naive() - born).num_days())
    }
}

impl<T: ParticipantProfile + ?Sized> ProfileExt for T {}

/// Sex category as recorded at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "o")]
    Other,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
            Sex::Other => "o",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = UnknownFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Sex::Male),
            "f" => Ok(Sex::Female),
            "o" => Ok(Sex::Other),
            other => Err(UnknownFieldValue {
                field: fields::GENDER,
                value: other.to_string(),
            }),
        }
    }
}

/// Gestational age at birth, bucketed the way the registration form asks it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GestationalAge {
    FortyOrMore,
    /// 24 through 39 completed weeks
    Weeks(u8),
    Under24,
    NotSure,
}

impl GestationalAge {
    pub const MIN_WEEKS: u8 = 24;
    pub const MAX_WEEKS: u8 = 39;

    /// Born before 37 weeks. Unknown is not preterm.
    pub fn is_preterm(&self) -> bool {
        match self {
            GestationalAge::Under24 => true,
            GestationalAge::Weeks(w) => *w < 37,
            GestationalAge::FortyOrMore | GestationalAge::NotSure => false,
        }
    }
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestationalAge::FortyOrMore => f.write_str("40 or more weeks"),
            GestationalAge::Weeks(w) => write!(f, "{} weeks", w),
            GestationalAge::Under24 => f.write_str("Under 24 weeks"),
            GestationalAge::NotSure => f.write_str("Not sure or prefer not to answer"),
        }
    }
}

impl FromStr for GestationalAge {
    type Err = UnknownFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownFieldValue {
            field: fields::AGE_AT_BIRTH,
            value: s.to_string(),
        };

        match s {
            "40 or more weeks" => Ok(GestationalAge::FortyOrMore),
            "Under 24 weeks" => Ok(GestationalAge::Under24),
            "Not sure or prefer not to answer" => Ok(GestationalAge::NotSure),
            other => {
                let weeks: u8 = other
                    .strip_suffix(" weeks")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(unknown)?;
                if (Self::MIN_WEEKS..=Self::MAX_WEEKS).contains(&weeks) {
                    Ok(GestationalAge::Weeks(weeks))
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl TryFrom<String> for GestationalAge {
    type Error = UnknownFieldValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GestationalAge> for String {
    fn from(age: GestationalAge) -> Self {
        age.to_string()
    }
}

/// A coded profile field held a value outside its vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{value}' for field {field}")]
pub struct UnknownFieldValue {
    pub field: &'static str,
    pub value: String,
}

/// Participant record as the host registers it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    #[serde(default)]
    pub given_name: String,

    /// Accepts a plain date or a full timestamp
    #[serde(default, deserialize_with = "js_date::deserialize")]
    pub birthday: Option<NaiveDate>,

    #[serde(default)]
    pub gender: Option<Sex>,

    #[serde(default)]
    pub age_at_birth: Option<GestationalAge>,

    #[serde(default)]
    pub additional_information: String,

    /// 2-letter language codes the child hears
    #[serde(default, with = "space_separated")]
    pub language_list: BTreeSet<String>,

    /// Registration-form condition tags, e.g. `deaf multiple_birth`
    #[serde(default, with = "space_separated")]
    pub condition_list: BTreeSet<String>,
}

impl ChildProfile {
    pub fn new(given_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            ..Self::default()
        }
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_gender(mut self, gender: Sex) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_age_at_birth(mut self, age: GestationalAge) -> Self {
        self.age_at_birth = Some(age);
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_list.insert(code.into());
        self
    }

    pub fn with_condition(mut self, tag: impl Into<String>) -> Self {
        self.condition_list.insert(tag.into());
        self
    }
}

impl ParticipantProfile for ChildProfile {
    fn get(&self, field: &str) -> Option<FieldValue> {
        match field {
            fields::GIVEN_NAME => Some(FieldValue::Text(self.given_name.clone())),
            fields::BIRTHDAY => self.birthday.map(FieldValue::Date),
            fields::GENDER => self.gender.map(|g| FieldValue::Text(g.code().to_string())),
            fields::AGE_AT_BIRTH => self.age_at_birth.map(|a| FieldValue::Text(a.to_string())),
            fields::ADDITIONAL_INFORMATION => {
                Some(FieldValue::Text(self.additional_information.clone()))
            }
            fields::LANGUAGE_LIST => Some(FieldValue::Tags(self.language_list.clone())),
            fields::CONDITION_LIST => Some(FieldValue::Tags(self.condition_list.clone())),
            _ => None,
        }
    }
}

/// Serde helper for dates hosts send as serialized timestamps
///
/// `2024-11-02T00:00:00.000Z` keeps its UTC calendar date; `2024-11-02`
/// is taken as is.
mod js_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(timestamp.with_timezone(&Utc).date_naive()));
        }

        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid birthday '{}': {}", raw, e)))
    }
}

/// Serde helper for space-separated tag lists
mod space_separated {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeSet;

    pub fn serialize<S>(tags: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let joined = tags.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
        serializer.serialize_str(&joined)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_owned)
            .collect())
    }
}
