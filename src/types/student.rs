use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A Graphbook user, as sent by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Student {
    #[serde(rename = "studentId")]
    pub student_id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "emailAddress")]
    pub email_address: String,
    #[serde(
        rename = "courseOfferings",
        default,
        deserialize_with = "deserialize_null_as_empty"
    )]
    pub course_offerings: Vec<CourseOffering>,
    #[serde(
        rename = "createdDate",
        default,
        deserialize_with = "deserialize_created_date"
    )]
    pub created_date: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CourseOffering {
    #[serde(rename = "courseOfferingId")]
    pub course_offering_id: i64,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(
        rename = "createdDate",
        default,
        deserialize_with = "deserialize_created_date"
    )]
    pub created_date: Option<NaiveDate>,
}

impl Student {
    /// Session user known only by the identity the caller supplied.
    pub fn with_email(email: &str, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            student_id: 0,
            first_name: first_name.unwrap_or_default().to_string(),
            last_name: last_name.unwrap_or_default().to_string(),
            email_address: email.to_string(),
            course_offerings: Vec::new(),
            created_date: None,
            bio: None,
            avatar: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The backend writes unset collections as `null`.
fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The backend serializes dates either as epoch millis or as `YYYY-MM-DD`.
fn deserialize_created_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(|dt| Some(dt.date_naive()))
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(RawDate::Text(text)) => {
            let date = text.split('T').next().unwrap_or(text.as_str());
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(Some)
                .map_err(de::Error::custom)
        }
    }
}
