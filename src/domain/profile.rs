//! Candidate profile value object
//!
//! The profile is the request payload of `POST /predict`. The remote model
//! only accepts documents carrying exactly the twelve keys below, so the
//! struct field names are the wire names and every enumerated field is a
//! closed Rust enum.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_AGE: u8 = 15;
pub const MAX_AGE: u8 = 100;
pub const MIN_HOURS_PER_WEEK: u8 = 1;
pub const MAX_HOURS_PER_WEEK: u8 = 100;

/// Error type for CandidateProfile parsing and validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("Invalid {field}: '{value}'. Must be one of: {allowed}")]
    UnknownOption {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

impl ProfileError {
    fn unknown(field: &'static str, value: &str, allowed: &[&str]) -> Self {
        ProfileError::UnknownOption {
            field,
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Male")]
    Male,
    #[serde(rename = "Female")]
    Female,
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "Prefer not to say")]
    Undisclosed,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Undisclosed => "Prefer not to say",
        }
    }

    pub fn all() -> Vec<Gender> {
        vec![
            Gender::Male,
            Gender::Female,
            Gender::Other,
            Gender::Undisclosed,
        ]
    }
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer not to say" | "undisclosed" => Ok(Gender::Undisclosed),
            _ => Err(ProfileError::unknown(
                "gender",
                s,
                &["Male", "Female", "Other", "Prefer not to say"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's Degree")]
    Bachelor,
    #[serde(rename = "Master's Degree")]
    Master,
    #[serde(rename = "PhD")]
    Phd,
    #[serde(rename = "Other")]
    Other,
}

impl Education {
    pub fn as_str(&self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Bachelor => "Bachelor's Degree",
            Education::Master => "Master's Degree",
            Education::Phd => "PhD",
            Education::Other => "Other",
        }
    }

    pub fn all() -> Vec<Education> {
        vec![
            Education::HighSchool,
            Education::Bachelor,
            Education::Master,
            Education::Phd,
            Education::Other,
        ]
    }
}

impl FromStr for Education {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high school" | "highschool" => Ok(Education::HighSchool),
            "bachelor's degree" | "bachelor" | "bachelors" => Ok(Education::Bachelor),
            "master's degree" | "master" | "masters" => Ok(Education::Master),
            "phd" => Ok(Education::Phd),
            "other" => Ok(Education::Other),
            _ => Err(ProfileError::unknown(
                "education",
                s,
                &[
                    "High School",
                    "Bachelor's Degree",
                    "Master's Degree",
                    "PhD",
                    "Other",
                ],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "Never Married")]
    NeverMarried,
    #[serde(rename = "Married")]
    Married,
    #[serde(rename = "Divorced")]
    Divorced,
    #[serde(rename = "Widowed")]
    Widowed,
    #[serde(rename = "Other")]
    Other,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::NeverMarried => "Never Married",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widowed => "Widowed",
            MaritalStatus::Other => "Other",
        }
    }

    pub fn all() -> Vec<MaritalStatus> {
        vec![
            MaritalStatus::NeverMarried,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
            MaritalStatus::Other,
        ]
    }
}

impl FromStr for MaritalStatus {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never married" | "single" => Ok(MaritalStatus::NeverMarried),
            "married" => Ok(MaritalStatus::Married),
            "divorced" => Ok(MaritalStatus::Divorced),
            "widowed" => Ok(MaritalStatus::Widowed),
            "other" => Ok(MaritalStatus::Other),
            _ => Err(ProfileError::unknown(
                "marital_status",
                s,
                &["Never Married", "Married", "Divorced", "Widowed", "Other"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }

    pub fn all() -> Vec<ExperienceLevel> {
        vec![
            ExperienceLevel::Junior,
            ExperienceLevel::Mid,
            ExperienceLevel::Senior,
        ]
    }
}

impl FromStr for ExperienceLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "junior" | "en" => Ok(ExperienceLevel::Junior),
            "mid" | "mi" => Ok(ExperienceLevel::Mid),
            "senior" | "se" => Ok(ExperienceLevel::Senior),
            _ => Err(ProfileError::unknown(
                "experience_level",
                s,
                &["junior", "mid", "senior"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "FT")]
    FullTime,
    #[serde(rename = "PT")]
    PartTime,
    #[serde(rename = "CT")]
    Contract,
    #[serde(rename = "FL")]
    Freelance,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "FT",
            EmploymentType::PartTime => "PT",
            EmploymentType::Contract => "CT",
            EmploymentType::Freelance => "FL",
        }
    }

    pub fn all() -> Vec<EmploymentType> {
        vec![
            EmploymentType::FullTime,
            EmploymentType::PartTime,
            EmploymentType::Contract,
            EmploymentType::Freelance,
        ]
    }
}

impl FromStr for EmploymentType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ft" | "full-time" | "full time" => Ok(EmploymentType::FullTime),
            "pt" | "part-time" | "part time" => Ok(EmploymentType::PartTime),
            "ct" | "contract" => Ok(EmploymentType::Contract),
            "fl" | "freelance" => Ok(EmploymentType::Freelance),
            _ => Err(ProfileError::unknown(
                "employment_type",
                s,
                &["FT", "PT", "CT", "FL"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Small => "S",
            CompanySize::Medium => "M",
            CompanySize::Large => "L",
        }
    }

    pub fn all() -> Vec<CompanySize> {
        vec![CompanySize::Small, CompanySize::Medium, CompanySize::Large]
    }
}

impl FromStr for CompanySize {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "small" => Ok(CompanySize::Small),
            "m" | "medium" => Ok(CompanySize::Medium),
            "l" | "large" => Ok(CompanySize::Large),
            _ => Err(ProfileError::unknown("company_size", s, &["S", "M", "L"])),
        }
    }
}

/// Share of remote work, restricted to the five steps the model was trained on.
///
/// Serialized as a bare JSON number (`0`, `25`, `50`, `75`, `100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RemoteRatio {
    OnSite,
    Quarter,
    Half,
    ThreeQuarters,
    FullyRemote,
}

impl RemoteRatio {
    pub fn percent(&self) -> u8 {
        match self {
            RemoteRatio::OnSite => 0,
            RemoteRatio::Quarter => 25,
            RemoteRatio::Half => 50,
            RemoteRatio::ThreeQuarters => 75,
            RemoteRatio::FullyRemote => 100,
        }
    }

    pub fn all() -> Vec<RemoteRatio> {
        vec![
            RemoteRatio::OnSite,
            RemoteRatio::Quarter,
            RemoteRatio::Half,
            RemoteRatio::ThreeQuarters,
            RemoteRatio::FullyRemote,
        ]
    }
}

impl TryFrom<u8> for RemoteRatio {
    type Error = ProfileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RemoteRatio::OnSite),
            25 => Ok(RemoteRatio::Quarter),
            50 => Ok(RemoteRatio::Half),
            75 => Ok(RemoteRatio::ThreeQuarters),
            100 => Ok(RemoteRatio::FullyRemote),
            other => Err(ProfileError::unknown(
                "remote_ratio",
                &other.to_string(),
                &["0", "25", "50", "75", "100"],
            )),
        }
    }
}

impl From<RemoteRatio> for u8 {
    fn from(ratio: RemoteRatio) -> Self {
        ratio.percent()
    }
}

impl FromStr for RemoteRatio {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value = trimmed
            .parse::<u8>()
            .map_err(|_| ProfileError::unknown("remote_ratio", s, &["0", "25", "50", "75", "100"]))?;
        RemoteRatio::try_from(value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RemoteRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Candidate profile sent to the prediction service
///
/// # Invariants
///
/// - Serializes to exactly twelve keys, named as the fields below
/// - Numeric fields serialize as JSON numbers
/// - Range checks live in [`CandidateProfile::validate`] and are the caller's job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateProfile {
    pub age: u8,
    pub gender: Gender,
    pub education: Education,
    pub marital_status: MaritalStatus,
    pub experience_level: ExperienceLevel,
    pub employment_type: EmploymentType,
    pub job_title: String,
    pub hours_per_week: u8,
    pub employee_residence: String,
    pub company_location: String,
    pub remote_ratio: RemoteRatio,
    pub company_size: CompanySize,
}

impl CandidateProfile {
    /// Wire names of the payload, in the order they are emitted
    pub const KEYS: [&'static str; 12] = [
        "age",
        "gender",
        "education",
        "marital_status",
        "experience_level",
        "employment_type",
        "job_title",
        "hours_per_week",
        "employee_residence",
        "company_location",
        "remote_ratio",
        "company_size",
    ];

    /// Check numeric ranges and free-text fields
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_range("age", self.age, MIN_AGE, MAX_AGE)?;
        check_range(
            "hours_per_week",
            self.hours_per_week,
            MIN_HOURS_PER_WEEK,
            MAX_HOURS_PER_WEEK,
        )?;

        let text_fields = [
            ("job_title", &self.job_title),
            ("employee_residence", &self.employee_residence),
            ("company_location", &self.company_location),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(ProfileError::Blank { field });
            }
        }

        Ok(())
    }

    /// Build the JSON document posted to `/predict`.
    pub fn to_payload(&self) -> Value {
        json!({
            "age": self.age,
            "gender": self.gender.as_str(),
            "education": self.education.as_str(),
            "marital_status": self.marital_status.as_str(),
            "experience_level": self.experience_level.as_str(),
            "employment_type": self.employment_type.as_str(),
            "job_title": self.job_title,
            "hours_per_week": self.hours_per_week,
            "employee_residence": self.employee_residence,
            "company_location": self.company_location,
            "remote_ratio": self.remote_ratio.percent(),
            "company_size": self.company_size.as_str(),
        })
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), ProfileError> {
    if !(min..=max).contains(&value) {
        return Err(ProfileError::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(())
}
