#![allow(dead_code)]

use smartpay::domain::profile::{
    CandidateProfile, CompanySize, Education, EmploymentType, ExperienceLevel, Gender,
    MaritalStatus, RemoteRatio,
};

pub fn profile(job_title: &str) -> CandidateProfile {
    CandidateProfile {
        age: 31,
        gender: Gender::Male,
        education: Education::Bachelor,
        marital_status: MaritalStatus::Married,
        experience_level: ExperienceLevel::Senior,
        employment_type: EmploymentType::FullTime,
        job_title: job_title.to_string(),
        hours_per_week: 45,
        employee_residence: "DE".to_string(),
        company_location: "US".to_string(),
        remote_ratio: RemoteRatio::FullyRemote,
        company_size: CompanySize::Large,
    }
}

/// A spread of valid profiles covering every option of each enumerated field
pub fn profile_grid() -> Vec<CandidateProfile> {
    let mut profiles = Vec::new();
    for (i, education) in Education::all().into_iter().enumerate() {
        let mut p = profile("Analyst");
        p.education = education;
        p.gender = Gender::all()[i % Gender::all().len()];
        p.marital_status = MaritalStatus::all()[i % MaritalStatus::all().len()];
        p.experience_level = ExperienceLevel::all()[i % ExperienceLevel::all().len()];
        p.employment_type = EmploymentType::all()[i % EmploymentType::all().len()];
        p.remote_ratio = RemoteRatio::all()[i % RemoteRatio::all().len()];
        p.company_size = CompanySize::all()[i % CompanySize::all().len()];
        p.age = 15 + (i as u8) * 20;
        p.hours_per_week = 1 + (i as u8) * 24;
        profiles.push(p);
    }
    profiles
}
