//! Fixed dashboard data
//!
//! The portal has no statistics service; these figures are what every
//! dashboard shows.

use chrono::NaiveDate;

use crate::domain::entities::{ActivityRecord, Statistic};
use crate::domain::value_objects::{CredentialStatus, Polarity};

pub fn sample_statistics() -> Vec<Statistic> {
    vec![
        Statistic::new("Total Issued", "1,250", "+12%", Polarity::Positive),
        Statistic::new("Pending Acceptance", "45", "-3%", Polarity::Negative),
        Statistic::new("Revoked", "3", "0%", Polarity::Neutral),
        Statistic::new("Active Students", "1,202", "+8%", Polarity::Positive),
    ]
}

pub fn sample_activity() -> Vec<ActivityRecord> {
    [
        ("Usama Saleem", "BS Computer Science", 15, CredentialStatus::Valid, "0xabc123"),
        ("Ali Raza", "BBA", 14, CredentialStatus::Valid, "0xdef456"),
        ("Sara Khan", "BS Software Engineering", 13, CredentialStatus::Pending, "0xghi789"),
        ("Ahmed Malik", "MS Computer Science", 12, CredentialStatus::Valid, "0xjkl012"),
        ("Fatima Noor", "BS Computer Science", 11, CredentialStatus::Revoked, "0xmno345"),
    ]
    .into_iter()
    .filter_map(|(student, degree, day, status, tx)| {
        Some(ActivityRecord {
            student_name: student.to_string(),
            degree: degree.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day)?,
            status,
            transaction_ref: tx.to_string(),
        })
    })
    .collect()
}
