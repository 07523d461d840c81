use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{BloodMarker, Report};

/// Listing view of a report, as returned by `/user/{uuid}/reports` and the
/// search endpoint.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub uuid: String,
    pub filename: String,
    pub date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub lab_name: Option<String>,
    pub is_verified: bool,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        ReportSummary {
            uuid: report.report_uuid.clone(),
            filename: report.original_filename.clone(),
            date: report.report_date,
            created_at: report.created_at,
            lab_name: report.lab_name.clone(),
            is_verified: report.is_verified,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkerResponse {
    pub name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_range_min: Option<f64>,
    pub reference_range_max: Option<f64>,
    pub is_normal: Option<bool>,
    pub flag: Option<String>,
    pub category: Option<String>,
}

impl From<&BloodMarker> for MarkerResponse {
    fn from(marker: &BloodMarker) -> Self {
        MarkerResponse {
            name: marker.marker_name.clone(),
            value: marker.value,
            unit: marker.unit.clone(),
            reference_range_min: marker.reference_range_min,
            reference_range_max: marker.reference_range_max,
            is_normal: marker.is_normal,
            flag: marker.flag.clone(),
            category: marker.category.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportDetail {
    pub uuid: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub report_date: Option<DateTime<Utc>>,
    pub lab_name: Option<String>,
    pub doctor_name: Option<String>,
    pub test_type: Option<String>,
    pub is_verified: bool,
    pub verification_notes: Option<String>,
    pub markers: Vec<MarkerResponse>,
}

impl ReportDetail {
    pub fn new(report: &Report, markers: &[BloodMarker]) -> Self {
        ReportDetail {
            uuid: report.report_uuid.clone(),
            filename: report.original_filename.clone(),
            created_at: report.created_at,
            report_date: report.report_date,
            lab_name: report.lab_name.clone(),
            doctor_name: report.doctor_name.clone(),
            test_type: report.test_type.clone(),
            is_verified: report.is_verified,
            verification_notes: report.verification_notes.clone(),
            markers: markers.iter().map(MarkerResponse::from).collect(),
        }
    }
}
