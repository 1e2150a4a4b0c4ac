//! Attendance marking sheet and summary figures.
//!
//! # Design
//! - A sheet is built from the roster and covers it exactly; there is no
//!   partial submission.
//! - Every student starts absent.
//! - Summary maths lives on an extension trait so the wire type stays plain.

use kodu_api_models::{
    AttendanceEntry, AttendanceStatus, AttendanceSummary, MarkAttendanceRequest, StudentProfile,
};

use crate::error::{FormError, FormResult, require_date};

/// One roster line on the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// Student id.
    pub student_id: String,
    /// Display name.
    pub name: String,
    /// Current mark.
    pub status: AttendanceStatus,
}

/// Attendance being marked for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSheet {
    batch_id: String,
    rows: Vec<SheetRow>,
}

impl AttendanceSheet {
    /// Build a sheet with every roster student marked absent, in roster order.
    #[must_use]
    pub fn from_roster(batch_id: impl Into<String>, roster: &[StudentProfile]) -> Self {
        Self {
            batch_id: batch_id.into(),
            rows: roster
                .iter()
                .map(|student| SheetRow {
                    student_id: student.id.clone(),
                    name: student.name.clone(),
                    status: AttendanceStatus::Absent,
                })
                .collect(),
        }
    }

    /// Batch the sheet belongs to.
    #[must_use]
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Roster lines in roster order.
    #[must_use]
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Current mark for `student_id`.
    #[must_use]
    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.rows
            .iter()
            .find(|row| row.student_id == student_id)
            .map(|row| row.status)
    }

    /// Change the mark of exactly one student.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownStudent`] when the id is not on the roster.
    pub fn set_status(&mut self, student_id: &str, status: AttendanceStatus) -> FormResult<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.student_id == student_id)
            .ok_or_else(|| FormError::UnknownStudent {
                id: student_id.to_string(),
            })?;
        row.status = status;
        Ok(())
    }

    /// Number of students on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Batched request covering the whole roster for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] when `date` is blank, or
    /// [`FormError::Invalid`] when it is not a `YYYY-MM-DD` date.
    pub fn submission(&self, date: &str) -> FormResult<MarkAttendanceRequest> {
        let date = require_date("date", date)?;
        Ok(MarkAttendanceRequest {
            batch_id: self.batch_id.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            students_attendance: self
                .rows
                .iter()
                .map(|row| AttendanceEntry {
                    student_id: row.student_id.clone(),
                    status: row.status,
                })
                .collect(),
        })
    }
}

/// Present/absent/late counts for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSlices {
    /// Days present.
    pub present: u32,
    /// Days absent.
    pub absent: u32,
    /// Days late.
    pub late: u32,
}

/// Colour band applied to an attendance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceBand {
    /// Above 75%.
    Good,
    /// Above 50%.
    Fair,
    /// 50% or less.
    Low,
}

/// Figures derived from an [`AttendanceSummary`].
pub trait SummaryStats {
    /// Present days over total days as a percentage, rounded to two decimals.
    /// Zero when no days were recorded.
    fn percentage(&self) -> f64;

    /// Counts for the summary chart.
    fn chart_slices(&self) -> ChartSlices;

    /// Band for the percentage.
    fn band(&self) -> AttendanceBand {
        let percentage = self.percentage();
        if percentage > 75.0 {
            AttendanceBand::Good
        } else if percentage > 50.0 {
            AttendanceBand::Fair
        } else {
            AttendanceBand::Low
        }
    }
}

impl SummaryStats for AttendanceSummary {
    fn percentage(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        let raw = f64::from(self.present_days) / f64::from(self.total_days) * 100.0;
        (raw * 100.0).round() / 100.0
    }

    fn chart_slices(&self) -> ChartSlices {
        ChartSlices {
            present: self.present_days,
            absent: self.absent_days,
            late: self.late_days,
        }
    }
}
