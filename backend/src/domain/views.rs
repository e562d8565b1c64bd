//! Read models returned by the catalogue services.
//!
//! Each view wraps an entity with the related fields a client needs
//! alongside it (teacher names, course labels, counts). Related rows may have
//! vanished, so those fields are optional.

use chrono::{DateTime, Utc};

use super::reporting::{GradedAssessment, OverviewStatistics};
use super::{Assessment, Course, Grade, LearningOutcome, User};

/// First and last name of a related account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for PersonName {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Name and code of a related course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLabel {
    pub name: String,
    pub code: String,
}

impl From<&Course> for CourseLabel {
    fn from(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            code: course.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseWithTeacher {
    pub course: Course,
    pub teacher: Option<PersonName>,
}

/// Course list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub course: Course,
    pub teacher: Option<PersonName>,
    pub enrolled_students: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledStudent {
    pub student: User,
    pub enrolled_at: DateTime<Utc>,
}

/// Course with its roster and outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub course: Course,
    pub teacher: Option<PersonName>,
    /// Enrollment order.
    pub students: Vec<EnrolledStudent>,
    /// Oldest first.
    pub learning_outcomes: Vec<LearningOutcome>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentWithCourse {
    pub assessment: Assessment,
    pub course: Option<CourseLabel>,
}

/// Assessment list row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSummary {
    pub assessment: Assessment,
    pub course: Option<CourseLabel>,
    pub creator: Option<PersonName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedOutcome {
    pub outcome: LearningOutcome,
    pub weight: f64,
}

/// Assessment with the outcomes it is linked to.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDetail {
    pub assessment: Assessment,
    pub course: Option<CourseLabel>,
    pub creator: Option<PersonName>,
    pub learning_outcomes: Vec<WeightedOutcome>,
}

/// A grade as stored, with the graded student's name when known.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGrade {
    pub grade: Grade,
    pub student: Option<PersonName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
}

/// Merged assessment labelled with its course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGradedAssessment {
    pub graded: GradedAssessment,
    pub course: Option<CourseLabel>,
}

/// Everything a student's overview page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentOverview {
    pub student: User,
    pub courses: Vec<EnrolledCourse>,
    /// Every assessment of the enrolled courses, newest first.
    pub assessments: Vec<CourseGradedAssessment>,
    pub statistics: OverviewStatistics,
}
