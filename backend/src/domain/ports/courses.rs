//! Driving ports for the course catalogue and enrollments.

use async_trait::async_trait;

use crate::domain::{
    CourseDetail, CourseDetails, CourseId, CourseSummary, CourseWithTeacher, Enrollment, Error,
    UserId,
};

/// Which courses a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    /// Courses owned by a teacher.
    Teacher(UserId),
    /// Courses a student is enrolled in.
    Student(UserId),
}

/// Validated input for a new course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub details: CourseDetails,
    pub teacher_id: UserId,
}

/// Read side of the course catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Courses matching `filter`, newest first.
    async fn list_courses(&self, filter: CourseFilter) -> Result<Vec<CourseSummary>, Error>;

    async fn course_detail(&self, course_id: &CourseId) -> Result<CourseDetail, Error>;
}

/// Write side of the course catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    async fn create_course(&self, course: NewCourse) -> Result<CourseWithTeacher, Error>;

    async fn update_course(
        &self,
        course_id: &CourseId,
        details: CourseDetails,
    ) -> Result<CourseWithTeacher, Error>;

    async fn delete_course(&self, course_id: &CourseId) -> Result<(), Error>;

    /// Enrol a student. A second enrollment for the same pair is
    /// `duplicate_key`.
    async fn enroll(&self, course_id: &CourseId, student_id: &UserId) -> Result<Enrollment, Error>;

    async fn unenroll(&self, course_id: &CourseId, student_id: &UserId) -> Result<(), Error>;
}
