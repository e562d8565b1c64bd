//! Student listings and overview.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    AssessmentRepository, CourseRepository, EnrollmentRepository, GradeRepository, StudentQuery,
    UserRepository,
};
use crate::domain::reporting::{
    GradedAssessment, compute_overview_statistics, distinct_ids, index_by,
    merge_assessment_with_grade, sort_roster,
};
use crate::domain::service_support::{courses_by_id, map_store_error, newest_first};
use crate::domain::{
    AssessmentId, CourseGradedAssessment, CourseId, CourseLabel, EnrolledCourse, Error, Role,
    StudentOverview, User, UserId,
};

/// Student service implementing [`StudentQuery`].
#[derive(Clone)]
pub struct StudentService<U, E, C, A, G> {
    users: Arc<U>,
    enrollments: Arc<E>,
    courses: Arc<C>,
    assessments: Arc<A>,
    grades: Arc<G>,
}

impl<U, E, C, A, G> StudentService<U, E, C, A, G> {
    pub fn new(
        users: Arc<U>,
        enrollments: Arc<E>,
        courses: Arc<C>,
        assessments: Arc<A>,
        grades: Arc<G>,
    ) -> Self {
        Self {
            users,
            enrollments,
            courses,
            assessments,
            grades,
        }
    }
}

/// Fetch a user and require the student role.
pub(crate) async fn find_student<U>(users: &U, student_id: &UserId) -> Result<User, Error>
where
    U: UserRepository + ?Sized,
{
    users
        .find_by_id(student_id)
        .await
        .map_err(map_store_error)?
        .filter(User::is_student)
        .ok_or_else(|| Error::not_found("Student not found"))
}

#[async_trait]
impl<U, E, C, A, G> StudentQuery for StudentService<U, E, C, A, G>
where
    U: UserRepository,
    E: EnrollmentRepository,
    C: CourseRepository,
    A: AssessmentRepository,
    G: GradeRepository,
{
    async fn list_students(&self) -> Result<Vec<User>, Error> {
        let mut students = self
            .users
            .list_by_role(Role::Student)
            .await
            .map_err(map_store_error)?;
        sort_roster(&mut students, |student| student);
        Ok(students)
    }

    async fn student_overview(&self, student_id: &UserId) -> Result<StudentOverview, Error> {
        let student = find_student(self.users.as_ref(), student_id).await?;
        let enrollments = self
            .enrollments
            .list_by_student(student_id)
            .await
            .map_err(map_store_error)?;
        let course_ids: Vec<CourseId> =
            distinct_ids(enrollments.iter().map(|enrollment| enrollment.course_id));

        let (mut course_index, mut assessments) = try_join!(
            courses_by_id(self.courses.as_ref(), course_ids.iter().copied()),
            async {
                self.assessments
                    .list_by_courses(&course_ids)
                    .await
                    .map_err(map_store_error)
            },
        )?;
        newest_first(&mut assessments, |assessment| assessment.created_at);

        let assessment_ids: Vec<AssessmentId> =
            assessments.iter().map(|assessment| assessment.id).collect();
        let grades = self
            .grades
            .list_for_student(student_id, &assessment_ids)
            .await
            .map_err(map_store_error)?;
        let grades = index_by(grades, |grade| grade.assessment_id());

        let graded: Vec<GradedAssessment> = assessments
            .iter()
            .map(|assessment| merge_assessment_with_grade(assessment, grades.get(&assessment.id)))
            .collect();
        let statistics = compute_overview_statistics(&graded);
        let labelled = graded
            .into_iter()
            .map(|graded| CourseGradedAssessment {
                course: course_index
                    .get(&graded.assessment.course_id)
                    .map(CourseLabel::from),
                graded,
            })
            .collect();

        let courses = enrollments
            .iter()
            .filter_map(|enrollment| {
                course_index
                    .remove(&enrollment.course_id)
                    .map(|course| EnrolledCourse {
                        course,
                        enrolled_at: enrollment.enrolled_at,
                    })
            })
            .collect();

        Ok(StudentOverview {
            student,
            courses,
            assessments: labelled,
            statistics,
        })
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
