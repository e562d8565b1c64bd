//! Assessment catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AssessmentCommand, AssessmentFilter, AssessmentQuery, AssessmentRepository, CourseRepository,
    EnrollmentRepository, LearningOutcomeRepository, NewAssessment, UserRepository,
};
use crate::domain::reporting::index_by;
use crate::domain::service_support::{map_store_error, newest_first, users_and_courses};
use crate::domain::{
    Assessment, AssessmentDetail, AssessmentDetails, AssessmentId, AssessmentOutcome,
    AssessmentSummary, AssessmentWithCourse, CourseId, CourseLabel, Error, LearningOutcomeId,
    PersonName, WeightedOutcome,
};

fn assessment_not_found() -> Error {
    Error::not_found("Assessment not found")
}

/// Assessment service implementing [`AssessmentQuery`] and
/// [`AssessmentCommand`].
#[derive(Clone)]
pub struct AssessmentService<A, C, E, U, O> {
    assessments: Arc<A>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    users: Arc<U>,
    outcomes: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<A, C, E, U, O> AssessmentService<A, C, E, U, O> {
    pub fn new(
        assessments: Arc<A>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        users: Arc<U>,
        outcomes: Arc<O>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assessments,
            courses,
            enrollments,
            users,
            outcomes,
            clock,
        }
    }
}

impl<A, C, E, U, O> AssessmentService<A, C, E, U, O>
where
    A: AssessmentRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn filtered_assessments(
        &self,
        filter: AssessmentFilter,
    ) -> Result<Vec<Assessment>, Error> {
        match filter {
            AssessmentFilter::All => self.assessments.list_all().await.map_err(map_store_error),
            AssessmentFilter::Course(course_id) => self
                .assessments
                .list_by_course(&course_id)
                .await
                .map_err(map_store_error),
            AssessmentFilter::Student(student_id) => {
                let enrollments = self
                    .enrollments
                    .list_by_student(&student_id)
                    .await
                    .map_err(map_store_error)?;
                if enrollments.is_empty() {
                    return Ok(Vec::new());
                }
                let ids: Vec<CourseId> = enrollments.iter().map(|row| row.course_id).collect();
                self.assessments
                    .list_by_courses(&ids)
                    .await
                    .map_err(map_store_error)
            }
        }
    }

    async fn course_label(&self, course_id: &CourseId) -> Result<Option<CourseLabel>, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_store_error)?;
        Ok(course.as_ref().map(CourseLabel::from))
    }

    async fn weighted_outcomes(
        &self,
        links: Vec<AssessmentOutcome>,
    ) -> Result<Vec<WeightedOutcome>, Error> {
        if links.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<LearningOutcomeId> =
            links.iter().map(|link| link.learning_outcome_id).collect();
        let outcomes = self
            .outcomes
            .find_by_ids(&ids)
            .await
            .map_err(map_store_error)?;
        let outcomes = index_by(outcomes, |outcome| outcome.id);
        Ok(links
            .into_iter()
            .filter_map(|link| {
                outcomes
                    .get(&link.learning_outcome_id)
                    .map(|outcome| WeightedOutcome {
                        outcome: outcome.clone(),
                        weight: link.weight,
                    })
            })
            .collect())
    }
}

#[async_trait]
impl<A, C, E, U, O> AssessmentQuery for AssessmentService<A, C, E, U, O>
where
    A: AssessmentRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn list_assessments(
        &self,
        filter: AssessmentFilter,
    ) -> Result<Vec<AssessmentSummary>, Error> {
        let mut assessments = self.filtered_assessments(filter).await?;
        newest_first(&mut assessments, |assessment| assessment.created_at);

        let (creators, courses) = users_and_courses(
            self.users.as_ref(),
            assessments.iter().map(|assessment| assessment.created_by),
            self.courses.as_ref(),
            assessments.iter().map(|assessment| assessment.course_id),
        )
        .await?;

        Ok(assessments
            .into_iter()
            .map(|assessment| AssessmentSummary {
                course: courses.get(&assessment.course_id).map(CourseLabel::from),
                creator: creators.get(&assessment.created_by).map(PersonName::from),
                assessment,
            })
            .collect())
    }

    async fn assessment_detail(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentDetail, Error> {
        let assessment = self
            .assessments
            .find_by_id(assessment_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(assessment_not_found)?;

        let (course, creator, links) = try_join!(
            self.course_label(&assessment.course_id),
            async {
                self.users
                    .find_by_id(&assessment.created_by)
                    .await
                    .map_err(map_store_error)
            },
            async {
                self.outcomes
                    .links_for_assessment(assessment_id)
                    .await
                    .map_err(map_store_error)
            },
        )?;
        let learning_outcomes = self.weighted_outcomes(links).await?;

        Ok(AssessmentDetail {
            creator: creator.as_ref().map(PersonName::from),
            assessment,
            course,
            learning_outcomes,
        })
    }
}

#[async_trait]
impl<A, C, E, U, O> AssessmentCommand for AssessmentService<A, C, E, U, O>
where
    A: AssessmentRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
    O: LearningOutcomeRepository,
{
    async fn create_assessment(
        &self,
        request: NewAssessment,
    ) -> Result<AssessmentWithCourse, Error> {
        let NewAssessment {
            course_id,
            details,
            created_by,
            outcome_links,
        } = request;
        let Some(course) = self.course_label(&course_id).await? else {
            return Err(Error::not_found("Course not found"));
        };

        let assessment = Assessment {
            id: AssessmentId::random(),
            course_id,
            title: details.title().to_owned(),
            description: details.description().map(str::to_owned),
            assessment_type: details.assessment_type().to_owned(),
            max_score: details.max_score(),
            due_date: details.due_date(),
            created_by,
            created_at: self.clock.utc(),
        };
        let assessment = self
            .assessments
            .insert(&assessment)
            .await
            .map_err(map_store_error)?;
        info!(assessment_id = %assessment.id, %course_id, "assessment created");

        if !outcome_links.is_empty() {
            let links: Vec<AssessmentOutcome> = outcome_links
                .iter()
                .map(|link| AssessmentOutcome::new(assessment.id, link.outcome_id, link.weight))
                .collect();
            if let Err(error) = self.outcomes.link(&links).await {
                warn!(
                    assessment_id = %assessment.id,
                    %error,
                    "failed to link learning outcomes; assessment kept"
                );
            }
        }

        Ok(AssessmentWithCourse {
            assessment,
            course: Some(course),
        })
    }

    async fn update_assessment(
        &self,
        assessment_id: &AssessmentId,
        details: AssessmentDetails,
    ) -> Result<AssessmentWithCourse, Error> {
        let assessment = self
            .assessments
            .update(assessment_id, &details)
            .await
            .map_err(map_store_error)?
            .ok_or_else(assessment_not_found)?;
        let course = self.course_label(&assessment.course_id).await?;
        Ok(AssessmentWithCourse { assessment, course })
    }

    async fn delete_assessment(&self, assessment_id: &AssessmentId) -> Result<(), Error> {
        self.assessments
            .delete(assessment_id)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "assessment_service_tests.rs"]
mod tests;
