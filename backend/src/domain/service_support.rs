//! Helpers shared by the domain services.

use std::collections::HashMap;

use futures_util::try_join;

use crate::domain::ports::{CourseRepository, RepositoryError, UserRepository};
use crate::domain::reporting::{distinct_ids, index_by};
use crate::domain::{Course, CourseId, Error, User, UserId};

/// Map a repository failure onto the domain taxonomy.
///
/// `duplicate` is the user-facing message for a unique-constraint violation.
pub(crate) fn map_repository_error(duplicate: &'static str) -> impl Fn(RepositoryError) -> Error {
    move |error| match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("data store unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("data store error: {message}"))
        }
        RepositoryError::DuplicateKey { .. } => Error::duplicate_key(duplicate),
    }
}

/// Mapping for operations where a unique violation is not expected.
pub(crate) fn map_store_error(error: RepositoryError) -> Error {
    map_repository_error("record already exists")(error)
}

/// Fetch the users named by `ids` in one call, keyed by id.
pub(crate) async fn users_by_id<U>(
    users: &U,
    ids: impl IntoIterator<Item = UserId>,
) -> Result<HashMap<UserId, User>, Error>
where
    U: UserRepository + ?Sized,
{
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = users.find_by_ids(&ids).await.map_err(map_store_error)?;
    Ok(index_by(rows, |user| user.id))
}

/// Fetch the courses named by `ids` in one call, keyed by id.
pub(crate) async fn courses_by_id<C>(
    courses: &C,
    ids: impl IntoIterator<Item = CourseId>,
) -> Result<HashMap<CourseId, Course>, Error>
where
    C: CourseRepository + ?Sized,
{
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = courses.find_by_ids(&ids).await.map_err(map_store_error)?;
    Ok(index_by(rows, |course| course.id))
}

/// Fetch users and courses concurrently.
pub(crate) async fn users_and_courses<U, C>(
    users: &U,
    user_ids: impl IntoIterator<Item = UserId>,
    courses: &C,
    course_ids: impl IntoIterator<Item = CourseId>,
) -> Result<(HashMap<UserId, User>, HashMap<CourseId, Course>), Error>
where
    U: UserRepository + ?Sized,
    C: CourseRepository + ?Sized,
{
    try_join!(users_by_id(users, user_ids), courses_by_id(courses, course_ids))
}

/// Newest first by a timestamp key.
pub(crate) fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> K) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("pool closed"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::duplicate_key("courses_code_key"), ErrorCode::DuplicateKey)]
    fn repository_errors_map_to_codes(#[case] error: RepositoryError, #[case] code: ErrorCode) {
        let mapped = map_repository_error("Course code already exists")(error);
        assert_eq!(mapped.code(), code);
    }

    #[rstest]
    fn duplicate_message_is_user_facing() {
        let mapped =
            map_repository_error("Student already enrolled")(RepositoryError::duplicate_key("pk"));
        assert_eq!(mapped.message(), "Student already enrolled");
    }

    #[rstest]
    fn newest_first_orders_descending() {
        let mut values = vec![1, 3, 2];
        newest_first(&mut values, |value| *value);
        assert_eq!(values, vec![3, 2, 1]);
    }
}
