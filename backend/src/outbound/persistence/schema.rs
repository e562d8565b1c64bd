//! Diesel table definitions matching `backend/migrations`.
//!
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Teacher and student accounts.
    users (id) {
        id -> Uuid,
        #[max_length = 64]
        username -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        /// `salt_hex$digest_hex`; never leaves the adapter except as a
        /// `PasswordDigest`.
        password_digest -> Text,
        #[max_length = 16]
        role -> Varchar,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
        /// Unique (`courses_code_key`).
        #[max_length = 32]
        code -> Varchar,
        description -> Nullable<Text>,
        teacher_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (student, course) pair.
    course_enrollments (student_id, course_id) {
        student_id -> Uuid,
        course_id -> Uuid,
        enrolled_at -> Timestamptz,
    }
}

diesel::table! {
    assessments (id) {
        id -> Uuid,
        course_id -> Uuid,
        #[max_length = 255]
        title -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 64]
        assessment_type -> Varchar,
        max_score -> Float8,
        due_date -> Nullable<Timestamptz>,
        created_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    learning_outcomes (id) {
        id -> Uuid,
        course_id -> Uuid,
        #[max_length = 255]
        title -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    assessment_outcomes (assessment_id, learning_outcome_id) {
        assessment_id -> Uuid,
        learning_outcome_id -> Uuid,
        weight -> Float8,
    }
}

diesel::table! {
    /// Grades, at most one per (student, assessment) pair.
    student_assessments (student_id, assessment_id) {
        student_id -> Uuid,
        assessment_id -> Uuid,
        score -> Nullable<Float8>,
        max_score -> Float8,
        percentage -> Nullable<Float8>,
        feedback -> Nullable<Text>,
        graded_by -> Nullable<Uuid>,
        graded_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> users (teacher_id));
diesel::joinable!(course_enrollments -> courses (course_id));
diesel::joinable!(assessments -> courses (course_id));
diesel::joinable!(learning_outcomes -> courses (course_id));
diesel::joinable!(assessment_outcomes -> assessments (assessment_id));
diesel::joinable!(assessment_outcomes -> learning_outcomes (learning_outcome_id));
diesel::joinable!(student_assessments -> assessments (assessment_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    courses,
    course_enrollments,
    assessments,
    learning_outcomes,
    assessment_outcomes,
    student_assessments,
);
