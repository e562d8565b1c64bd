//! Row builders shared by the aggregation tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{
    Assessment, AssessmentId, Course, CourseId, Enrollment, Grade, GradeAnnotations,
    LearningOutcome, LearningOutcomeId, Role, User, UserId,
};

/// Fixed base instant; `n` offsets are minutes after it.
pub fn at(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0)
        .single()
        .expect("valid base instant")
        + Duration::minutes(n)
}

pub fn course(code: &str) -> Course {
    Course {
        id: CourseId::random(),
        name: format!("Course {code}"),
        code: code.to_owned(),
        description: None,
        teacher_id: UserId::random(),
        created_at: at(0),
    }
}

pub fn student(first_name: &str, last_name: &str) -> User {
    User {
        id: UserId::random(),
        username: format!("{first_name}.{last_name}").to_lowercase(),
        email: format!("{first_name}.{last_name}@school.test").to_lowercase(),
        role: Role::Student,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        created_at: at(0),
    }
}

pub fn enroll(student: &User, course_id: CourseId, n: i64) -> Enrollment {
    Enrollment {
        student_id: student.id,
        course_id,
        enrolled_at: at(n),
    }
}

pub fn assessment(course_id: CourseId, title: &str, max_score: f64, n: i64) -> Assessment {
    Assessment {
        id: AssessmentId::random(),
        course_id,
        title: title.to_owned(),
        description: None,
        assessment_type: "quiz".to_owned(),
        max_score,
        due_date: None,
        created_by: UserId::random(),
        created_at: at(n),
    }
}

pub fn outcome(course_id: CourseId, title: &str) -> LearningOutcome {
    LearningOutcome {
        id: LearningOutcomeId::random(),
        course_id,
        title: title.to_owned(),
        description: None,
        created_at: at(0),
    }
}

/// Grade snapshotting the assessment's max score.
pub fn grade_for(student_id: UserId, assessment: &Assessment, score: Option<f64>) -> Grade {
    Grade::restore(
        student_id,
        assessment.id,
        score,
        assessment.max_score,
        GradeAnnotations::default(),
        at(60),
    )
}
