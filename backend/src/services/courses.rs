//! Course directory service
//!
//! Implements the course queries and enrollment on top of a `CourseStore`.
//! Every call loads the collection fresh; nothing is cached between calls.

use crate::error::{AppError, EMAIL_REQUIRED};
use crate::state::{Course, CourseId, CourseStore};

/// Course directory service
pub struct CourseService;

impl CourseService {
    /// Return the full stored collection as-is
    pub async fn list_all(store: &dyn CourseStore) -> Result<Vec<Course>, AppError> {
        Ok(store.load().await?)
    }

    /// Return the courses `email` is enrolled in, in stored order
    ///
    /// An email enrolled nowhere yields an empty list, not an error.
    pub async fn list_for_user(
        store: &dyn CourseStore,
        email: &str,
    ) -> Result<Vec<Course>, AppError> {
        let courses = store.load().await?;
        Ok(courses.into_iter().filter(|c| c.is_enrolled(email)).collect())
    }

    /// Return the first course whose title matches `title` ignoring case
    pub async fn find_by_title(store: &dyn CourseStore, title: &str) -> Result<Course, AppError> {
        let courses = store.load().await?;
        courses
            .into_iter()
            .find(|c| c.title_matches(title))
            .ok_or_else(AppError::course_not_found)
    }

    /// Enroll `email` in the course identified by `raw_id`
    ///
    /// # Arguments
    /// * `raw_id` - Course id as it arrived in the request path
    /// * `email` - Email to enroll; `None` or empty is rejected before storage is read
    ///
    /// # Returns
    /// * `Ok(Course)` - The course after enrollment
    /// * `Err(AppError::InvalidRequest)` - No email given
    /// * `Err(AppError::NotFound)` - No course with that id
    ///
    /// The collection is written back only when the email was not already
    /// enrolled. The load and save are not isolated from other requests.
    pub async fn enroll(
        store: &dyn CourseStore,
        raw_id: &str,
        email: Option<&str>,
    ) -> Result<Course, AppError> {
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::InvalidRequest(EMAIL_REQUIRED.to_string()))?;

        let id = parse_course_id(raw_id);
        let mut courses = store.load().await?;

        let index = id
            .and_then(|id| courses.iter().position(|c| c.id == id))
            .ok_or_else(AppError::course_not_found)?;

        let course = &mut courses[index];
        if course.enroll(email) {
            tracing::info!(course_id = course.id, email, "User enrolled");
            let updated = course.clone();
            store.save(&courses).await?;
            Ok(updated)
        } else {
            tracing::debug!(course_id = course.id, email, "User already enrolled");
            Ok(course.clone())
        }
    }
}

/// Parse a course id leniently from a path segment
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// leading run of decimal digits is used (`"12abc"` gives 12). Returns `None`
/// when there are no leading digits or the value does not fit a `CourseId`.
pub fn parse_course_id(raw: &str) -> Option<CourseId> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: CourseId = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
