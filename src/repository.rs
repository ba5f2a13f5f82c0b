//! Data-access facade over the catalog buckets.
//!
//! Every operation loads a whole bucket, changes the in-memory copy and writes
//! the whole bucket back. Read-modify-write operations hold `write_lock` so
//! two callers sharing a store cannot interleave and drop each other's rows.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{Bucket, DEFAULT_NAMESPACE, KvStore};
use crate::error::AppError;
use crate::models::{Course, Enrollment, Role, User};
use crate::seed;

#[derive(Clone)]
pub struct CatalogStore {
    kv: Arc<dyn KvStore>,
    namespace: String,
    write_lock: Arc<Mutex<()>>,
}

impl CatalogStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_namespace(kv, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(kv: Arc<dyn KvStore>, namespace: impl Into<String>) -> Self {
        Self {
            kv,
            namespace: namespace.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn read_bucket<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Option<T>, AppError> {
        match self.kv.get(&bucket.key(&self.namespace)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write_bucket<T: Serialize + ?Sized>(&self, bucket: Bucket, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(&bucket.key(&self.namespace), &raw).await
    }

    async fn bucket_exists(&self, bucket: Bucket) -> Result<bool, AppError> {
        Ok(self.kv.get(&bucket.key(&self.namespace)).await?.is_some())
    }

    /// Writes the demo courses and users into buckets that do not exist yet.
    pub async fn initialize_demo_data(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        if !self.bucket_exists(Bucket::Courses).await? {
            let courses = seed::demo_courses();
            info!("seeding {} demo courses", courses.len());
            self.write_bucket(Bucket::Courses, &courses).await?;
        }

        if !self.bucket_exists(Bucket::Users).await? {
            let users = seed::demo_users();
            info!("seeding {} demo users", users.len());
            self.write_bucket(Bucket::Users, &users).await?;
        }

        Ok(())
    }

    // courses

    pub async fn get_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.read_bucket(Bucket::Courses).await?.unwrap_or_default())
    }

    pub async fn set_courses(&self, courses: &[Course]) -> Result<(), AppError> {
        self.write_bucket(Bucket::Courses, courses).await
    }

    pub async fn add_course(&self, course: Course) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut courses = self.get_courses().await?;
        courses.push(course);
        self.set_courses(&courses).await
    }

    pub async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        Ok(self.get_courses().await?.into_iter().find(|c| c.id == id))
    }

    // users

    pub async fn get_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read_bucket(Bucket::Users).await?.unwrap_or_default())
    }

    pub async fn set_users(&self, users: &[User]) -> Result<(), AppError> {
        self.write_bucket(Bucket::Users, users).await
    }

    pub async fn add_user(&self, user: User) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.get_users().await?;
        users.push(user);
        self.set_users(&users).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.get_users().await?.into_iter().find(|u| u.id == id))
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.get_users().await?.into_iter().find(|u| u.email == email))
    }

    // session

    pub async fn get_current_user(&self) -> Result<Option<User>, AppError> {
        self.read_bucket(Bucket::CurrentUser).await
    }

    pub async fn set_current_user(&self, user: Option<&User>) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.write_session(user).await
    }

    async fn write_session(&self, user: Option<&User>) -> Result<(), AppError> {
        match user {
            Some(user) => self.write_bucket(Bucket::CurrentUser, user).await,
            None => self.kv.remove(&Bucket::CurrentUser.key(&self.namespace)).await,
        }
    }

    /// Replaces the session copy when it belongs to `user`. Caller holds `write_lock`.
    async fn refresh_session(&self, user: &User) -> Result<(), AppError> {
        if let Some(current) = self.get_current_user().await? {
            if current.id == user.id {
                debug!("refreshing session copy for {}", user.id);
                self.write_session(Some(user)).await?;
            }
        }
        Ok(())
    }

    /// Any password is accepted: the email alone selects the account.
    pub async fn login(&self, email: &str, _password: &str) -> Result<Option<User>, AppError> {
        let _guard = self.write_lock.lock().await;
        let Some(user) = self.find_user_by_email(email).await? else {
            debug!("login rejected, unknown email {}", email);
            return Ok(None);
        };

        self.write_session(Some(&user)).await?;
        info!("user {} logged in as {}", user.id, user.role);
        Ok(Some(user))
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.write_session(None).await?;
        info!("session cleared");
        Ok(())
    }

    /// Creates a student account and logs it in. Fails with `Conflict` when the
    /// email is taken. The password is not stored.
    pub async fn register(&self, name: &str, email: &str, _password: &str) -> Result<User, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.get_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict("Email already exists.".to_string()));
        }

        let user = User {
            id: format!("student_{}", Uuid::new_v4()),
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Student,
            enrolled_courses: Vec::new(),
        };
        users.push(user.clone());
        self.set_users(&users).await?;
        self.write_session(Some(&user)).await?;

        info!("registered student {}", user.id);
        Ok(user)
    }

    // enrollments

    pub async fn get_enrollments(&self) -> Result<Vec<Enrollment>, AppError> {
        Ok(self.read_bucket(Bucket::Enrollments).await?.unwrap_or_default())
    }

    pub async fn set_enrollments(&self, enrollments: &[Enrollment]) -> Result<(), AppError> {
        self.write_bucket(Bucket::Enrollments, enrollments).await
    }

    /// Appends the enrollment row and the course id on the student's list.
    /// No duplicate check happens here.
    pub async fn add_enrollment(&self, enrollment: Enrollment) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.append_enrollment(enrollment).await
    }

    /// Enrolls a known student in a known course unless the pair already
    /// exists. Checks and writes happen under one `write_lock` hold.
    pub async fn enroll_once(&self, student_id: &str, course_id: &str) -> Result<Enrollment, AppError> {
        let _guard = self.write_lock.lock().await;

        let student = self.get_user(student_id).await?.ok_or(AppError::NotFound)?;
        if self.get_course(course_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let already = student.is_enrolled_in(course_id)
            || self
                .get_enrollments()
                .await?
                .iter()
                .any(|e| e.matches(student_id, course_id));
        if already {
            warn!("student {} is already enrolled in {}", student_id, course_id);
            return Err(AppError::Conflict("already enrolled in this course".to_string()));
        }

        let enrollment = Enrollment {
            id: format!("enrollment_{}", Uuid::new_v4()),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            progress: 0,
        };
        self.append_enrollment(enrollment.clone()).await?;
        Ok(enrollment)
    }

    /// Caller holds `write_lock`.
    async fn append_enrollment(&self, enrollment: Enrollment) -> Result<(), AppError> {
        let mut enrollments = self.get_enrollments().await?;
        let student_id = enrollment.student_id.clone();
        let course_id = enrollment.course_id.clone();
        enrollments.push(enrollment);
        self.set_enrollments(&enrollments).await?;

        let mut users = self.get_users().await?;
        if let Some(user) = users.iter_mut().find(|u| u.id == student_id) {
            user.enrolled_courses.push(course_id.clone());
            let updated = user.clone();
            self.set_users(&users).await?;
            self.refresh_session(&updated).await?;
        }

        info!("student {} enrolled in course {}", student_id, course_id);
        Ok(())
    }

    /// Drops every enrollment row and list entry for the pair.
    pub async fn remove_enrollment(&self, student_id: &str, course_id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut enrollments = self.get_enrollments().await?;
        enrollments.retain(|e| !e.matches(student_id, course_id));
        self.set_enrollments(&enrollments).await?;

        let mut users = self.get_users().await?;
        if let Some(user) = users.iter_mut().find(|u| u.id == student_id) {
            user.enrolled_courses.retain(|id| id != course_id);
            let updated = user.clone();
            self.set_users(&users).await?;
            self.refresh_session(&updated).await?;
        }

        info!("student {} unenrolled from course {}", student_id, course_id);
        Ok(())
    }
}
