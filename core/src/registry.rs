//! Endpoint registry: the static descriptor of every operation the clients
//! expose, and the tags each one provides or invalidates.
//!
//! # Design
//! The cache-tag pairing below is the only consistency mechanism between
//! mutations and cached queries. Keeping it in one `match` makes the mapping
//! testable without building a request or touching the network.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::cache::{CacheTag, TagKind};
use crate::http::HttpMethod;

/// Bytes escaped in an id placed into a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Backend resource family an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Course,
    Progress,
    Purchase,
}

impl Resource {
    /// Path prefix appended to the backend base URL.
    pub fn prefix(&self) -> &'static str {
        match self {
            Resource::User => "/api/v1/user",
            Resource::Course => "/api/v1/course",
            Resource::Progress => "/api/v1/progress",
            Resource::Purchase => "/api/v1/purchase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// One named operation, carrying the ids its tags depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    RegisterUser,
    LoginUser,
    LogoutUser,
    LoadUser,
    UpdateUser,

    CreateCourse,
    GetSearchCourse,
    GetPublishedCourse,
    GetCreatorCourse,
    EditCourse { course_id: String },
    GetCourseById { course_id: String },
    CreateLecture { course_id: String },
    GetCourseLecture { course_id: String },
    EditLecture { course_id: String, lecture_id: String },
    RemoveLecture { lecture_id: String },
    GetLectureById { lecture_id: String },
    PublishCourse { course_id: String },

    GetCourseProgress { course_id: String },
    UpdateLectureProgress { course_id: String, lecture_id: String },
    CompleteCourse { course_id: String },
    InCompleteCourse { course_id: String },

    CreateCheckoutSession { course_id: String },
    GetCourseDetailWithStatus { course_id: String },
    GetPurchasedCourses,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::RegisterUser => "registerUser",
            Endpoint::LoginUser => "loginUser",
            Endpoint::LogoutUser => "logoutUser",
            Endpoint::LoadUser => "loadUser",
            Endpoint::UpdateUser => "updateUser",
            Endpoint::CreateCourse => "createCourse",
            Endpoint::GetSearchCourse => "getSearchCourse",
            Endpoint::GetPublishedCourse => "getPublishedCourse",
            Endpoint::GetCreatorCourse => "getCreatorCourse",
            Endpoint::EditCourse { .. } => "editCourse",
            Endpoint::GetCourseById { .. } => "getCourseById",
            Endpoint::CreateLecture { .. } => "createLecture",
            Endpoint::GetCourseLecture { .. } => "getCourseLecture",
            Endpoint::EditLecture { .. } => "editLecture",
            Endpoint::RemoveLecture { .. } => "removeLecture",
            Endpoint::GetLectureById { .. } => "getLectureById",
            Endpoint::PublishCourse { .. } => "publishCourse",
            Endpoint::GetCourseProgress { .. } => "getCourseProgress",
            Endpoint::UpdateLectureProgress { .. } => "updateLectureProgress",
            Endpoint::CompleteCourse { .. } => "completeCourse",
            Endpoint::InCompleteCourse { .. } => "inCompleteCourse",
            Endpoint::CreateCheckoutSession { .. } => "createCheckoutSession",
            Endpoint::GetCourseDetailWithStatus { .. } => "getCourseDetailWithStatus",
            Endpoint::GetPurchasedCourses => "getPurchasedCourses",
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            Endpoint::RegisterUser
            | Endpoint::LoginUser
            | Endpoint::LogoutUser
            | Endpoint::LoadUser
            | Endpoint::UpdateUser => Resource::User,
            Endpoint::GetCourseProgress { .. }
            | Endpoint::UpdateLectureProgress { .. }
            | Endpoint::CompleteCourse { .. }
            | Endpoint::InCompleteCourse { .. } => Resource::Progress,
            Endpoint::CreateCheckoutSession { .. }
            | Endpoint::GetCourseDetailWithStatus { .. }
            | Endpoint::GetPurchasedCourses => Resource::Purchase,
            _ => Resource::Course,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Endpoint::LoadUser
            | Endpoint::GetSearchCourse
            | Endpoint::GetPublishedCourse
            | Endpoint::GetCreatorCourse
            | Endpoint::GetCourseById { .. }
            | Endpoint::GetCourseLecture { .. }
            | Endpoint::GetLectureById { .. }
            | Endpoint::GetCourseProgress { .. }
            | Endpoint::GetCourseDetailWithStatus { .. }
            | Endpoint::GetPurchasedCourses => OperationKind::Query,
            _ => OperationKind::Mutation,
        }
    }

    /// Logout is a mutation issued as GET; everything else follows its kind.
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::RegisterUser
            | Endpoint::LoginUser
            | Endpoint::CreateCourse
            | Endpoint::CreateLecture { .. }
            // Backend route is POST even though it updates the lecture.
            | Endpoint::EditLecture { .. }
            | Endpoint::UpdateLectureProgress { .. }
            | Endpoint::CompleteCourse { .. }
            | Endpoint::InCompleteCourse { .. }
            | Endpoint::CreateCheckoutSession { .. } => HttpMethod::Post,
            Endpoint::UpdateUser | Endpoint::EditCourse { .. } => HttpMethod::Put,
            Endpoint::PublishCourse { .. } => HttpMethod::Patch,
            Endpoint::RemoveLecture { .. } => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// Path relative to the resource prefix, with `{id}`/`{lectureId}`
    /// placeholders.
    pub fn path_template(&self) -> &'static str {
        match self {
            Endpoint::RegisterUser => "/register",
            Endpoint::LoginUser => "/login",
            Endpoint::LogoutUser => "/logout",
            Endpoint::LoadUser => "/profile",
            Endpoint::UpdateUser => "/profile/update",
            Endpoint::CreateCourse | Endpoint::GetCreatorCourse | Endpoint::GetPurchasedCourses => {
                "/"
            }
            Endpoint::GetSearchCourse => "/search",
            Endpoint::GetPublishedCourse => "/published-courses",
            Endpoint::EditCourse { .. }
            | Endpoint::GetCourseById { .. }
            | Endpoint::PublishCourse { .. }
            | Endpoint::GetCourseProgress { .. } => "/{id}",
            Endpoint::CreateLecture { .. } | Endpoint::GetCourseLecture { .. } => "/{id}/lecture",
            Endpoint::EditLecture { .. } => "/{id}/lecture/{lectureId}",
            Endpoint::RemoveLecture { .. } | Endpoint::GetLectureById { .. } => {
                "/lecture/{lectureId}"
            }
            Endpoint::UpdateLectureProgress { .. } => "/{id}/lecture/{lectureId}/view",
            Endpoint::CompleteCourse { .. } => "/{id}/complete",
            Endpoint::InCompleteCourse { .. } => "/{id}/incomplete",
            Endpoint::CreateCheckoutSession { .. } => "/checkout/create-checkout-session",
            Endpoint::GetCourseDetailWithStatus { .. } => "/course/{id}/detail-with-status",
        }
    }

    pub fn course_id(&self) -> Option<&str> {
        match self {
            Endpoint::EditCourse { course_id }
            | Endpoint::GetCourseById { course_id }
            | Endpoint::CreateLecture { course_id }
            | Endpoint::GetCourseLecture { course_id }
            | Endpoint::EditLecture { course_id, .. }
            | Endpoint::PublishCourse { course_id }
            | Endpoint::GetCourseProgress { course_id }
            | Endpoint::UpdateLectureProgress { course_id, .. }
            | Endpoint::CompleteCourse { course_id }
            | Endpoint::InCompleteCourse { course_id }
            | Endpoint::CreateCheckoutSession { course_id }
            | Endpoint::GetCourseDetailWithStatus { course_id } => Some(course_id.as_str()),
            _ => None,
        }
    }

    pub fn lecture_id(&self) -> Option<&str> {
        match self {
            Endpoint::EditLecture { lecture_id, .. }
            | Endpoint::RemoveLecture { lecture_id }
            | Endpoint::GetLectureById { lecture_id }
            | Endpoint::UpdateLectureProgress { lecture_id, .. } => Some(lecture_id.as_str()),
            _ => None,
        }
    }

    /// `path_template` with the ids filled in, each percent-encoded so it
    /// stays one path segment. Checkout carries its course id in the body.
    pub fn path(&self) -> String {
        let mut path = self.path_template().to_string();
        if let Some(id) = self.course_id() {
            path = path.replace("{id}", &utf8_percent_encode(id, PATH_SEGMENT).to_string());
        }
        if let Some(id) = self.lecture_id() {
            path = path.replace(
                "{lectureId}",
                &utf8_percent_encode(id, PATH_SEGMENT).to_string(),
            );
        }
        path
    }

    /// Tags a query's cached result is filed under.
    pub fn provides(&self) -> Vec<CacheTag> {
        match self {
            Endpoint::LoadUser => vec![CacheTag::all(TagKind::User)],
            Endpoint::GetPublishedCourse | Endpoint::GetCreatorCourse => {
                vec![CacheTag::all(TagKind::CreatorCourse)]
            }
            Endpoint::GetCourseLecture { .. } => vec![CacheTag::all(TagKind::Lecture)],
            Endpoint::GetCourseProgress { course_id } => {
                vec![CacheTag::with_id(TagKind::CourseProgress, course_id)]
            }
            Endpoint::GetCourseDetailWithStatus { course_id } => {
                vec![CacheTag::with_id(TagKind::Purchases, course_id)]
            }
            Endpoint::GetPurchasedCourses => vec![CacheTag::all(TagKind::Purchases)],
            _ => Vec::new(),
        }
    }

    /// Tags a mutation marks stale once it completes.
    pub fn invalidates(&self) -> Vec<CacheTag> {
        match self {
            Endpoint::LoginUser | Endpoint::LogoutUser | Endpoint::UpdateUser => {
                vec![CacheTag::all(TagKind::User)]
            }
            Endpoint::CreateCourse | Endpoint::EditCourse { .. } | Endpoint::PublishCourse { .. } => {
                vec![CacheTag::all(TagKind::CreatorCourse)]
            }
            Endpoint::CreateLecture { .. }
            | Endpoint::EditLecture { .. }
            | Endpoint::RemoveLecture { .. } => vec![CacheTag::all(TagKind::Lecture)],
            Endpoint::UpdateLectureProgress { course_id, .. }
            | Endpoint::CompleteCourse { course_id }
            | Endpoint::InCompleteCourse { course_id } => {
                vec![CacheTag::with_id(TagKind::CourseProgress, course_id)]
            }
            Endpoint::CreateCheckoutSession { .. } => vec![CacheTag::all(TagKind::Purchases)],
            _ => Vec::new(),
        }
    }

    /// Every endpoint with placeholder ids, for exhaustive checks.
    pub fn catalog() -> Vec<Endpoint> {
        let id = || "{id}".to_string();
        let lecture = || "{lectureId}".to_string();
        vec![
            Endpoint::RegisterUser,
            Endpoint::LoginUser,
            Endpoint::LogoutUser,
            Endpoint::LoadUser,
            Endpoint::UpdateUser,
            Endpoint::CreateCourse,
            Endpoint::GetSearchCourse,
            Endpoint::GetPublishedCourse,
            Endpoint::GetCreatorCourse,
            Endpoint::EditCourse { course_id: id() },
            Endpoint::GetCourseById { course_id: id() },
            Endpoint::CreateLecture { course_id: id() },
            Endpoint::GetCourseLecture { course_id: id() },
            Endpoint::EditLecture { course_id: id(), lecture_id: lecture() },
            Endpoint::RemoveLecture { lecture_id: lecture() },
            Endpoint::GetLectureById { lecture_id: lecture() },
            Endpoint::PublishCourse { course_id: id() },
            Endpoint::GetCourseProgress { course_id: id() },
            Endpoint::UpdateLectureProgress { course_id: id(), lecture_id: lecture() },
            Endpoint::CompleteCourse { course_id: id() },
            Endpoint::InCompleteCourse { course_id: id() },
            Endpoint::CreateCheckoutSession { course_id: id() },
            Endpoint::GetCourseDetailWithStatus { course_id: id() },
            Endpoint::GetPurchasedCourses,
        ]
    }
}
