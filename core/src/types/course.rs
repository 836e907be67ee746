use serde::{Deserialize, Serialize};

use crate::http::MultipartForm;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_thumbnail: Option<String>,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
    #[serde(default)]
    pub lectures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<serde_json::Value>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourse {
    pub course_title: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub course: Course,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesResponse {
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Thumbnail upload attached to a course edit.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Replacement course fields, sent as form data.
#[derive(Debug, Clone, Default)]
pub struct CourseEdit {
    pub course_title: Option<String>,
    pub sub_title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub course_level: Option<String>,
    pub course_price: Option<f64>,
    pub thumbnail: Option<Thumbnail>,
}

impl CourseEdit {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        let fields = [
            ("courseTitle", self.course_title.clone()),
            ("subTitle", self.sub_title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("courseLevel", self.course_level.clone()),
            ("coursePrice", self.course_price.map(|p| p.to_string())),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }
        if let Some(thumb) = &self.thumbnail {
            form = form.file(
                "courseThumbnail",
                thumb.file_name.clone(),
                thumb.content_type.clone(),
                thumb.data.clone(),
            );
        }
        form
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortByPrice {
    Low,
    High,
}

impl SortByPrice {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortByPrice::Low => "low",
            SortByPrice::High => "high",
        }
    }
}

/// Course search filters. Empty fields are left out of the query string.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub categories: Vec<String>,
    pub sort_by_price: Option<SortByPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(rename = "_id")]
    pub id: String,
    pub lecture_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default)]
    pub is_preview_free: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLecture {
    pub lecture_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLecture {
    pub lecture_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_info: Option<VideoInfo>,
    #[serde(default)]
    pub is_preview_free: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureResponse {
    pub lecture: Lecture,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LecturesResponse {
    #[serde(default)]
    pub lectures: Vec<Lecture>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FormPart;

    #[test]
    fn course_edit_form_skips_unset_fields() {
        let edit = CourseEdit {
            course_title: Some("Rust 101".to_string()),
            course_price: Some(49.5),
            ..Default::default()
        };
        let form = edit.to_form();
        let names: Vec<_> = form.parts.iter().map(FormPart::name).collect();
        assert_eq!(names, ["courseTitle", "coursePrice"]);
        assert!(!form.has_files());
    }

    #[test]
    fn course_edit_form_attaches_thumbnail() {
        let edit = CourseEdit {
            thumbnail: Some(Thumbnail {
                file_name: "cover.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                data: vec![0xff, 0xd8],
            }),
            ..Default::default()
        };
        assert!(edit.to_form().has_files());
    }

    #[test]
    fn course_reads_mongo_id_and_defaults() {
        let course: Course = serde_json::from_str(
            r#"{"_id":"c1","courseTitle":"Rust","category":"Programming"}"#,
        )
        .unwrap();
        assert_eq!(course.id, "c1");
        assert!(!course.is_published);
        assert!(course.lectures.is_empty());
    }

    #[test]
    fn edit_lecture_omits_missing_video() {
        let body = serde_json::to_value(EditLecture {
            lecture_title: "Intro".to_string(),
            video_info: None,
            is_preview_free: true,
        })
        .unwrap();
        assert_eq!(body["lectureTitle"], "Intro");
        assert_eq!(body["isPreviewFree"], true);
        assert!(body.get("videoInfo").is_none());
    }
}
