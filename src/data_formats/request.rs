use axum::extract::Multipart;
use serde::Deserialize;
use validator::Validate;

use crate::{errors::RequestError, models::Group};

use super::validation::*;

pub const POST_TEXT_LABEL: &str = "Post text";
pub const POST_TEXT_HELP: &str = "Enter the text of the post";
pub const POST_GROUP_LABEL: &str = "Post group";
pub const POST_GROUP_HELP: &str = "Choose a group for the post";
pub const POST_IMAGE_LABEL: &str = "Image";
pub const COMMENT_TEXT_LABEL: &str = "Comment";
pub const COMMENT_TEXT_HELP: &str = "Enter the text of the comment";

// ----------------- Post Request -----------------
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// A submitted post form. Create and edit share it.
#[derive(Debug, Default, Validate)]
pub struct PostRequest {
    #[validate(custom(function = "required"))]
    pub text: String,
    pub group: Option<String>,
    pub image: Option<UploadedImage>,
}

impl PostRequest {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, RequestError> {
        let mut request = PostRequest::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RequestError::MalformedPayload(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "text" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| RequestError::MalformedPayload(e.to_string()))?;
                    request.text = text.trim().to_string();
                }
                "group" => {
                    let group = field
                        .text()
                        .await
                        .map_err(|e| RequestError::MalformedPayload(e.to_string()))?;
                    request.group = Some(group).filter(|group| !group.trim().is_empty());
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content = field
                        .bytes()
                        .await
                        .map_err(|e| RequestError::MalformedPayload(e.to_string()))?;
                    // Browsers send an empty part when no file was chosen.
                    if !content.is_empty() {
                        request.image = Some(UploadedImage {
                            file_name,
                            content: content.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }
        Ok(request)
    }

    /// The chosen group id, if it parses.
    pub fn group_id(&self) -> Option<i64> {
        self.group
            .as_deref()
            .and_then(|group| group.trim().parse().ok())
    }

    /// The derived field rules plus the checks that need the stored groups
    /// and a decoded upload.
    pub fn validate_with_groups(&self, groups: &[Group]) -> FormErrors {
        let mut errors = self.form_errors();
        if self.group.is_some() {
            let known = self
                .group_id()
                .map(|id| groups.iter().any(|group| group.id == id))
                .unwrap_or(false);
            if !known {
                errors.add("group", INVALID_CHOICE);
            }
        }
        if let Some(image) = &self.image {
            if !is_image(&image.content) {
                errors.add("image", INVALID_IMAGE);
            }
        }
        errors
    }
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Debug, Default, Validate)]
#[serde(default)]
pub struct CommentRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "required"))]
    pub text: String,
}

// ----------------- User Request -----------------
#[derive(Deserialize, Debug, Default, Validate)]
#[serde(default)]
#[validate(schema(function = "password_differs_from_username", skip_on_field_errors = false))]
pub struct SignupRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        custom(function = "username_rules"),
        length(max = 150, message = "Ensure this value has at most 150 characters.")
    )]
    pub username: String,
    #[validate(
        length(
            min = 8,
            message = "This password is too short. It must contain at least 8 characters."
        ),
        custom(function = "not_numeric")
    )]
    pub password1: String,
    #[validate(must_match(other = "password1", message = "The two password fields didn’t match."))]
    pub password2: String,
}

fn password_differs_from_username(
    request: &SignupRequest,
) -> Result<(), validator::ValidationError> {
    not_like_username(&request.username, &request.password1)
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

// ----------------- Group Request -----------------
#[derive(Debug, Clone, Validate)]
pub struct GroupRequest {
    #[validate(
        custom(function = "required"),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub title: String,
    #[validate(
        custom(function = "slug_rules"),
        length(max = 50, message = "Ensure this value has at most 50 characters.")
    )]
    pub slug: String,
    #[validate(custom(function = "required"))]
    pub description: String,
}

impl GroupRequest {
    pub fn new(title: &str, slug: &str, description: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            slug: slug.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::{Error as ValueError, MapDeserializer};

    use super::*;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: 3,
            title: "form-group".to_string(),
            slug: "form-slug".to_string(),
            description: "form-description".to_string(),
        }]
    }

    #[test]
    fn post_with_known_group_is_valid() {
        let request = PostRequest {
            text: "form-text".to_string(),
            group: Some("3".to_string()),
            image: None,
        };
        assert!(request.validate_with_groups(&groups()).is_empty());
        assert_eq!(request.group_id(), Some(3));
    }

    #[test]
    fn post_requires_text_and_a_real_group() {
        let request = PostRequest {
            text: "  ".to_string(),
            group: Some("99".to_string()),
            image: Some(UploadedImage {
                file_name: "notes.txt".to_string(),
                content: b"plain text".to_vec(),
            }),
        };
        let errors = request.validate_with_groups(&groups());
        assert_eq!(errors.get("text"), [REQUIRED.to_string()]);
        assert_eq!(errors.get("group"), [INVALID_CHOICE.to_string()]);
        assert_eq!(errors.get("image"), [INVALID_IMAGE.to_string()]);
    }

    #[test]
    fn group_is_optional() {
        let request = PostRequest {
            text: "no group".to_string(),
            ..Default::default()
        };
        assert!(request.validate_with_groups(&[]).is_empty());
        assert_eq!(request.group_id(), None);
    }

    #[test]
    fn signup_rejects_password_equal_to_username() {
        let request = SignupRequest {
            username: "longusername".to_string(),
            password1: "longusername".to_string(),
            password2: "longusername".to_string(),
        };
        assert_eq!(
            request.form_errors().get(FormErrors::NON_FIELD),
            [SIMILAR_PASSWORD.to_string()]
        );
    }

    #[test]
    fn signup_collects_password_rules() {
        let request = SignupRequest {
            username: "teo".to_string(),
            password1: "1234567".to_string(),
            password2: "7654321".to_string(),
        };
        let errors = request.form_errors();
        assert_eq!(errors.get("password1").len(), 2);
        assert_eq!(
            errors.get("password2"),
            ["The two password fields didn’t match.".to_string()]
        );
        assert!(errors.get("username").is_empty());
    }

    #[test]
    fn signup_username_is_stripped_before_validation() {
        let fields = [
            ("username", " teo "),
            ("password1", "correct-horse"),
            ("password2", "correct-horse"),
        ];
        let request = SignupRequest::deserialize(MapDeserializer::<_, ValueError>::new(
            fields.into_iter(),
        ))
        .unwrap();
        assert_eq!(request.username, "teo");
        assert!(request.form_errors().is_empty());
    }

    #[test]
    fn blank_comment_is_required() {
        let request = CommentRequest {
            text: "   ".to_string(),
        };
        assert_eq!(request.form_errors().get("text"), [REQUIRED.to_string()]);
    }

    #[test]
    fn group_request_checks_every_field() {
        let request = GroupRequest {
            title: "".to_string(),
            slug: "bad slug".to_string(),
            description: "".to_string(),
        };
        let errors = request.form_errors();
        assert!(!errors.get("title").is_empty());
        assert!(!errors.get("slug").is_empty());
        assert!(!errors.get("description").is_empty());
    }
}
