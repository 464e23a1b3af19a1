//! Request DTOs for the JSON API and HTML forms.

use serde::Deserialize;
use validator::Validate;

use super::validation::{valid_content, valid_poster_name};
use crate::post::{NewPost, PostId, PostUpdate};
use crate::web::render::Notice;
use crate::Result;

/// Create post request (`POST /api/posts`).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Display name of the author.
    #[validate(custom(function = "valid_poster_name"))]
    pub poster_name: String,
    /// Post body.
    #[validate(custom(function = "valid_content"))]
    pub content: String,
    /// Parent post ID, for replies.
    #[serde(default)]
    pub reply_to_id: Option<String>,
}

impl CreatePostRequest {
    /// Convert into a store request. An unparseable parent ID is reported as not found.
    pub fn into_new_post(self) -> Result<NewPost> {
        let mut new_post = NewPost::new(self.poster_name, self.content);
        if let Some(parent) = self.reply_to_id {
            new_post = new_post.reply_to(parent.parse::<PostId>()?);
        }
        Ok(new_post)
    }
}

/// Update post request (`PATCH /api/posts/:id`).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    /// New display name.
    #[serde(default)]
    #[validate(custom(function = "valid_poster_name"))]
    pub poster_name: Option<String>,
    /// New body.
    #[serde(default)]
    #[validate(custom(function = "valid_content"))]
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        PostUpdate {
            poster_name: req.poster_name,
            content: req.content,
        }
    }
}

/// New post, reply and edit form submission.
///
/// Missing fields deserialize as empty strings so they surface as
/// validation messages rather than extractor rejections.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    /// Display name of the author.
    #[serde(default)]
    #[validate(custom(function = "valid_poster_name"))]
    pub poster_name: String,
    /// Post body.
    #[serde(default)]
    #[validate(custom(function = "valid_content"))]
    pub content: String,
}

impl PostForm {
    /// Convert into a store request for a new post or reply.
    pub fn to_new_post(&self, reply_to: Option<PostId>) -> NewPost {
        let new_post = NewPost::new(self.poster_name.clone(), self.content.clone());
        match reply_to {
            Some(parent) => new_post.reply_to(parent),
            None => new_post,
        }
    }

    /// Convert into a store update.
    pub fn to_update(&self) -> PostUpdate {
        PostUpdate::new()
            .poster_name(self.poster_name.clone())
            .content(self.content.clone())
    }
}

/// Query parameters of pages that can show a confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    #[serde(default)]
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// The confirmation to show, ignoring unknown values.
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_query)
    }
}
