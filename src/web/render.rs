//! Server-side HTML rendering for the board pages.
//!
//! Pages are assembled from small string fragments. Every piece of user
//! text goes through [`text`] or [`attr`] before it reaches the markup.

use std::borrow::Cow;
use std::fmt::Write;

use crate::config::{BoardConfig, ServerConfig};
use crate::datetime::format_display;
use crate::post::{Post, PostDetail, PostWithReplies, MAX_POSTER_NAME_LENGTH};

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Site-wide values every page needs.
#[derive(Debug, Clone)]
pub struct Site {
    /// Board name (navigation bar brand and page title).
    pub name: String,
    /// Meta description.
    pub description: String,
    /// Timezone used when displaying timestamps.
    pub timezone: String,
}

impl Site {
    /// Build from the board and server configuration sections.
    pub fn from_config(board: &BoardConfig, server: &ServerConfig) -> Self {
        Self {
            name: board.name.clone(),
            description: board.description.clone(),
            timezone: server.timezone.clone(),
        }
    }

    fn time(&self, post_time: &chrono::DateTime<chrono::Utc>) -> String {
        format_display(post_time, &self.timezone)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default(), &ServerConfig::default())
    }
}

/// Escape text content.
pub fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape a double-quoted attribute value.
pub fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Wrap page content in the shared layout with the navigation bar.
pub fn layout(site: &Site, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<title>{title} - {name}</title>
<link rel="stylesheet" href="{css}">
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark">
<div class="container">
<a class="navbar-brand" href="/">{name}</a>
<div class="navbar-nav">
<a class="nav-link" href="/">All Posts</a>
<a class="nav-link" href="/posts/new">New Post</a>
</div>
</div>
</nav>
<div class="container mt-4">
{content}
</div>
</body>
</html>
"#,
        description = attr(&site.description),
        title = text(title),
        name = text(&site.name),
        css = BOOTSTRAP_CSS,
        content = content,
    )
}

/// Confirmation shown after a form action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A top-level post was created.
    Created,
    /// A reply was posted.
    Replied,
    /// A post was edited.
    Updated,
    /// A post was deleted.
    Deleted,
}

impl Notice {
    /// Query string value, as in `/?notice=created`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Replied => "replied",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    /// Parse a query string value. Unknown values are ignored.
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Notice::Created),
            "replied" => Some(Notice::Replied),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Notice::Created => "Post created successfully!",
            Notice::Replied => "Reply posted successfully!",
            Notice::Updated => "Post updated successfully!",
            Notice::Deleted => "Deleted successfully.",
        }
    }
}

fn notice_alert(html: &mut String, notice: Option<Notice>) {
    if let Some(notice) = notice {
        let _ = writeln!(
            html,
            r#"<div class="alert alert-success" role="status">{}</div>"#,
            notice.message()
        );
    }
}

fn delete_button(post: &Post, class: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="/posts/{id}/delete" class="d-inline" onsubmit="return confirm('Are you sure you want to delete this post?');"><button type="submit" class="{class}">{label}</button></form>"#,
        id = post.id,
        class = class,
        label = label,
    )
}

/// The post list: top-level posts with their direct replies nested.
pub fn post_list(site: &Site, entries: &[PostWithReplies], notice: Option<Notice>) -> String {
    let mut html = String::new();
    notice_alert(&mut html, notice);
    html.push_str("<h1>My Posts</h1>\n");
    html.push_str(r#"<a href="/posts/new" class="btn btn-primary mb-3">Create New Post</a>"#);
    html.push('\n');

    if entries.is_empty() {
        html.push_str(
            r#"<div class="alert alert-info">
<h4>No posts yet</h4>
<p>Be the first to create a post!</p>
<a href="/posts/new" class="btn btn-primary">Create First Post</a>
</div>"#,
        );
        return layout(site, "My Posts", &html);
    }

    html.push_str("<div>\n");
    for entry in entries {
        let post = &entry.post;
        let _ = write!(
            html,
            r#"<div class="post mb-4 p-3 border rounded" id="post-{id}">
<div class="d-flex justify-content-between align-items-start mb-2">
<h5 class="mb-0"><strong>{name}</strong></h5>
<small class="text-muted">{time}</small>
</div>
<p class="mb-2" style="white-space: pre-wrap"><a href="/posts/{id}" class="text-dark text-decoration-none">{content}</a></p>
<div class="mt-3">
<a href="/posts/{id}" class="btn btn-sm btn-info me-2">View</a>
<a href="/posts/{id}/reply" class="btn btn-sm btn-success me-2">Reply</a>
<a href="/posts/{id}/edit" class="btn btn-sm btn-warning me-2">Edit</a>
{delete}
</div>
"#,
            id = post.id,
            name = text(&post.poster_name),
            time = site.time(&post.created_at),
            content = text(&post.content),
            delete = delete_button(post, "btn btn-sm btn-danger", "Delete"),
        );

        if !entry.replies.is_empty() {
            let _ = write!(
                html,
                r#"<div class="mt-3 ms-3 border-start border-3 ps-3">
<h6 class="text-muted mb-3">Replies ({}):</h6>
"#,
                entry.replies.len()
            );
            for reply in &entry.replies {
                let _ = write!(
                    html,
                    r#"<div class="reply mb-2 p-2 bg-light rounded" id="post-{id}">
<div class="d-flex justify-content-between align-items-center mb-2">
<strong class="small">{name}</strong>
<small class="text-muted">{time}</small>
</div>
<p class="mb-0 small" style="white-space: pre-wrap"><a href="/posts/{id}" class="text-dark text-decoration-none">{content}</a></p>
</div>
"#,
                    id = reply.id,
                    name = text(&reply.poster_name),
                    time = site.time(&reply.created_at),
                    content = text(&reply.content),
                );
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>");

    layout(site, "My Posts", &html)
}

/// The detail page of a single post.
pub fn post_detail(site: &Site, detail: &PostDetail, notice: Option<Notice>) -> String {
    let post = &detail.post;
    let mut html = String::new();
    notice_alert(&mut html, notice);

    let _ = write!(
        html,
        r#"<div class="d-flex justify-content-between align-items-center mb-3">
<h1>Post Details</h1>
<div>
<a href="/posts/{id}/edit" class="btn btn-warning me-2">Edit</a>
<a href="/" class="btn btn-secondary">Back to Posts</a>
</div>
</div>
"#,
        id = post.id
    );

    if let Some(parent) = &detail.parent {
        let _ = write!(
            html,
            r#"<div class="mb-4 p-3 bg-light border-start border-4 border-primary">
<div class="small text-muted mb-2">This is a reply to:</div>
<div class="d-flex justify-content-between align-items-start mb-2">
<strong>{name}</strong>
<small class="text-muted">{time}</small>
</div>
<div class="mb-2" style="white-space: pre-wrap">{content}</div>
<a href="/posts/{id}" class="btn btn-sm btn-outline-primary">View Original Post</a>
</div>
"#,
            id = parent.id,
            name = text(&parent.poster_name),
            time = site.time(&parent.created_at),
            content = text(&parent.content),
        );
    }

    let _ = write!(
        html,
        r#"<div class="card">
<div class="card-body">
<div class="d-flex justify-content-between align-items-start mb-3">
<h5 class="mb-0"><strong>{name}</strong></h5>
<small class="text-muted">{created}</small>
</div>
<p class="card-text" style="white-space: pre-wrap">{content}</p>
<div class="mt-3">
<small class="text-muted">
<strong>ID:</strong> {id}<br>
<strong>Created:</strong> {created}<br>
<strong>Updated:</strong> {updated}
</small>
</div>
</div>
</div>
<div class="mt-3 d-flex gap-2">
<a href="/posts/{id}/reply" class="btn btn-primary">Reply</a>
{delete}
</div>
"#,
        id = post.id,
        name = text(&post.poster_name),
        content = text(&post.content),
        created = site.time(&post.created_at),
        updated = site.time(&post.updated_at),
        delete = delete_button(post, "btn btn-danger", "Delete Post"),
    );

    if !detail.replies.is_empty() {
        let _ = write!(
            html,
            "<div class=\"mt-4\">\n<h4>Replies ({})</h4>\n",
            detail.replies.len()
        );
        for reply in &detail.replies {
            let _ = write!(
                html,
                r#"<div class="card mb-3" id="post-{id}">
<div class="card-body">
<div class="d-flex justify-content-between align-items-start mb-2">
<strong>{name}</strong>
<small class="text-muted">{time}</small>
</div>
<p class="card-text" style="white-space: pre-wrap">{content}</p>
<a href="/posts/{id}" class="btn btn-sm btn-outline-primary">View Reply</a>
</div>
</div>
"#,
                id = reply.id,
                name = text(&reply.poster_name),
                time = site.time(&reply.created_at),
                content = text(&reply.content),
            );
        }
        html.push_str("</div>");
    }

    layout(site, "Post Details", &html)
}

/// What a post form is for.
#[derive(Debug, Clone, Copy)]
pub enum FormKind<'a> {
    /// Create a new top-level post.
    New,
    /// Reply to the given post.
    Reply(&'a Post),
    /// Edit the given post.
    Edit(&'a Post),
}

/// Values and messages shown in a post form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Current poster name value.
    pub poster_name: String,
    /// Current content value.
    pub content: String,
    /// Validation messages to show above the form.
    pub errors: Vec<String>,
}

/// The new post, reply and edit forms.
pub fn post_form(site: &Site, kind: FormKind<'_>, state: &FormState) -> String {
    let (heading, action, submit, cancel) = match kind {
        FormKind::New => (
            "Create New Post".to_string(),
            "/posts".to_string(),
            "Create Post",
            "/".to_string(),
        ),
        FormKind::Reply(parent) => (
            "Reply to Post".to_string(),
            format!("/posts/{}/reply", parent.id),
            "Post Reply",
            format!("/posts/{}", parent.id),
        ),
        FormKind::Edit(post) => (
            "Edit Post".to_string(),
            format!("/posts/{}/edit", post.id),
            "Save Changes",
            format!("/posts/{}", post.id),
        ),
    };

    let mut html = String::new();
    let _ = writeln!(html, "<h1>{}</h1>", text(&heading));

    if let FormKind::Reply(parent) = kind {
        let _ = write!(
            html,
            r#"<div class="mb-4 p-3 bg-light border-start border-4 border-primary">
<div class="small text-muted mb-2">Replying to:</div>
<div class="d-flex justify-content-between align-items-start mb-2">
<strong>{name}</strong>
<small class="text-muted">{time}</small>
</div>
<div style="white-space: pre-wrap">{content}</div>
</div>
"#,
            name = text(&parent.poster_name),
            time = site.time(&parent.created_at),
            content = text(&parent.content),
        );
    }

    if !state.errors.is_empty() {
        html.push_str("<div class=\"alert alert-danger\">\n<ul class=\"mb-0\">\n");
        for error in &state.errors {
            let _ = writeln!(html, "<li>{}</li>", text(error));
        }
        html.push_str("</ul>\n</div>\n");
    }

    let _ = write!(
        html,
        r#"<form method="post" action="{action}">
<div class="mb-3">
<label for="posterName" class="form-label">Your Name</label>
<input type="text" class="form-control" id="posterName" name="posterName" maxlength="{max}" required value="{poster_name}">
</div>
<div class="mb-3">
<label for="content" class="form-label">Content</label>
<textarea class="form-control" id="content" name="content" rows="5" required placeholder="What's on your mind?">{content}</textarea>
</div>
<div class="d-flex gap-2">
<button type="submit" class="btn btn-primary">{submit}</button>
<a href="{cancel}" class="btn btn-secondary">Cancel</a>
</div>
</form>"#,
        action = attr(&action),
        max = MAX_POSTER_NAME_LENGTH,
        poster_name = attr(&state.poster_name),
        content = text(&state.content),
        submit = submit,
        cancel = attr(&cancel),
    );

    layout(site, &heading, &html)
}

/// Page shown for unknown paths.
pub fn not_found(site: &Site) -> String {
    layout(
        site,
        "Not Found",
        r#"<div class="alert alert-warning">
<h4>Page not found</h4>
<p>The page you were looking for does not exist.</p>
<a href="/" class="btn btn-primary">Back to Posts</a>
</div>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostId;
    use chrono::{TimeZone, Utc};

    fn post(id: u64, name: &str, content: &str, reply_to: Option<u64>) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Post {
            id: PostId::new(id),
            poster_name: name.to_string(),
            content: content.to_string(),
            reply_to_id: reply_to.map(PostId::new),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_layout_contains_navigation() {
        let html = layout(&Site::default(), "Title", "<p>body</p>");
        assert!(html.contains(r#"<a class="navbar-brand" href="/">My Posts</a>"#));
        assert!(html.contains(r#"href="/posts/new""#));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("<title>Title - My Posts</title>"));
    }

    #[test]
    fn test_post_list_escapes_user_text() {
        let entries = vec![PostWithReplies {
            post: post(1, "<b>Mallory</b>", "<script>alert(1)</script>", None),
            replies: vec![],
        }];
        let html = post_list(&Site::default(), &entries, None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;Mallory&lt;/b&gt;"));
    }

    #[test]
    fn test_post_list_empty_state() {
        let html = post_list(&Site::default(), &[], None);
        assert!(html.contains("No posts yet"));
        assert!(html.contains("Create First Post"));
    }

    #[test]
    fn test_post_list_nests_replies() {
        let entries = vec![PostWithReplies {
            post: post(1, "John Doe", "First", None),
            replies: vec![post(2, "Jane Smith", "Welcome!", Some(1))],
        }];
        let html = post_list(&Site::default(), &entries, None);
        assert!(html.contains("Replies (1):"));
        assert!(html.contains(r#"id="post-2""#));
        assert!(html.contains("2024/01/15 10:30"));
    }

    #[test]
    fn test_post_list_notice() {
        let html = post_list(&Site::default(), &[], Some(Notice::Deleted));
        assert!(html.contains("Deleted successfully."));
        assert!(html.contains("alert-success"));

        let html = post_list(&Site::default(), &[], None);
        assert!(!html.contains("alert-success"));
    }

    #[test]
    fn test_notice_from_query() {
        assert_eq!(Notice::from_query("created"), Some(Notice::Created));
        assert_eq!(Notice::from_query(Notice::Updated.as_str()), Some(Notice::Updated));
        assert_eq!(Notice::from_query("<script>"), None);
        assert_eq!(Notice::from_query(""), None);
    }

    #[test]
    fn test_post_detail_reply_banner() {
        let detail = PostDetail {
            post: post(2, "Jane Smith", "Welcome!", Some(1)),
            parent: Some(post(1, "John Doe", "First", None)),
            replies: vec![],
        };
        let html = post_detail(&Site::default(), &detail, None);
        assert!(html.contains("This is a reply to:"));
        assert!(html.contains("View Original Post"));
        assert!(html.contains(r#"action="/posts/2/delete""#));
        assert!(!html.contains("Replies ("));
    }

    #[test]
    fn test_post_form_keeps_values_and_errors() {
        let state = FormState {
            poster_name: "\"Quoted\"".to_string(),
            content: "</textarea>".to_string(),
            errors: vec!["content must not be empty".to_string()],
        };
        let html = post_form(&Site::default(), FormKind::New, &state);
        assert!(html.contains(r#"action="/posts""#));
        assert!(html.contains("content must not be empty"));
        assert!(html.contains("&quot;Quoted&quot;"));
        assert!(html.contains("&lt;/textarea&gt;"));
    }

    #[test]
    fn test_reply_form_quotes_parent() {
        let parent = post(4, "Bob Wilson", "Generics?", None);
        let html = post_form(&Site::default(), FormKind::Reply(&parent), &FormState::default());
        assert!(html.contains("Replying to:"));
        assert!(html.contains(r#"action="/posts/4/reply""#));
        assert!(html.contains("Bob Wilson"));
    }

    #[test]
    fn test_site_timezone() {
        let site = Site {
            timezone: "Asia/Tokyo".to_string(),
            ..Site::default()
        };
        let detail = PostDetail {
            post: post(1, "John Doe", "First", None),
            parent: None,
            replies: vec![],
        };
        assert!(post_detail(&site, &detail, None).contains("2024/01/15 19:30"));
    }
}
