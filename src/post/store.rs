//! In-memory post store for Postboard.
//!
//! This module provides the CRUD operations for posts and derives reply
//! threads from the `reply_to_id` back-references.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use super::types::{
    validate_content, validate_poster_name, DeleteOutcome, DeletePolicy, NewPost, Post,
    PostDetail, PostId, PostUpdate, PostWithReplies,
};
use crate::{PostboardError, Result};

/// Store holding every post, keyed by identifier.
///
/// Identifiers increase with creation time, so iterating the map yields
/// posts in creation order.
#[derive(Debug)]
pub struct PostStore {
    posts: BTreeMap<PostId, Post>,
    next_id: u64,
    last_timestamp: Option<DateTime<Utc>>,
    delete_policy: DeletePolicy,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new(DeletePolicy::default())
    }
}

impl PostStore {
    /// Create an empty store with the given delete policy.
    pub fn new(delete_policy: DeletePolicy) -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: 1,
            last_timestamp: None,
            delete_policy,
        }
    }

    /// Delete policy applied by [`PostStore::delete`].
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Number of posts, replies included.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if the store holds no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Create a new post or reply.
    ///
    /// Name and content are trimmed. A reply must point at an existing post.
    pub fn create(&mut self, new_post: &NewPost) -> Result<Post> {
        let created_at = self.next_timestamp(Utc::now());
        self.insert(new_post, created_at)
    }

    /// Insert a post with a caller-chosen creation time.
    ///
    /// Used for loading fixed sample data. The timestamp is still clamped so
    /// creation times never go backwards.
    pub(crate) fn insert_at(&mut self, new_post: &NewPost, at: DateTime<Utc>) -> Result<Post> {
        let created_at = self.next_timestamp(at);
        self.insert(new_post, created_at)
    }

    fn insert(&mut self, new_post: &NewPost, created_at: DateTime<Utc>) -> Result<Post> {
        let poster_name = validate_poster_name(&new_post.poster_name)?;
        let content = validate_content(&new_post.content)?;

        if let Some(parent_id) = new_post.reply_to_id {
            if !self.posts.contains_key(&parent_id) {
                return Err(PostboardError::NotFound(format!("post {parent_id}")));
            }
        }

        let id = PostId::new(self.next_id);
        self.next_id += 1;

        let post = Post {
            id,
            poster_name,
            content,
            reply_to_id: new_post.reply_to_id,
            created_at,
            updated_at: created_at,
        };
        self.posts.insert(id, post.clone());

        tracing::info!(
            post_id = %id,
            reply_to = ?post.reply_to_id.map(|p| p.value()),
            "Post created"
        );
        Ok(post)
    }

    /// Get a post by ID.
    pub fn get(&self, id: PostId) -> Result<&Post> {
        self.posts
            .get(&id)
            .ok_or_else(|| PostboardError::NotFound(format!("post {id}")))
    }

    /// List top-level posts in creation order, each with its direct replies.
    pub fn list(&self) -> Vec<PostWithReplies> {
        let children = self.children_index();
        self.posts
            .values()
            .filter(|p| p.is_top_level())
            .map(|post| PostWithReplies {
                post: post.clone(),
                replies: Self::collect_children(&children, post.id),
            })
            .collect()
    }

    /// Direct replies to a post, in creation order.
    pub fn replies(&self, id: PostId) -> Result<Vec<Post>> {
        self.get(id)?;
        Ok(self
            .posts
            .values()
            .filter(|p| p.reply_to_id == Some(id))
            .cloned()
            .collect())
    }

    /// The post that `post` replies to, if any.
    pub fn parent(&self, post: &Post) -> Option<&Post> {
        post.reply_to_id.and_then(|id| self.posts.get(&id))
    }

    /// A post with its parent and direct replies.
    pub fn thread(&self, id: PostId) -> Result<PostDetail> {
        let post = self.get(id)?;
        Ok(PostDetail {
            post: post.clone(),
            parent: self.parent(post).cloned(),
            replies: self.replies(id)?,
        })
    }

    /// Edit a post's poster name and/or content.
    ///
    /// An empty update returns the post unchanged.
    pub fn update(&mut self, id: PostId, update: &PostUpdate) -> Result<Post> {
        if !self.posts.contains_key(&id) {
            return Err(PostboardError::NotFound(format!("post {id}")));
        }
        if update.is_empty() {
            return self.get(id).cloned();
        }

        let poster_name = update
            .poster_name
            .as_deref()
            .map(validate_poster_name)
            .transpose()?;
        let content = update.content.as_deref().map(validate_content).transpose()?;

        let now = self.next_timestamp(Utc::now());
        let post = self
            .posts
            .get_mut(&id)
            .ok_or_else(|| PostboardError::NotFound(format!("post {id}")))?;

        if let Some(poster_name) = poster_name {
            post.poster_name = poster_name;
        }
        if let Some(content) = content {
            post.content = content;
        }
        post.updated_at = now.max(post.created_at);

        tracing::info!(post_id = %id, "Post updated");
        Ok(post.clone())
    }

    /// Delete a post, applying the store's delete policy to its replies.
    pub fn delete(&mut self, id: PostId) -> Result<DeleteOutcome> {
        if !self.posts.contains_key(&id) {
            return Err(PostboardError::NotFound(format!("post {id}")));
        }

        let outcome = match self.delete_policy {
            DeletePolicy::Cascade => {
                let removed = self.subtree(id);
                for post_id in &removed {
                    self.posts.remove(post_id);
                }
                DeleteOutcome {
                    removed,
                    detached: Vec::new(),
                }
            }
            DeletePolicy::Orphan => {
                self.posts.remove(&id);
                let mut detached = Vec::new();
                for post in self.posts.values_mut() {
                    if post.reply_to_id == Some(id) {
                        post.reply_to_id = None;
                        detached.push(post.id);
                    }
                }
                DeleteOutcome {
                    removed: vec![id],
                    detached,
                }
            }
        };

        tracing::info!(
            post_id = %id,
            policy = %self.delete_policy,
            removed = outcome.removed.len(),
            detached = outcome.detached.len(),
            "Post deleted"
        );
        Ok(outcome)
    }

    /// The post and all of its transitive replies, the post first.
    fn subtree(&self, root: PostId) -> Vec<PostId> {
        let children = self.children_index();
        let mut result = vec![root];
        let mut cursor = 0;
        while cursor < result.len() {
            if let Some(kids) = children.get(&result[cursor]) {
                result.extend(kids.iter().map(|p| p.id));
            }
            cursor += 1;
        }
        result
    }

    fn children_index(&self) -> HashMap<PostId, Vec<&Post>> {
        let mut index: HashMap<PostId, Vec<&Post>> = HashMap::new();
        for post in self.posts.values() {
            if let Some(parent) = post.reply_to_id {
                index.entry(parent).or_default().push(post);
            }
        }
        index
    }

    fn collect_children(children: &HashMap<PostId, Vec<&Post>>, id: PostId) -> Vec<Post> {
        children
            .get(&id)
            .map(|kids| kids.iter().map(|p| (*p).clone()).collect())
            .unwrap_or_default()
    }

    /// Timestamps handed out by the store never go backwards.
    fn next_timestamp(&mut self, candidate: DateTime<Utc>) -> DateTime<Utc> {
        let ts = match self.last_timestamp {
            Some(last) if last > candidate => last,
            _ => candidate,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}
