use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUser, User};
use crate::features::users::repositories::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_pair(
        &self,
        follower_id: Uuid,
        target_id: Uuid,
        apply: impl Fn(&mut Vec<Uuid>, Uuid),
    ) -> bool {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&follower_id) || !users.contains_key(&target_id) {
            return false;
        }
        if let Some(follower) = users.get_mut(&follower_id) {
            apply(&mut follower.following, target_id);
        }
        if let Some(target) = users.get_mut(&target_id) {
            apply(&mut target.followers, follower_id);
        }
        true
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            user_name: user.user_name,
            email: user.email,
            password_hash: user.password_hash,
            profile_pic_url: user.profile_pic_url,
            bio: user.bio,
            followers: Vec::new(),
            following: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool> {
        Ok(self.update_pair(follower_id, target_id, |set, id| {
            if !set.contains(&id) {
                set.push(id);
            }
        }))
    }

    async fn unfollow(&self, follower_id: Uuid, target_id: Uuid) -> Result<bool> {
        Ok(self.update_pair(follower_id, target_id, |set, id| {
            set.retain(|existing| *existing != id)
        }))
    }
}
