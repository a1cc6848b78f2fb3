use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PhotoId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default, rename = "avatar")]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "_id")]
    pub id: PhotoId,
    pub name: String,
    #[serde(rename = "link")]
    pub image_url: String,
    pub owner: Profile,
    #[serde(default, rename = "likes")]
    pub liked_by: Vec<Profile>,
    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Photo {
    pub fn owner_id(&self) -> &UserId {
        &self.owner.id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner.id == user_id
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.liked_by.iter().any(|user| &user.id == user_id)
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn liked_by_ids(&self) -> BTreeSet<UserId> {
        self.liked_by.iter().map(|user| user.id.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
}

/// Identity endpoints wrap the account in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityEnvelope {
    pub data: Identity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub about: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarUpdate {
    #[serde(rename = "avatar")]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPhoto {
    pub name: String,
    #[serde(rename = "link")]
    pub image_url: String,
}
