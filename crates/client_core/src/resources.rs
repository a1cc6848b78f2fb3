use std::sync::Arc;

use serde_json::Value;
use shared::{
    domain::{PhotoId, UserId},
    protocol::{AvatarUpdate, NewPhoto, Photo, Profile, ProfileUpdate},
};
use tracing::{debug, info};

use crate::{
    error::{ClientResult, Field},
    transport::{call, ApiRequest, Transport},
    validation,
};

/// Profile and gallery endpoints.
pub struct ResourceService {
    transport: Arc<dyn Transport>,
}

impl ResourceService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_profile(&self) -> ClientResult<Profile> {
        call(self.transport.as_ref(), ApiRequest::get("/users/me")).await
    }

    /// Photos in the order the backend returns them.
    pub async fn fetch_gallery(&self) -> ClientResult<Vec<Photo>> {
        let photos: Vec<Photo> = call(self.transport.as_ref(), ApiRequest::get("/cards")).await?;
        debug!(count = photos.len(), "gallery fetched");
        Ok(photos)
    }

    pub async fn update_profile(&self, name: &str, about: &str) -> ClientResult<Profile> {
        let update = ProfileUpdate {
            name: validation::text(Field::Name, name)?,
            about: validation::text(Field::About, about)?,
        };
        let request = ApiRequest::patch("/users/me").json(&update)?;
        call(self.transport.as_ref(), request).await
    }

    pub async fn update_avatar(&self, avatar_url: &str) -> ClientResult<Profile> {
        let update = AvatarUpdate {
            avatar_url: validation::link(Field::AvatarUrl, avatar_url)?,
        };
        let request = ApiRequest::patch("/users/me/avatar").json(&update)?;
        call(self.transport.as_ref(), request).await
    }

    pub async fn create_photo(&self, name: &str, image_url: &str) -> ClientResult<Photo> {
        let new_photo = NewPhoto {
            name: validation::text(Field::PhotoName, name)?,
            image_url: validation::link(Field::ImageUrl, image_url)?,
        };
        let request = ApiRequest::post("/cards").json(&new_photo)?;
        let created: Photo = call(self.transport.as_ref(), request).await?;
        info!(photo_id = %created.id, "photo created");
        Ok(created)
    }

    pub async fn delete_photo(&self, photo_id: &PhotoId) -> ClientResult<()> {
        let _: Value = call(
            self.transport.as_ref(),
            ApiRequest::delete(format!("/cards/{photo_id}")),
        )
        .await?;
        info!(%photo_id, "photo deleted");
        Ok(())
    }

    pub async fn like(&self, photo_id: &PhotoId) -> ClientResult<Photo> {
        call(
            self.transport.as_ref(),
            ApiRequest::put(format!("/cards/{photo_id}/likes")),
        )
        .await
    }

    pub async fn unlike(&self, photo_id: &PhotoId) -> ClientResult<Photo> {
        call(
            self.transport.as_ref(),
            ApiRequest::delete(format!("/cards/{photo_id}/likes")),
        )
        .await
    }

    /// Unlikes when `user_id` already likes the photo, likes otherwise. The returned entity is the
    /// backend's, so the like set is never computed locally.
    pub async fn toggle_like(&self, photo: &Photo, user_id: &UserId) -> ClientResult<Photo> {
        if photo.is_liked_by(user_id) {
            self.unlike(&photo.id).await
        } else {
            self.like(&photo.id).await
        }
    }
}

#[cfg(test)]
#[path = "tests/resources_tests.rs"]
mod tests;
