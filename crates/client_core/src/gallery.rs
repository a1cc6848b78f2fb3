use shared::{domain::PhotoId, protocol::Photo};

/// Newest-first photo list with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    photos: Vec<Photo>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents, keeping the given order and dropping repeated ids after the first.
    pub fn load(&mut self, photos: Vec<Photo>) {
        self.photos.clear();
        for photo in photos {
            if !self.contains(&photo.id) {
                self.photos.push(photo);
            }
        }
    }

    /// Inserts at the head; an entry with the same id is moved there.
    pub fn prepend(&mut self, photo: Photo) {
        self.photos.retain(|existing| existing.id != photo.id);
        self.photos.insert(0, photo);
    }

    pub fn remove(&mut self, photo_id: &PhotoId) -> Option<Photo> {
        let index = self.photos.iter().position(|photo| &photo.id == photo_id)?;
        Some(self.photos.remove(index))
    }

    /// Swaps in the server's version of an entry. Returns false when the id is no longer present.
    pub fn replace(&mut self, photo: Photo) -> bool {
        match self.photos.iter_mut().find(|existing| existing.id == photo.id) {
            Some(slot) => {
                *slot = photo;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, photo_id: &PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|photo| &photo.id == photo_id)
    }

    pub fn contains(&self, photo_id: &PhotoId) -> bool {
        self.get(photo_id).is_some()
    }

    pub fn head(&self) -> Option<&Photo> {
        self.photos.first()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn ids(&self) -> Vec<PhotoId> {
        self.photos.iter().map(|photo| photo.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }
}
