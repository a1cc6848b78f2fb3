//! In-process stand-in for the gallery and identity backends.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use shared::{
    domain::{PhotoId, UserId},
    protocol::{AvatarUpdate, Credentials, NewPhoto, Photo, Profile, ProfileUpdate},
};
use storage::MemoryStore;

use crate::{
    error::{ClientError, ClientResult, HttpError},
    session::SessionStore,
    transport::{ApiRequest, Transport},
};

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "pw";

pub fn me() -> Profile {
    Profile {
        id: UserId::new("me"),
        name: "Jacques Cousteau".into(),
        about: "Explorer".into(),
        avatar_url: "https://pictures.example/jacques.jpg".into(),
    }
}

pub fn other_user() -> Profile {
    Profile {
        id: UserId::new("other"),
        name: "Someone Else".into(),
        about: "Neighbour".into(),
        avatar_url: "https://pictures.example/other.jpg".into(),
    }
}

pub fn photo(id: &str, owner: Profile, liked_by: Vec<Profile>) -> Photo {
    Photo {
        id: PhotoId::new(id),
        name: format!("photo {id}"),
        image_url: format!("https://pictures.example/{id}.jpg"),
        owner,
        liked_by,
        created_at: None,
    }
}

struct BackendState {
    accounts: HashMap<String, (String, UserId)>,
    tokens: HashMap<String, String>,
    profile: Profile,
    photos: Vec<Photo>,
    next_id: u64,
    failures: Vec<(Method, String, u16)>,
}

pub struct FakeBackend {
    state: Mutex<BackendState>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let mut accounts = HashMap::new();
        accounts.insert(EMAIL.to_string(), (PASSWORD.to_string(), me().id));
        Arc::new(Self {
            state: Mutex::new(BackendState {
                accounts,
                tokens: HashMap::new(),
                profile: me(),
                photos: Vec::new(),
                next_id: 1,
                failures: Vec::new(),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn seed_photos(&self, photos: Vec<Photo>) {
        self.state.lock().expect("state").photos = photos;
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.state.lock().expect("state").photos.clone()
    }

    /// Issues a token the backend will accept, as if a sign-in happened earlier.
    pub fn issue_token(&self, token: &str) {
        self.state
            .lock()
            .expect("state")
            .tokens
            .insert(token.to_string(), EMAIL.to_string());
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.state
            .lock()
            .expect("state")
            .failures
            .push((method, path.to_string(), status));
    }

    pub fn heal(&self) {
        self.state.lock().expect("state").failures.clear();
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls").len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn handle(&self, request: &ApiRequest) -> Result<Value, (u16, &'static str)> {
        let mut state = self.state.lock().expect("state");
        if let Some((_, _, status)) = state
            .failures
            .iter()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
        {
            return Err((*status, "injected failure"));
        }

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        let body = request.body.clone().unwrap_or(Value::Null);
        let me = state.profile.clone();

        match (request.method.clone(), segments.as_slice()) {
            (Method::POST, ["signup"]) => {
                let creds: Credentials = serde_json::from_value(body).map_err(|_| (400, "bad body"))?;
                if state.accounts.contains_key(&creds.email) {
                    return Err((409, "user already exists"));
                }
                let id = UserId::new(format!("user-{}", state.next_id));
                state.next_id += 1;
                state
                    .accounts
                    .insert(creds.email.clone(), (creds.password, id.clone()));
                Ok(json!({ "data": { "_id": id, "email": creds.email } }))
            }
            (Method::POST, ["signin"]) => {
                let creds: Credentials = serde_json::from_value(body).map_err(|_| (400, "bad body"))?;
                let accepted = matches!(
                    state.accounts.get(&creds.email),
                    Some((password, _)) if *password == creds.password
                );
                if !accepted {
                    return Err((401, "wrong email or password"));
                }
                let token = format!("token-{}", state.next_id);
                state.next_id += 1;
                state.tokens.insert(token.clone(), creds.email);
                Ok(json!({ "token": token }))
            }
            (Method::GET, ["users", "me"]) => match &request.bearer {
                Some(token) => {
                    let email = state.tokens.get(token).cloned().ok_or((401, "bad token"))?;
                    let id = state.accounts.get(&email).map(|(_, id)| id.clone());
                    Ok(json!({ "data": { "_id": id, "email": email } }))
                }
                None => Ok(serde_json::to_value(&me).expect("profile")),
            },
            (Method::PATCH, ["users", "me"]) => {
                let update: ProfileUpdate = serde_json::from_value(body).map_err(|_| (400, "bad body"))?;
                state.profile.name = update.name;
                state.profile.about = update.about;
                Ok(serde_json::to_value(&state.profile).expect("profile"))
            }
            (Method::PATCH, ["users", "me", "avatar"]) => {
                let update: AvatarUpdate = serde_json::from_value(body).map_err(|_| (400, "bad body"))?;
                state.profile.avatar_url = update.avatar_url;
                Ok(serde_json::to_value(&state.profile).expect("profile"))
            }
            (Method::GET, ["cards"]) => Ok(serde_json::to_value(&state.photos).expect("photos")),
            (Method::POST, ["cards"]) => {
                let new: NewPhoto = serde_json::from_value(body).map_err(|_| (400, "bad body"))?;
                let created = Photo {
                    id: PhotoId::new(format!("photo-{}", state.next_id)),
                    name: new.name,
                    image_url: new.image_url,
                    owner: me,
                    liked_by: Vec::new(),
                    created_at: None,
                };
                state.next_id += 1;
                state.photos.insert(0, created.clone());
                Ok(serde_json::to_value(&created).expect("photo"))
            }
            (Method::DELETE, ["cards", id]) => {
                let before = state.photos.len();
                state.photos.retain(|photo| photo.id.as_str() != *id);
                if state.photos.len() == before {
                    return Err((404, "no such card"));
                }
                Ok(json!({ "message": "deleted" }))
            }
            (method @ (Method::PUT | Method::DELETE), ["cards", id, "likes"]) => {
                let photo = state
                    .photos
                    .iter_mut()
                    .find(|photo| photo.id.as_str() == *id)
                    .ok_or((404, "no such card"))?;
                photo.liked_by.retain(|user| user.id != me.id);
                if method == Method::PUT {
                    photo.liked_by.push(me);
                }
                Ok(serde_json::to_value(&*photo).expect("photo"))
            }
            _ => Err((404, "no such route")),
        }
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        self.calls.lock().expect("calls").push(request.clone());
        self.handle(&request).map_err(|(status, message)| {
            ClientError::Http(HttpError {
                status,
                method: request.method.clone(),
                url: request.path.clone(),
                message: Some(message.to_string()),
            })
        })
    }
}

pub fn memory_sessions() -> (Arc<MemoryStore>, Arc<SessionStore>) {
    let backing = Arc::new(MemoryStore::new());
    let sessions = Arc::new(SessionStore::new(backing.clone()));
    (backing, sessions)
}
