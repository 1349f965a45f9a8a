//! 会话存储模块
//!
//! Holds the signed-in identity, mirrors it into a key/value backend so it
//! survives reloads, and tells subscribers whenever it changes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use storerate_shared::{Role, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session, User};

/// Minimal string storage contract (browser `localStorage` or memory).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns `false` when the backend refused the write.
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// Storage that lives only as long as the process.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(Option<&Session>)>;

struct Inner {
    storage: Box<dyn KeyValueStorage>,
    current: RefCell<Option<Session>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

/// Shared handle to the current session.
///
/// Clones point at the same state. Every change replaces the whole session
/// in one step and then notifies listeners, so a listener never observes a
/// token without its user.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Loads whatever session the backend holds. A token without a readable
    /// user record is treated as no session, and both keys are wiped.
    pub fn restore(storage: impl KeyValueStorage + 'static) -> Self {
        let current = load(&storage);
        match &current {
            Some(session) => tracing::info!(user_id = session.user.id, "session restored"),
            None => tracing::debug!("no persisted session"),
        }
        Self {
            inner: Rc::new(Inner {
                storage: Box::new(storage),
                current: RefCell::new(current),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.inner.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.current.borrow().as_ref().map(Session::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_store_owner(&self) -> bool {
        self.role() == Some(Role::StoreOwner)
    }

    /// Installs a new session, overwriting any previous one.
    pub fn establish(&self, session: Session) {
        self.persist(&session);
        tracing::info!(user_id = session.user.id, role = session.user.role.as_str(), "session established");
        self.inner.current.replace(Some(session));
        self.notify();
    }

    /// Swaps in a fresh copy of the signed-in user, keeping the token.
    /// Returns `false` when nobody is signed in.
    pub fn update_user(&self, user: User) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        let session = Session { token, user };
        self.persist(&session);
        self.inner.current.replace(Some(session));
        self.notify();
        true
    }

    /// Drops the session. Safe to call repeatedly; listeners only hear about
    /// an actual change. Returns whether a session was present.
    pub fn clear(&self) -> bool {
        let had_session = self.inner.current.replace(None).is_some();
        self.inner.storage.delete(STORAGE_TOKEN_KEY);
        self.inner.storage.delete(STORAGE_USER_KEY);
        if had_session {
            tracing::info!("session cleared");
            self.notify();
        }
        had_session
    }

    pub fn subscribe(&self, listener: impl Fn(Option<&Session>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    fn persist(&self, session: &Session) {
        let storage = &self.inner.storage;
        match serde_json::to_string(&session.user) {
            Ok(user_json) => {
                let stored = storage.set(STORAGE_TOKEN_KEY, &session.token)
                    && storage.set(STORAGE_USER_KEY, &user_json);
                if !stored {
                    tracing::warn!("session storage rejected the write; session kept in memory only");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not serialize user for storage"),
        }
    }

    fn notify(&self) {
        let snapshot = self.current();
        // Listeners run without any borrow held so they may read or even
        // mutate the store.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(snapshot.as_ref());
        }
    }
}

fn load(storage: &dyn KeyValueStorage) -> Option<Session> {
    let token = storage.get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty());
    let user_json = storage.get(STORAGE_USER_KEY);

    let (Some(token), Some(user_json)) = (token, user_json) else {
        storage.delete(STORAGE_TOKEN_KEY);
        storage.delete(STORAGE_USER_KEY);
        return None;
    };

    match serde_json::from_str::<User>(&user_json) {
        Ok(user) => Some(Session { token, user }),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable persisted user");
            storage.delete(STORAGE_TOKEN_KEY);
            storage.delete(STORAGE_USER_KEY);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn user(id: i64, role: Role) -> User {
        User {
            id,
            name: "Alexandra Montgomery-Smith".to_string(),
            email: "a@b.com".to_string(),
            address: None,
            role,
            created_at: None,
        }
    }

    pub fn session(role: Role) -> Session {
        Session {
            token: "tok-1".to_string(),
            user: user(1, role),
        }
    }

    #[test]
    fn empty_storage_restores_signed_out() {
        let store = SessionStore::restore(MemoryStorage::new());
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn establish_persists_and_survives_reload() {
        let storage = MemoryStorage::new();
        let store = SessionStore::restore(storage.clone());
        store.establish(session(Role::StoreOwner));

        assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("tok-1"));
        let reloaded = SessionStore::restore(storage);
        assert_eq!(reloaded.current(), Some(session(Role::StoreOwner)));
        assert!(reloaded.is_store_owner());
        assert!(!reloaded.is_admin());
    }

    #[test]
    fn corrupt_user_record_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        storage.set(STORAGE_USER_KEY, "{not json");

        let store = SessionStore::restore(storage.clone());
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
        assert_eq!(storage.get(STORAGE_USER_KEY), None);
    }

    #[test]
    fn token_without_user_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        assert!(!SessionStore::restore(storage.clone()).is_authenticated());
        assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
    }

    #[test]
    fn clear_is_idempotent_and_notifies_once() {
        let storage = MemoryStorage::new();
        let store = SessionStore::restore(storage.clone());
        store.establish(session(Role::User));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s| sink.borrow_mut().push(s.is_some()));

        assert!(store.clear());
        assert!(!store.clear());
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn relogin_overwrites_previous_session() {
        let store = SessionStore::restore(MemoryStorage::new());
        store.establish(session(Role::User));
        store.establish(Session {
            token: "tok-2".to_string(),
            user: user(2, Role::Admin),
        });
        assert_eq!(store.token().as_deref(), Some("tok-2"));
        assert_eq!(store.role(), Some(Role::Admin));
    }

    #[test]
    fn update_user_keeps_token() {
        let store = SessionStore::restore(MemoryStorage::new());
        assert!(!store.update_user(user(1, Role::User)));

        store.establish(session(Role::User));
        let mut fresh = user(1, Role::User);
        fresh.address = Some("1 Main St".to_string());
        assert!(store.update_user(fresh.clone()));
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.user(), Some(fresh));
    }

    #[test]
    fn unsubscribed_listeners_stay_quiet() {
        let store = SessionStore::restore(MemoryStorage::new());
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.establish(session(Role::User));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.clear();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn listeners_may_read_the_store() {
        let store = SessionStore::restore(MemoryStorage::new());
        let observed = Rc::new(RefCell::new(None));
        let (probe, sink) = (store.clone(), observed.clone());
        store.subscribe(move |_| *sink.borrow_mut() = probe.role());
        store.establish(session(Role::Admin));
        assert_eq!(*observed.borrow(), Some(Role::Admin));
    }
}
