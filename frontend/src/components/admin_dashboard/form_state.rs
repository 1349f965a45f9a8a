//! 表单状态管理模块
//!
//! Groups the input signals of the admin create forms so they can be passed
//! to child components as one `Copy` value, reset in one call and turned
//! into the shared form types for validation.

use leptos::prelude::*;
use storerate_shared::Role;
use storerate_shared::validation::{CreateStoreForm, CreateUserForm, Field, ValidationErrors};

/// Field error lookup shared by both forms.
fn field_error(errors: RwSignal<ValidationErrors>, field: Field) -> Signal<Option<&'static str>> {
    Signal::derive(move || errors.with(|e| e.get(field)))
}

/// 新建用户表单状态
#[derive(Clone, Copy)]
pub struct UserFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub address: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role: RwSignal<Option<Role>>,
    pub errors: RwSignal<ValidationErrors>,
}

impl UserFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            role: RwSignal::new(None),
            errors: RwSignal::new(ValidationErrors::new()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.address.set(String::new());
        self.password.set(String::new());
        self.role.set(None);
        self.errors.set(ValidationErrors::new());
    }

    pub fn to_form(&self) -> CreateUserForm {
        CreateUserForm {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            address: self.address.get_untracked(),
            password: self.password.get_untracked(),
            role: self.role.get_untracked(),
        }
    }

    pub fn error(&self, field: Field) -> Signal<Option<&'static str>> {
        field_error(self.errors, field)
    }
}

impl Default for UserFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 新建商店表单状态
#[derive(Clone, Copy)]
pub struct StoreFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub address: RwSignal<String>,
    pub owner_id: RwSignal<String>,
    pub errors: RwSignal<ValidationErrors>,
}

impl StoreFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            owner_id: RwSignal::new(String::new()),
            errors: RwSignal::new(ValidationErrors::new()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.address.set(String::new());
        self.owner_id.set(String::new());
        self.errors.set(ValidationErrors::new());
    }

    pub fn to_form(&self) -> CreateStoreForm {
        CreateStoreForm {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            address: self.address.get_untracked(),
            owner_id: self.owner_id.get_untracked(),
        }
    }

    pub fn error(&self, field: Field) -> Signal<Option<&'static str>> {
        field_error(self.errors, field)
    }
}

impl Default for StoreFormState {
    fn default() -> Self {
        Self::new()
    }
}
