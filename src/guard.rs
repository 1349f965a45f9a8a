use storerate_shared::Role;

/// Outcome of checking a session against a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToUnauthorized,
}

/// **核心守卫逻辑**
///
/// An empty `required` set admits any signed-in role.
pub fn evaluate(required: &[Role], role: Option<Role>) -> Access {
    match role {
        None => Access::RedirectToLogin,
        Some(role) if required.is_empty() || required.contains(&role) => Access::Granted,
        Some(_) => Access::RedirectToUnauthorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_session_goes_to_login() {
        assert_eq!(evaluate(&[], None), Access::RedirectToLogin);
        assert_eq!(evaluate(&[Role::Admin], None), Access::RedirectToLogin);
    }

    #[test]
    fn empty_requirement_admits_every_role() {
        for role in Role::ALL {
            assert_eq!(evaluate(&[], Some(role)), Access::Granted);
        }
    }

    #[test]
    fn renders_iff_role_is_listed() {
        let required = [Role::Admin, Role::StoreOwner];
        for role in Role::ALL {
            let expected = if required.contains(&role) {
                Access::Granted
            } else {
                Access::RedirectToUnauthorized
            };
            assert_eq!(evaluate(&required, Some(role)), expected);
        }
    }
}
