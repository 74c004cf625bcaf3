//! Free-text filtering over users.

use crate::User;

/// Returns true if `user` matches the free-text `term`.
///
/// A blank term matches everyone. Otherwise the term is used verbatim and the
/// user matches when the name, the decimal age, the email, or any role name
/// contains it. Matching is case-sensitive.
#[must_use]
pub fn matches(user: &User, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }

    user.name.contains(term)
        || user.age.to_string().contains(term)
        || user.email.contains(term)
        || user.roles.iter().any(|role| role.name.contains(term))
}

/// Keeps the users matching `term`, preserving their order.
pub fn filter_users(users: Vec<User>, term: &str) -> Vec<User> {
    if term.trim().is_empty() {
        return users;
    }
    users.into_iter().filter(|u| matches(u, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, RoleId};

    fn alice() -> User {
        User::new("Alice", 34, "alice@example.com")
            .with_roles(vec![Role::new("Manager").with_id(RoleId(1))])
    }

    #[test]
    fn test_blank_term_matches_everyone() {
        let user = User::new("Bob", 20, "bob@example.com");
        assert!(matches(&user, ""));
        assert!(matches(&user, "   "));
        assert!(matches(&user, "\t\n"));
    }

    #[test]
    fn test_matches_each_field() {
        let user = alice();
        assert!(matches(&user, "lic"));
        assert!(matches(&user, "3"));
        assert!(matches(&user, "34"));
        assert!(matches(&user, "example.com"));
        assert!(matches(&user, "Mana"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let user = alice();
        assert!(!matches(&user, "alice@EXAMPLE"));
        assert!(!matches(&user, "manager"));
        assert!(matches(&user, "alice"));
    }

    #[test]
    fn test_term_is_not_trimmed() {
        let user = alice();
        assert!(!matches(&user, " Alice"));
    }

    #[test]
    fn test_user_without_roles_has_no_role_match() {
        let user = User::new("Carol", 50, "carol@example.com");
        assert!(!matches(&user, "Manager"));
        assert!(!matches(&user, "4"));
    }

    #[test]
    fn test_filter_users_preserves_order() {
        let users = vec![
            User::new("Ann", 20, "ann@a.io"),
            User::new("Ben", 30, "ben@b.io"),
            User::new("Anna", 40, "anna@a.io"),
        ];
        let names: Vec<String> = filter_users(users, "An")
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ann", "Anna"]);
    }
}
