//! Static directory of assignable users.

use crate::model::user::User;

/// Read-only list of users the assignee picker offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(vec![
            User::new("u1", "Alice Johnson").with_email("alice@example.com"),
            User::new("u2", "Bogdan Petrov").with_email("bogdan@example.com"),
            User::new("u3", "Chen Li").with_email("chen@example.com"),
            User::new("u4", "Daria Sokolova").with_email("daria@example.com"),
        ])
    }
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        let user_id = user_id.trim();
        self.users.iter().find(|user| user.id == user_id)
    }
}
