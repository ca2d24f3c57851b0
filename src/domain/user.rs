// src/domain/user.rs
use crate::domain::values::record_id;

record_id!(
    /// Account that authors articles and operates the admin screens.
    UserId,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_must_be_positive() {
        assert!(UserId::new(0).is_err());
        assert_eq!(i64::from(UserId::new(7).unwrap()), 7);
    }
}
