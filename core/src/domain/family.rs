//! Role-based permissions for family members

use shared::{FamilyMember, FamilyRole, PresenceStatus};

pub trait RolePermissions {
    /// Only admins may change budget limits
    fn can_modify_limits(&self) -> bool;
    fn can_invite(&self) -> bool;
    /// Every role may record transactions
    fn can_record(&self) -> bool;
    fn outranks(&self, other: FamilyRole) -> bool;
}

impl RolePermissions for FamilyRole {
    fn can_modify_limits(&self) -> bool {
        *self == FamilyRole::Admin
    }

    fn can_invite(&self) -> bool {
        *self == FamilyRole::Admin
    }

    fn can_record(&self) -> bool {
        true
    }

    fn outranks(&self, other: FamilyRole) -> bool {
        *self > other
    }
}

pub fn online_members(members: &[FamilyMember]) -> usize {
    members
        .iter()
        .filter(|m| m.status == PresenceStatus::Online)
        .count()
}
