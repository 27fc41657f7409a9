//! In-memory member store

use indexmap::IndexMap;

use crate::models::{identity::Rut, member::Member};

/// Member store contract. Uniqueness of identities is enforced by the
/// registration flow, not here; `add` overwrites an existing record.
#[cfg_attr(test, mockall::automock)]
pub trait MemberStore {
    fn add(&mut self, member: Member);

    fn find_by_identity(&self, identity: &Rut) -> Option<Member>;

    /// Remove a member; true iff a record existed
    fn remove(&mut self, identity: &Rut) -> bool;

    /// Snapshot of all members in insertion order
    fn list_all(&self) -> Vec<Member>;
}

/// Member store keyed by identity
#[derive(Debug, Default)]
pub struct MemberRepository {
    members: IndexMap<Rut, Member>,
}

impl MemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl MemberStore for MemberRepository {
    fn add(&mut self, member: Member) {
        self.members.insert(member.identity, member);
    }

    fn find_by_identity(&self, identity: &Rut) -> Option<Member> {
        self.members.get(identity).cloned()
    }

    fn remove(&mut self, identity: &Rut) -> bool {
        self.members.shift_remove(identity).is_some()
    }

    fn list_all(&self) -> Vec<Member> {
        self.members.values().cloned().collect()
    }
}
