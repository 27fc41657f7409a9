//! Member model

use serde::{Deserialize, Serialize};

use super::identity::Rut;

/// A registered library member. The identity is fixed for the lifetime of
/// the record; only the name may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub identity: Rut,
    pub name: String,
}

impl Member {
    pub fn new(name: String, identity: Rut) -> Self {
        Self { identity, name }
    }
}
