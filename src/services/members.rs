//! Member registration

use crate::{
    error::{AppError, AppResult},
    models::{identity::Rut, member::Member},
    repository::MemberStore,
    text,
};

/// Register a member. The name is normalized and validated; the identity
/// must not already be registered.
pub fn register_member(
    members: &mut impl MemberStore,
    name: &str,
    identity: Rut,
) -> AppResult<Member> {
    let name = text::normalize(name);
    text::validate_free_text(&name)?;

    if members.find_by_identity(&identity).is_some() {
        return Err(AppError::MemberAlreadyRegistered(identity.formatted()));
    }

    let member = Member::new(name, identity);
    members.add(member.clone());

    tracing::info!(member = %identity, "member registered");

    Ok(member)
}
