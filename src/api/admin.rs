use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        address::{Address, AddressError},
        api::{PhaseChange, ProposalDescription},
        auth::{AdminUser, AuthToken},
        workflow::{ProposalId, Session},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        register_voter,
        revoke_voter,
        start_proposals_registration,
        end_proposals_registration,
        start_voting_session,
        end_voting_session,
        end_runoff_voting_session,
        delete_proposal,
        tally_votes,
        decide_tie,
    ]
}

/// Guard for administrator-only routes.
pub type AdminToken = Result<AuthToken<AdminUser>>;

#[post("/admin/voters/<address>")]
pub async fn register_voter(
    token: AdminToken,
    address: std::result::Result<Address, AddressError>,
    session: &State<Session>,
) -> Result<()> {
    let token = token?;
    let address = address?;
    session
        .lock()
        .await
        .register_voter(token.address(), address)?;
    Ok(())
}

#[delete("/admin/voters/<address>")]
pub async fn revoke_voter(
    token: AdminToken,
    address: std::result::Result<Address, AddressError>,
    session: &State<Session>,
) -> Result<()> {
    let token = token?;
    let address = address?;
    session.lock().await.revoke_voter(token.address(), address)?;
    Ok(())
}

#[post("/admin/workflow/proposals/start")]
pub async fn start_proposals_registration(
    token: AdminToken,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let mut session = session.lock().await;
    session.start_proposals_registration(token.address())?;
    Ok(Json(PhaseChange {
        status: session.status(),
    }))
}

#[post("/admin/workflow/proposals/end")]
pub async fn end_proposals_registration(
    token: AdminToken,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let mut session = session.lock().await;
    session.end_proposals_registration(token.address())?;
    Ok(Json(PhaseChange {
        status: session.status(),
    }))
}

#[post("/admin/workflow/voting/start")]
pub async fn start_voting_session(
    token: AdminToken,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let mut session = session.lock().await;
    session.start_voting_session(token.address())?;
    Ok(Json(PhaseChange {
        status: session.status(),
    }))
}

#[post("/admin/workflow/voting/end")]
pub async fn end_voting_session(
    token: AdminToken,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let mut session = session.lock().await;
    session.end_voting_session(token.address())?;
    Ok(Json(PhaseChange {
        status: session.status(),
    }))
}

#[post("/admin/workflow/runoff/end")]
pub async fn end_runoff_voting_session(
    token: AdminToken,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let status = session
        .lock()
        .await
        .end_runoff_voting_session(token.address())?;
    Ok(Json(PhaseChange { status }))
}

/// Withdraw a proposal. Later proposals each move down one ID.
#[delete("/admin/proposals/<proposal_id>")]
pub async fn delete_proposal(
    token: AdminToken,
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<Json<ProposalDescription>> {
    let token = token?;
    let removed = session
        .lock()
        .await
        .delete_proposal(token.address(), proposal_id)?;
    Ok(Json(ProposalDescription::new(proposal_id, &removed)))
}

#[post("/admin/tally")]
pub async fn tally_votes(token: AdminToken, session: &State<Session>) -> Result<Json<PhaseChange>> {
    let token = token?;
    let status = session.lock().await.tally_votes(token.address())?;
    Ok(Json(PhaseChange { status }))
}

#[post("/admin/tie/<proposal_id>")]
pub async fn decide_tie(
    token: AdminToken,
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<Json<PhaseChange>> {
    let token = token?;
    let mut session = session.lock().await;
    session.decide_tie(token.address(), proposal_id)?;
    Ok(Json(PhaseChange {
        status: session.status(),
    }))
}
