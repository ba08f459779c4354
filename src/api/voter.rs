use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        address::{Address, AddressError},
        api::{NewProposal, ProposalCreated},
        auth::{AuthToken, VoterUser},
        workflow::{ProposalId, Session, Voter},
    },
};

pub fn routes() -> Vec<Route> {
    routes![register_proposal, vote, runoff_vote, get_voter]
}

/// Guard for routes open to registered voters.
pub type VoterToken = Result<AuthToken<VoterUser>>;

#[post("/voter/proposals", data = "<proposal>", format = "json")]
pub async fn register_proposal(
    token: VoterToken,
    proposal: Json<NewProposal>,
    session: &State<Session>,
) -> Result<Json<ProposalCreated>> {
    let token = token?;
    let proposal_id = session
        .lock()
        .await
        .register_proposal(token.address(), proposal.into_inner().description)?;
    Ok(Json(ProposalCreated { proposal_id }))
}

#[post("/voter/votes/<proposal_id>")]
pub async fn vote(
    token: VoterToken,
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<()> {
    let token = token?;
    session.lock().await.vote(token.address(), proposal_id)?;
    Ok(())
}

/// Vote again, restricted to the proposals tied in the first round.
#[post("/voter/runoff/votes/<proposal_id>")]
pub async fn runoff_vote(
    token: VoterToken,
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<()> {
    let token = token?;
    session
        .lock()
        .await
        .runoff_vote(token.address(), proposal_id)?;
    Ok(())
}

#[get("/voter/voters/<address>")]
pub async fn get_voter(
    token: VoterToken,
    address: std::result::Result<Address, AddressError>,
    session: &State<Session>,
) -> Result<Json<Voter>> {
    let token = token?;
    let address = address?;
    let voter = session.lock().await.voter(token.address(), &address)?;
    Ok(Json(voter))
}
