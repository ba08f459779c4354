use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        api::{ProposalDescription, StatusDescription, VoteCount},
        pagination::{Paginated, Pagination},
        workflow::{LoggedEvent, ProposalId, Session, WinningSet, Winner},
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        status,
        proposals,
        proposal,
        proposal_votes,
        winners,
        winning_set,
        runoff_ballot,
        events,
    ]
}

#[get("/status")]
pub async fn status(session: &State<Session>) -> Json<StatusDescription> {
    let session = session.lock().await;
    Json(StatusDescription::from(&*session))
}

#[get("/proposals")]
pub async fn proposals(session: &State<Session>) -> Json<Vec<ProposalDescription>> {
    let session = session.lock().await;
    let proposals = session
        .proposals()
        .iter()
        .enumerate()
        .map(|(id, proposal)| ProposalDescription::new(id, proposal))
        .collect();
    Json(proposals)
}

#[get("/proposals/<proposal_id>")]
pub async fn proposal(
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<Json<ProposalDescription>> {
    let session = session.lock().await;
    let proposal = session.proposal(proposal_id)?;
    Ok(Json(ProposalDescription::new(proposal_id, proposal)))
}

#[get("/proposals/<proposal_id>/votes")]
pub async fn proposal_votes(
    proposal_id: ProposalId,
    session: &State<Session>,
) -> Result<Json<VoteCount>> {
    let vote_count = session.lock().await.vote_count_for_proposal(proposal_id)?;
    Ok(Json(VoteCount {
        proposal_id,
        vote_count,
    }))
}

/// The final result. While a runoff tie awaits the administrator this lists
/// every tied proposal.
#[get("/winners")]
pub async fn winners(session: &State<Session>) -> Result<Json<Vec<Winner>>> {
    let winners = session.lock().await.winners()?;
    Ok(Json(winners))
}

#[get("/winning-set")]
pub async fn winning_set(session: &State<Session>) -> Json<WinningSet> {
    Json(session.lock().await.winning_set().clone())
}

#[get("/runoff/ballot")]
pub async fn runoff_ballot(session: &State<Session>) -> Json<WinningSet> {
    Json(session.lock().await.runoff_ballot().clone())
}

/// The event log, oldest first.
#[get("/events")]
pub async fn events(
    pagination: Result<Pagination>,
    session: &State<Session>,
) -> Result<Json<Paginated<LoggedEvent>>> {
    let pagination = pagination?;
    let session = session.lock().await;
    let log = session.events();
    let items = log
        .page(pagination.skip(), pagination.page_size())
        .to_vec();
    Ok(Json(Paginated {
        pagination: pagination.result(log.len()),
        items,
    }))
}
