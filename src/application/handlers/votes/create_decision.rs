//! CreateDecisionHandler - Command handler for opening a new decision.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};
use crate::domain::votes::{Decision, DecisionDraft, VoterScope, VotesError};
use crate::ports::{DecisionRepository, UserRepository};

/// Command to create a decision with the default options.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    pub author: AuthenticatedUser,
    pub subject: String,
    pub voters: Vec<UserId>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub now: Timestamp,
}

/// Voters are limited to users sharing a team with the author. Superusers
/// may pick any stored user.
pub struct CreateDecisionHandler {
    decisions: Arc<dyn DecisionRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreateDecisionHandler {
    pub fn new(decisions: Arc<dyn DecisionRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { decisions, users }
    }

    pub async fn handle(&self, cmd: CreateDecisionCommand) -> Result<Decision, VotesError> {
        let scope = if cmd.author.is_superuser {
            let known = self.users.find_many(&cmd.voters).await?;
            VoterScope::Existing(known.into_iter().map(|u| u.id).collect())
        } else {
            let friends = self.users.friends_of(&cmd.author.id).await?;
            VoterScope::Restricted(friends.into_iter().map(|u| u.id).collect())
        };

        let draft = DecisionDraft {
            subject: cmd.subject,
            voters: cmd.voters,
            start: cmd.start,
            end: cmd.end,
        };
        let decision = Decision::create(draft, cmd.author.id, &scope, cmd.now)?;

        self.decisions.save(&decision).await?;

        tracing::info!(
            decision_id = %decision.id,
            author = %decision.author,
            voters = decision.voters.len(),
            "Decision created"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::accounts::User;
    use crate::domain::teams::{Membership, Team};
    use crate::ports::{MembershipRepository, TeamRepository};

    struct Fixture {
        store: InMemoryStore,
        handler: CreateDecisionHandler,
        author: User,
        teammate: User,
        stranger: User,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let author = User::new("Anna", "Autor", "anna", "anna@st.ovgu.de", now);
        let teammate = User::new("Tom", "Team", "tom", "tom@st.ovgu.de", now);
        let stranger = User::new("Sven", "Fremd", "sven", "sven@st.ovgu.de", now);
        for user in [&author, &teammate, &stranger] {
            UserRepository::save(&store, user, "hash").await.unwrap();
        }
        let team = Team::new("Fachschaftsrat", now);
        TeamRepository::save(&store, &team).await.unwrap();
        for user in [&author, &teammate] {
            store
                .add_if_absent(&Membership::new(team.id, user.id, None, now))
                .await
                .unwrap();
        }

        let handler = CreateDecisionHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));
        Fixture {
            store,
            handler,
            author,
            teammate,
            stranger,
        }
    }

    fn command(author: AuthenticatedUser, voters: Vec<UserId>, minutes: i64) -> CreateDecisionCommand {
        let now = Timestamp::now();
        CreateDecisionCommand {
            author,
            subject: "Budget 2025".to_string(),
            voters,
            start: now,
            end: now.plus_minutes(minutes),
            now,
        }
    }

    #[tokio::test]
    async fn teammates_can_be_voters() {
        let f = fixture().await;
        let cmd = command(f.author.as_actor(), vec![f.author.id, f.teammate.id], 60);

        let decision = f.handler.handle(cmd).await.unwrap();

        assert_eq!(decision.options.len(), 3);
        let stored = DecisionRepository::find_by_id(&f.store, &decision.id).await.unwrap();
        assert_eq!(stored, Some(decision));
    }

    #[tokio::test]
    async fn strangers_are_rejected_for_regular_authors() {
        let f = fixture().await;
        let cmd = command(f.author.as_actor(), vec![f.stranger.id], 60);

        match f.handler.handle(cmd).await {
            Err(VotesError::Validation(errors)) => assert!(errors.has_field("voters")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn superusers_may_pick_anyone() {
        let f = fixture().await;
        let mut actor = f.author.as_actor();
        actor.is_superuser = true;

        let result = f.handler.handle(command(actor, vec![f.stranger.id], 60)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn superusers_cannot_pick_unknown_users() {
        let f = fixture().await;
        let mut actor = f.author.as_actor();
        actor.is_superuser = true;
        let phantom = UserId::new();

        let result = f
            .handler
            .handle(command(actor, vec![f.stranger.id, phantom], 60))
            .await;

        match result {
            Err(VotesError::Validation(errors)) => assert!(errors.has_field("voters")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(DecisionRepository::list_all(&f.store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn short_window_is_rejected_and_nothing_is_stored() {
        let f = fixture().await;
        let cmd = command(f.author.as_actor(), vec![f.teammate.id], 10);

        assert!(matches!(f.handler.handle(cmd).await, Err(VotesError::Validation(_))));
        assert!(DecisionRepository::list_all(&f.store).await.unwrap().is_empty());
    }
}
