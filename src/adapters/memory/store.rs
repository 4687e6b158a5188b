//! In-memory implementation of the repository ports.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::accounts::User;
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, FacultyId, OptionId, TeamId, Timestamp, UserId,
};
use crate::domain::mentoring::{Faculty, Mentee, Mentor, Program};
use crate::domain::teams::{Invitation, Membership, Team};
use crate::domain::votes::{Decision, Vote};
use crate::ports::{
    DecisionRepository, FacultyRepository, InvitationRepository, MembershipRepository,
    MenteeRepository, MentorRepository, TeamRepository, UserRepository, VoteLedger,
};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, (User, String)>,
    teams: HashMap<TeamId, Team>,
    memberships: Vec<Membership>,
    invitations: Vec<Invitation>,
    decisions: HashMap<DecisionId, Decision>,
    votes: Vec<Vote>,
    faculties: HashMap<FacultyId, Faculty>,
    programs: Vec<Program>,
    mentors: Vec<Mentor>,
    mentees: Vec<Mentee>,
}

impl State {
    fn votes_of(&self, decision: &Decision) -> Vec<Vote> {
        self.votes
            .iter()
            .filter(|v| decision.option(&v.option_id).is_some())
            .cloned()
            .collect()
    }
}

/// Shared in-memory storage. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored votes.
    pub async fn vote_count(&self) -> usize {
        self.state.read().await.votes.len()
    }

    /// Marks an existing user as superuser.
    pub async fn promote(&self, user: &UserId) {
        if let Some((user, _)) = self.state.write().await.users.get_mut(user) {
            user.is_superuser = true;
        }
    }
}

fn sorted_by_name(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| {
        (a.first_name.as_str(), a.last_name.as_str()).cmp(&(b.first_name.as_str(), b.last_name.as_str()))
    });
    users
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &User, password_hash: &str) -> Result<(), DomainError> {
        self.save_with_memberships(user, password_hash, &[]).await
    }

    async fn save_with_memberships(
        &self,
        user: &User,
        password_hash: &str,
        memberships: &[Membership],
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::conflict("username", "username already taken"));
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        for membership in memberships {
            let exists = state
                .memberships
                .iter()
                .any(|m| m.team_id == membership.team_id && m.user_id == membership.user_id);
            if !exists {
                state.memberships.push(membership.clone());
            }
        }
        Ok(())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let (_, hash) = state
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::NotFound, "User not found"))?;
        *hash = password_hash.to_string();
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|(u, _)| u.clone()))
            .collect())
    }

    async fn friends_of(&self, user: &UserId) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        let teams: HashSet<TeamId> = state
            .memberships
            .iter()
            .filter(|m| &m.user_id == user)
            .map(|m| m.team_id)
            .collect();
        let members: HashSet<UserId> = state
            .memberships
            .iter()
            .filter(|m| teams.contains(&m.team_id))
            .map(|m| m.user_id)
            .collect();
        let friends = members
            .iter()
            .filter_map(|id| state.users.get(id).map(|(u, _)| u.clone()))
            .collect();
        Ok(sorted_by_name(friends))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn save(&self, team: &Team) -> Result<(), DomainError> {
        self.state.write().await.teams.insert(team.id, team.clone());
        Ok(())
    }

    async fn find_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let state = self.state.read().await;
        Ok(ids.iter().filter_map(|id| state.teams.get(id).cloned()).collect())
    }

    async fn list_all(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self.state.read().await.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn add_if_absent(&self, membership: &Membership) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let exists = state
            .memberships
            .iter()
            .any(|m| m.team_id == membership.team_id && m.user_id == membership.user_id);
        if exists {
            return Ok(false);
        }
        state.memberships.push(membership.clone());
        Ok(true)
    }

    async fn team_ids_of(&self, user: &UserId) -> Result<Vec<TeamId>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .filter(|m| &m.user_id == user)
            .map(|m| m.team_id)
            .collect())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Membership>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .filter(|m| &m.user_id == user)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Membership>, DomainError> {
        Ok(self.state.read().await.memberships.clone())
    }
}

#[async_trait]
impl InvitationRepository for InMemoryStore {
    async fn save(&self, invitation: &Invitation) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.invitations.iter().any(|i| i.token == invitation.token) {
            return Err(DomainError::conflict("token", "invitation token already exists"));
        }
        state.invitations.push(invitation.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Invitation>, DomainError> {
        let state = self.state.read().await;
        Ok(state.invitations.iter().find(|i| i.token == token).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Invitation>, DomainError> {
        let mut invitations = self.state.read().await.invitations.clone();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }
}

#[async_trait]
impl DecisionRepository for InMemoryStore {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .decisions
            .insert(decision.id, decision.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        Ok(self.state.read().await.decisions.get(id).cloned())
    }

    async fn list_open_for(
        &self,
        user: &UserId,
        now: Timestamp,
    ) -> Result<Vec<Decision>, DomainError> {
        let state = self.state.read().await;
        let mut decisions: Vec<Decision> = state
            .decisions
            .values()
            .filter(|d| d.is_eligible(user) && d.end.is_after(&now))
            .cloned()
            .collect();
        decisions.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(decisions)
    }

    async fn list_authored_by(&self, user: &UserId) -> Result<Vec<Decision>, DomainError> {
        let state = self.state.read().await;
        let mut decisions: Vec<Decision> = state
            .decisions
            .values()
            .filter(|d| &d.author == user)
            .cloned()
            .collect();
        decisions.sort_by(|a, b| b.end.cmp(&a.end));
        Ok(decisions)
    }

    async fn list_closed(&self, now: Timestamp) -> Result<Vec<Decision>, DomainError> {
        let state = self.state.read().await;
        let mut decisions: Vec<Decision> = state
            .decisions
            .values()
            .filter(|d| d.end.is_before(&now))
            .cloned()
            .collect();
        decisions.sort_by(|a, b| b.end.cmp(&a.end));
        Ok(decisions)
    }

    async fn list_all(&self) -> Result<Vec<Decision>, DomainError> {
        let mut decisions: Vec<Decision> =
            self.state.read().await.decisions.values().cloned().collect();
        decisions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(decisions)
    }
}

#[async_trait]
impl VoteLedger for InMemoryStore {
    async fn votes_for_decision(&self, decision: &DecisionId) -> Result<Vec<Vote>, DomainError> {
        let state = self.state.read().await;
        match state.decisions.get(decision) {
            Some(d) => Ok(state.votes_of(d)),
            None => Ok(Vec::new()),
        }
    }

    async fn record(
        &self,
        decision: &Decision,
        user: &UserId,
        option: OptionId,
        now: Timestamp,
    ) -> Result<Vote, DomainError> {
        let mut state = self.state.write().await;
        let votes = state.votes_of(decision);
        let vote = decision.admit_vote(user, option, &votes, now)?;

        if state
            .votes
            .iter()
            .any(|v| v.user_id == vote.user_id && v.option_id == vote.option_id)
        {
            return Err(DomainError::new(ErrorCode::AlreadyVoted, "vote already recorded"));
        }
        state.votes.push(vote.clone());
        Ok(vote)
    }
}

#[async_trait]
impl FacultyRepository for InMemoryStore {
    async fn save_faculty(&self, faculty: &Faculty) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.faculties.values().any(|f| f.slug == faculty.slug && f.id != faculty.id) {
            return Err(DomainError::conflict("slug", "faculty slug already exists"));
        }
        state.faculties.insert(faculty.id, faculty.clone());
        Ok(())
    }

    async fn save_program(&self, program: &Program) -> Result<(), DomainError> {
        self.state.write().await.programs.push(program.clone());
        Ok(())
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>, DomainError> {
        let mut faculties: Vec<Faculty> =
            self.state.read().await.faculties.values().cloned().collect();
        faculties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(faculties)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Faculty>, DomainError> {
        let state = self.state.read().await;
        Ok(state.faculties.values().find(|f| f.slug == slug).cloned())
    }

    async fn programs_of(&self, faculty: &FacultyId) -> Result<Vec<Program>, DomainError> {
        let state = self.state.read().await;
        let mut programs: Vec<Program> = state
            .programs
            .iter()
            .filter(|p| &p.faculty_id == faculty)
            .cloned()
            .collect();
        programs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(programs)
    }
}

#[async_trait]
impl MentorRepository for InMemoryStore {
    async fn save(&self, mentor: &Mentor) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.mentors.iter().any(|m| m.email == mentor.email) {
            return Err(DomainError::conflict("email", "email already registered"));
        }
        if state.mentors.iter().any(|m| m.nickname == mentor.nickname) {
            return Err(DomainError::conflict("nickname", "nickname already taken"));
        }
        state.mentors.push(mentor.clone());
        Ok(())
    }

    async fn nicknames(&self) -> Result<HashSet<String>, DomainError> {
        let state = self.state.read().await;
        Ok(state.mentors.iter().map(|m| m.nickname.clone()).collect())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Mentor>, DomainError> {
        let state = self.state.read().await;
        Ok(state.mentors.iter().find(|m| m.nickname == nickname).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.state.read().await.mentors.iter().any(|m| m.email == email))
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let Some(position) = state.mentors.iter().position(|m| m.email == email) else {
            return Ok(false);
        };
        let mentor = state.mentors.remove(position);
        state.mentees.retain(|m| m.mentor_id != mentor.id);
        Ok(true)
    }

    async fn list_by_faculty(&self, faculty: &FacultyId) -> Result<Vec<Mentor>, DomainError> {
        let state = self.state.read().await;
        let mut mentors: Vec<Mentor> = state
            .mentors
            .iter()
            .filter(|m| &m.faculty_id == faculty)
            .cloned()
            .collect();
        mentors.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(mentors)
    }

    async fn list_all(&self) -> Result<Vec<Mentor>, DomainError> {
        Ok(self.state.read().await.mentors.clone())
    }
}

#[async_trait]
impl MenteeRepository for InMemoryStore {
    async fn save(&self, mentee: &Mentee) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.mentees.iter().any(|m| m.email == mentee.email) {
            return Err(DomainError::conflict("email", "email already registered"));
        }
        state.mentees.push(mentee.clone());
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.state.read().await.mentees.iter().any(|m| m.email == email))
    }

    async fn list_all(&self) -> Result<Vec<Mentee>, DomainError> {
        Ok(self.state.read().await.mentees.clone())
    }
}
