//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::export::ExportHandler;
use crate::application::handlers::mentoring::{
    DeleteMentorHandler, ListFacultiesHandler, ListMentorNicknamesHandler, ListProgramsHandler,
    MentoringSettings, RegisterMenteeHandler, RegisterMentorHandler,
};
use crate::application::handlers::teams::{
    ChangePasswordHandler, IssueInvitationHandler, ListFriendsHandler, ListTeamsHandler, ListVisibleInvitationsHandler,
    LoginHandler, RedeemInvitationHandler, RegisterAccountHandler,
};
use crate::application::handlers::votes::{
    CastVoteHandler, CreateDecisionHandler, GetDecisionHandler, GetResultsHandler,
    ListClosedDecisionsHandler, ListOpenDecisionsHandler, ListOwnedDecisionsHandler,
};
use crate::ports::{
    CredentialHasher, DecisionRepository, FacultyRepository, InvitationRepository, Mailer,
    MembershipRepository, MenteeRepository, MentorRepository, SessionIssuer, SessionValidator,
    TeamRepository, TokenSigner, UserRepository, VoteLedger,
};

/// Dependencies shared by all routes.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub decisions: Arc<dyn DecisionRepository>,
    pub ledger: Arc<dyn VoteLedger>,
    pub faculties: Arc<dyn FacultyRepository>,
    pub mentors: Arc<dyn MentorRepository>,
    pub mentees: Arc<dyn MenteeRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub deletion_signer: Arc<dyn TokenSigner>,
    /// Email domain required for account registration.
    pub allowed_email_domain: String,
    /// Prefix for invitation links, without trailing slash.
    pub public_base_url: String,
    pub mentoring: MentoringSettings,
}

impl AppState {
    // Votes

    pub fn create_decision_handler(&self) -> CreateDecisionHandler {
        CreateDecisionHandler::new(self.decisions.clone(), self.users.clone())
    }

    pub fn cast_vote_handler(&self) -> CastVoteHandler {
        CastVoteHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    pub fn list_open_decisions_handler(&self) -> ListOpenDecisionsHandler {
        ListOpenDecisionsHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    pub fn list_owned_decisions_handler(&self) -> ListOwnedDecisionsHandler {
        ListOwnedDecisionsHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    pub fn list_closed_decisions_handler(&self) -> ListClosedDecisionsHandler {
        ListClosedDecisionsHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    pub fn get_decision_handler(&self) -> GetDecisionHandler {
        GetDecisionHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    pub fn get_results_handler(&self) -> GetResultsHandler {
        GetResultsHandler::new(self.decisions.clone(), self.ledger.clone())
    }

    // Teams and accounts

    pub fn list_teams_handler(&self) -> ListTeamsHandler {
        ListTeamsHandler::new(self.teams.clone())
    }

    pub fn list_invitations_handler(&self) -> ListVisibleInvitationsHandler {
        ListVisibleInvitationsHandler::new(self.invitations.clone(), self.memberships.clone())
    }

    pub fn list_friends_handler(&self) -> ListFriendsHandler {
        ListFriendsHandler::new(self.users.clone())
    }

    pub fn issue_invitation_handler(&self) -> IssueInvitationHandler {
        IssueInvitationHandler::new(
            self.invitations.clone(),
            self.memberships.clone(),
            self.teams.clone(),
        )
    }

    pub fn redeem_invitation_handler(&self) -> RedeemInvitationHandler {
        RedeemInvitationHandler::new(self.invitations.clone(), self.memberships.clone())
    }

    pub fn register_account_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(
            self.users.clone(),
            self.invitations.clone(),
            self.hasher.clone(),
            self.mailer.clone(),
            self.allowed_email_domain.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.session_issuer.clone(),
        )
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.hasher.clone())
    }

    /// Link a new member follows to redeem or register with `token`.
    pub fn invitation_link(&self, token: &str) -> String {
        format!(
            "{}/votes/registration/?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }

    // Mentoring

    pub fn list_faculties_handler(&self) -> ListFacultiesHandler {
        ListFacultiesHandler::new(self.faculties.clone())
    }

    pub fn list_programs_handler(&self) -> ListProgramsHandler {
        ListProgramsHandler::new(self.faculties.clone())
    }

    pub fn list_mentor_nicknames_handler(&self) -> ListMentorNicknamesHandler {
        ListMentorNicknamesHandler::new(self.faculties.clone(), self.mentors.clone())
    }

    pub fn register_mentor_handler(&self) -> RegisterMentorHandler {
        RegisterMentorHandler::new(
            self.faculties.clone(),
            self.mentors.clone(),
            self.deletion_signer.clone(),
            self.mailer.clone(),
            self.mentoring.clone(),
        )
    }

    pub fn register_mentee_handler(&self) -> RegisterMenteeHandler {
        RegisterMenteeHandler::new(
            self.faculties.clone(),
            self.mentors.clone(),
            self.mentees.clone(),
            self.mailer.clone(),
            self.mentoring.clone(),
        )
    }

    pub fn delete_mentor_handler(&self) -> DeleteMentorHandler {
        DeleteMentorHandler::new(self.mentors.clone(), self.deletion_signer.clone())
    }

    // Admin

    pub fn export_handler(&self) -> ExportHandler {
        ExportHandler::new(
            self.mentors.clone(),
            self.mentees.clone(),
            self.memberships.clone(),
            self.decisions.clone(),
            self.ledger.clone(),
        )
    }
}
