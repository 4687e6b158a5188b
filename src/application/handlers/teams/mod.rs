//! Teams application handlers.

mod change_password;
mod issue_invitation;
mod login;
mod queries;
mod redeem_invitation;
mod register_account;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use issue_invitation::{IssueInvitationCommand, IssueInvitationHandler, MAX_TOKEN_ATTEMPTS};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use queries::{ListFriendsHandler, ListTeamsHandler, ListVisibleInvitationsHandler};
pub use redeem_invitation::{RedeemInvitationCommand, RedeemInvitationHandler, RedeemInvitationResult};
pub use register_account::{RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult};
