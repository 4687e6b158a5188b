//! Tabular export of selected records.
//!
//! `export_rows` turns any slice of exportable records into a header row
//! followed by one row of field values per record. Rendering (CSV, JSON) is
//! left to the caller.

use crate::domain::mentoring::{Mentee, Mentor};
use crate::domain::teams::Membership;
use crate::domain::votes::DecisionResults;

/// A record that can be flattened into a row of strings.
pub trait ExportRow {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

pub fn export_rows<T: ExportRow>(records: &[T]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(T::headers().into_iter().map(String::from).collect());
    rows.extend(records.iter().map(ExportRow::row));
    rows
}

impl ExportRow for Mentor {
    fn headers() -> Vec<&'static str> {
        vec!["nickname", "first_name", "last_name", "email", "phone", "program_id", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.nickname.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.program_id.to_string(),
            self.created_at.as_datetime().to_rfc3339(),
        ]
    }
}

impl ExportRow for Mentee {
    fn headers() -> Vec<&'static str> {
        vec!["first_name", "last_name", "email", "program_id", "mentor_id", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.program_id.to_string(),
            self.mentor_id.to_string(),
            self.created_at.as_datetime().to_rfc3339(),
        ]
    }
}

impl ExportRow for Membership {
    fn headers() -> Vec<&'static str> {
        vec!["team_id", "user_id", "invitation_id", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.team_id.to_string(),
            self.user_id.to_string(),
            self.invitation_id.map(|id| id.to_string()).unwrap_or_default(),
            self.created_at.as_datetime().to_rfc3339(),
        ]
    }
}

impl ExportRow for DecisionResults {
    fn headers() -> Vec<&'static str> {
        vec!["decision_id", "subject", "options", "votes_cast", "eligible_voters"]
    }

    /// Options are joined as `text=count` pairs.
    fn row(&self) -> Vec<String> {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| format!("{}={}", o.text, o.votes))
            .collect();
        vec![
            self.decision_id.to_string(),
            self.subject.clone(),
            options.join(";"),
            self.votes_cast.to_string(),
            self.eligible_voters.to_string(),
        ]
    }
}
