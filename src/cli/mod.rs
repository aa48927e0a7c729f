//! Command-line surface of the `referrals` binary.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ReferralChanges, ReferralDraft, ReferralStatus};

pub use commands::run;

#[derive(Parser, Debug)]
#[command(name = "referrals")]
#[command(about = "Referral management service and client", version)]
pub struct Cli {
    /// Config file (default: the platform config dir, `referrals/config.toml`)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service until Ctrl-C or SIGTERM.
    Serve,

    /// Replace every referral in the database with sample data.
    Seed,

    /// List referrals, newest first.
    List(ListArgs),

    /// Show every field of one referral.
    Show {
        id: i64,
    },

    /// Create a referral.
    Add(FieldArgs),

    /// Update some fields of a referral.
    Edit(EditArgs),

    /// Delete a referral.
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only referrals with this status.
    #[arg(long)]
    pub status: Option<ReferralStatus>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    /// Rows per page (default: `client.page_size`).
    #[arg(long)]
    pub limit: Option<u64>,
}

/// Referral fields as flags. Unset flags are left out of the request.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub given_name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// House name or number.
    #[arg(long = "home")]
    pub home_name_or_number: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub suburb: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postcode: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// pending, contacted, completed or declined.
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub referred_by: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: i64,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Remove the stored notes.
    #[arg(long, conflicts_with = "notes")]
    pub clear_notes: bool,

    /// Remove the stored referrer.
    #[arg(long, conflicts_with = "referred_by")]
    pub clear_referred_by: bool,
}

impl From<FieldArgs> for ReferralDraft {
    fn from(args: FieldArgs) -> Self {
        Self {
            given_name: args.given_name,
            surname: args.surname,
            email: args.email,
            phone: args.phone,
            home_name_or_number: args.home_name_or_number,
            street: args.street,
            suburb: args.suburb,
            state: args.state,
            postcode: args.postcode,
            country: args.country,
            status: args.status,
            notes: args.notes,
            referred_by: args.referred_by,
        }
    }
}

impl EditArgs {
    pub fn changes(&self) -> ReferralChanges {
        let fields = self.fields.clone();
        let nullable = |value: Option<String>, clear: bool| {
            if clear {
                Some(None)
            } else {
                value.map(Some)
            }
        };

        ReferralChanges {
            given_name: fields.given_name,
            surname: fields.surname,
            email: fields.email,
            phone: fields.phone,
            home_name_or_number: fields.home_name_or_number,
            street: fields.street,
            suburb: fields.suburb,
            state: fields.state,
            postcode: fields.postcode,
            country: fields.country,
            status: fields.status,
            notes: nullable(fields.notes, self.clear_notes),
            referred_by: nullable(fields.referred_by, self.clear_referred_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_flags() {
        let cli = Cli::try_parse_from([
            "referrals", "list", "--status", "contacted", "--page", "2", "--limit", "10",
        ])
        .unwrap();
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.status, Some(ReferralStatus::Contacted));
                assert_eq!(args.page, 2);
                assert_eq!(args.limit, Some(10));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_status_filter() {
        assert!(Cli::try_parse_from(["referrals", "list", "--status", "archived"]).is_err());
    }

    #[test]
    fn add_builds_draft_from_set_flags_only() {
        let cli = Cli::try_parse_from([
            "referrals",
            "--config",
            "/tmp/referrals.toml",
            "add",
            "--given-name",
            "John",
            "--email",
            "john@example.com",
            "--home",
            "The Manor",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/referrals.toml")));
        let Command::Add(fields) = cli.command else {
            panic!("expected add");
        };
        let draft = ReferralDraft::from(fields);
        assert_eq!(draft.given_name.as_deref(), Some("John"));
        assert_eq!(draft.home_name_or_number.as_deref(), Some("The Manor"));
        assert_eq!(draft.surname, None);
    }

    #[test]
    fn edit_can_clear_nullable_fields() {
        let cli = Cli::try_parse_from([
            "referrals",
            "edit",
            "7",
            "--status",
            "completed",
            "--clear-notes",
        ])
        .unwrap();
        let Command::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, 7);
        let changes = args.changes();
        assert_eq!(changes.status.as_deref(), Some("completed"));
        assert_eq!(changes.notes, Some(None));
        assert_eq!(changes.referred_by, None);
    }

    #[test]
    fn clear_conflicts_with_value() {
        let result = Cli::try_parse_from([
            "referrals",
            "edit",
            "7",
            "--notes",
            "x",
            "--clear-notes",
        ]);
        assert!(result.is_err());
    }
}
