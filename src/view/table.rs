use std::fmt::Write;

use super::PageWindow;
use crate::domain::{Referral, ReferralField};
use crate::store::ReferralsState;

const HEADERS: [&str; 6] = ["ID", "Given Name", "Surname", "Email", "Phone", "Status"];

fn row(referral: &Referral) -> [String; 6] {
    [
        referral.id.to_string(),
        referral.given_name.clone(),
        referral.surname.clone(),
        referral.email.clone(),
        referral.phone.clone(),
        referral.status.to_string(),
    ]
}

/// Render the slice as an aligned table with a page footer.
pub fn render_table(state: &ReferralsState) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading...\n");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {error}");
    }

    if state.referrals.is_empty() {
        out.push_str("No referrals found\n");
    } else {
        let rows: Vec<[String; 6]> = state.referrals.iter().map(row).collect();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        push_line(&mut out, &HEADERS.map(str::to_string), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("  "));
        for cells in &rows {
            push_line(&mut out, cells, &widths);
        }
    }

    let window = PageWindow::new(&state.pagination);
    let _ = writeln!(
        out,
        "Page {} of {} ({} total)",
        window.current_page, window.total_pages, state.pagination.total
    );
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Render every field of one referral, one labelled line each.
pub fn render_detail(referral: &Referral) -> String {
    let value = |field: ReferralField| -> String {
        match field {
            ReferralField::GivenName => referral.given_name.clone(),
            ReferralField::Surname => referral.surname.clone(),
            ReferralField::Email => referral.email.clone(),
            ReferralField::Phone => referral.phone.clone(),
            ReferralField::HomeNameOrNumber => referral.home_name_or_number.clone(),
            ReferralField::Street => referral.street.clone(),
            ReferralField::Suburb => referral.suburb.clone(),
            ReferralField::State => referral.state.clone(),
            ReferralField::Postcode => referral.postcode.clone(),
            ReferralField::Country => referral.country.clone(),
            ReferralField::Status => referral.status.to_string(),
            ReferralField::Notes => referral.notes.clone().unwrap_or_default(),
            ReferralField::ReferredBy => referral.referred_by.clone().unwrap_or_default(),
        }
    };

    let label_width = ReferralField::all()
        .map(|f| f.json_name().len())
        .chain(["createdAt".len(), "id".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:<label_width$}  {}", "id", referral.id);
    for field in ReferralField::all() {
        let _ = writeln!(
            out,
            "{:<label_width$}  {}",
            field.json_name(),
            value(field)
        );
    }
    let _ = writeln!(out, "{:<label_width$}  {}", "createdAt", referral.created_at);
    let _ = writeln!(out, "{:<label_width$}  {}", "updatedAt", referral.updated_at);
    out
}
