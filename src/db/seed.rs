use super::{DatabaseError, ReferralRepository};
use crate::domain::{NewReferral, Referral, ReferralStatus};

#[allow(clippy::too_many_arguments)]
fn sample(
    given_name: &str,
    surname: &str,
    email: &str,
    phone: &str,
    home_name_or_number: &str,
    street: &str,
    suburb: &str,
    state: &str,
    postcode: &str,
    status: ReferralStatus,
    notes: &str,
    referred_by: &str,
) -> NewReferral {
    NewReferral {
        given_name: given_name.into(),
        surname: surname.into(),
        email: email.into(),
        phone: phone.into(),
        home_name_or_number: home_name_or_number.into(),
        street: street.into(),
        suburb: suburb.into(),
        state: state.into(),
        postcode: postcode.into(),
        country: "Australia".into(),
        status,
        notes: Some(notes.into()),
        referred_by: Some(referred_by.into()),
    }
}

/// Demo data: one referral per status, plus a house name in place of a number.
pub fn sample_referrals() -> Vec<NewReferral> {
    vec![
        sample(
            "John",
            "Smith",
            "john.smith@example.com",
            "+61412345678",
            "123",
            "Collins Street",
            "Melbourne",
            "Victoria",
            "3000",
            ReferralStatus::Pending,
            "Interested in web development course",
            "Sarah Johnson",
        ),
        sample(
            "Maria",
            "Garcia",
            "maria.garcia@gmail.com",
            "+61498765432",
            "Unit 5/78",
            "George Street",
            "Sydney",
            "New South Wales",
            "2000",
            ReferralStatus::Contacted,
            "Called on Monday, very enthusiastic",
            "Mike Wilson",
        ),
        sample(
            "David",
            "Chen",
            "david.chen@outlook.com",
            "+61487654321",
            "Greenwood",
            "Oak Avenue",
            "Brisbane",
            "Queensland",
            "4000",
            ReferralStatus::Completed,
            "Successfully enrolled in JavaScript course",
            "Online Form",
        ),
        sample(
            "Emma",
            "Wilson",
            "emma.wilson@yahoo.com",
            "+61456789123",
            "456",
            "High Street",
            "Perth",
            "Western Australia",
            "6000",
            ReferralStatus::Declined,
            "Not interested at this time, maybe next year",
            "James Brown",
        ),
        sample(
            "Robert",
            "Taylor",
            "rob.taylor@icloud.com",
            "+61423456789",
            "The Manor",
            "Victoria Road",
            "Adelaide",
            "South Australia",
            "5000",
            ReferralStatus::Pending,
            "Referral from LinkedIn connection",
            "Lisa White",
        ),
    ]
}

/// Replace every referral with the sample set. Returns the inserted rows.
pub fn seed(repository: &ReferralRepository) -> Result<Vec<Referral>, DatabaseError> {
    let removed = repository.clear()?;
    tracing::info!(removed, "Cleared referrals");

    sample_referrals()
        .iter()
        .map(|referral| repository.insert(referral))
        .collect()
}
