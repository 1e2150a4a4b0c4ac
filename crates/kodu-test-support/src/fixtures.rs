//! Sample records and bearer tokens.
//!
//! Tokens are signed with a throwaway key; clients never verify signatures,
//! so any key works.

use jsonwebtoken::{EncodingKey, Header, encode};
use kodu_api_models::{Assignment, Batch, PaymentOrder, Role, StudentProfile, User};
use serde_json::{Value, json};

/// Fixed clock used by expiry tests (2023-11-14T22:13:20Z).
pub const NOW: i64 = 1_700_000_000;

const SIGNING_KEY: &[u8] = b"kodu-test-signing-key";

fn sign(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .expect("fixture claims should encode")
}

/// Bearer token for `user_id` with `role` and no expiry.
///
/// # Panics
///
/// Never in practice; HS256 encoding of a JSON object cannot fail.
#[must_use]
pub fn token_for(user_id: &str, role: Role) -> String {
    sign(&json!({ "userId": user_id, "role": role.as_str(), "iat": NOW }))
}

/// Bearer token for `user_id` with `role` expiring at `exp`.
#[must_use]
pub fn token_with_exp(user_id: &str, role: Role, exp: i64) -> String {
    sign(&json!({ "userId": user_id, "role": role.as_str(), "iat": NOW, "exp": exp }))
}

/// Bearer token whose role the client does not know.
#[must_use]
pub fn token_with_unknown_role(user_id: &str) -> String {
    sign(&json!({ "userId": user_id, "role": "janitor" }))
}

/// Student with only id and name filled in.
#[must_use]
pub fn student(id: &str, name: &str) -> StudentProfile {
    StudentProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@kodu.test", name.to_ascii_lowercase()),
        role: Some(Role::Student),
        ..StudentProfile::default()
    }
}

/// Account awaiting admin approval.
#[must_use]
pub fn pending_user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@kodu.test", name.to_ascii_lowercase()),
        role: Some(Role::Trainer),
        status: None,
    }
}

/// Batch without dates or students.
#[must_use]
pub fn batch(id: &str, name: &str) -> Batch {
    Batch {
        id: id.to_string(),
        course_id: None,
        batch_name: name.to_string(),
        start_date: None,
        end_date: None,
        start_time: None,
        end_time: None,
        students: Vec::new(),
    }
}

/// Gateway order as relayed by the backend.
#[must_use]
pub fn payment_order(order_id: &str, amount: u64) -> PaymentOrder {
    PaymentOrder {
        order_id: order_id.to_string(),
        amount,
        currency: Some("INR".to_string()),
        short_url: None,
        qr_code_url: None,
    }
}

/// Assignment `a1` carrying the given raw `submissions` array.
///
/// # Panics
///
/// Panics when `submissions` does not decode.
#[must_use]
pub fn assignment_with_submissions(submissions: Value) -> Assignment {
    let raw = json!({
        "_id": "a1",
        "batchId": "b1",
        "title": "Week 1",
        "fileUrl": "https://files.kodu.test/week1.pdf",
        "submissions": submissions,
    });
    serde_json::from_value(raw).expect("fixture submissions should decode")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_have_three_segments() {
        assert_eq!(token_for("u1", Role::Admin).split('.').count(), 3);
        assert_eq!(token_with_exp("u1", Role::Admin, NOW).split('.').count(), 3);
    }

    #[test]
    fn assignment_fixture_keeps_submissions() {
        let assignment = assignment_with_submissions(json!([{ "student": "s1" }]));
        assert_eq!(assignment.submissions.len(), 1);
    }
}
