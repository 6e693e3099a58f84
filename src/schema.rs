//! Graph schema: node labels, relationship aliases and hydration plans.
//!
//! Relationship aliases are the names the view layer reads edges under.
//! Each alias maps to a stored relationship type and the direction to follow
//! it from the node being hydrated.

use crate::model::Direction;

pub mod label {
    pub const AMBASSADOR: &str = "Ambassador";
    pub const TRIPLER: &str = "Tripler";
    pub const ACCOUNT: &str = "Account";
    pub const PAYOUT: &str = "Payout";
}

pub mod rel {
    pub const OWNS_ACCOUNT: &str = "owns_account";
    pub const CLAIMS: &str = "claims";
    pub const GETS_PAID: &str = "gets_paid";
    pub const TO_ACCOUNT: &str = "to_account";
    pub const IS_AMBASSADOR: &str = "is_ambassador";
}

/// How an alias is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelSpec {
    pub alias: &'static str,
    pub rel_type: &'static str,
    pub direction: Direction,
}

pub const OWNS_ACCOUNT: RelSpec = RelSpec {
    alias: rel::OWNS_ACCOUNT,
    rel_type: "OWNS_ACCOUNT",
    direction: Direction::Outgoing,
};

pub const CLAIMS: RelSpec = RelSpec {
    alias: rel::CLAIMS,
    rel_type: "CLAIMS",
    direction: Direction::Outgoing,
};

pub const GETS_PAID: RelSpec = RelSpec {
    alias: rel::GETS_PAID,
    rel_type: "GETS_PAID",
    direction: Direction::Outgoing,
};

pub const TO_ACCOUNT: RelSpec = RelSpec {
    alias: rel::TO_ACCOUNT,
    rel_type: "TO_ACCOUNT",
    direction: Direction::Outgoing,
};

/// A tripler who later signed up points back at the ambassador it became.
pub const IS_AMBASSADOR: RelSpec = RelSpec {
    alias: rel::IS_AMBASSADOR,
    rel_type: "WAS_ONCE",
    direction: Direction::Incoming,
};

/// One step of a hydration plan: follow `spec`, then hydrate the far node
/// with `nested`.
#[derive(Debug, Clone, Copy)]
pub struct Expand {
    pub spec: RelSpec,
    pub nested: &'static [Expand],
}

/// Triplers need their back-reference to decide `is_ambassador`.
pub const TRIPLER_PLAN: &[Expand] = &[Expand { spec: IS_AMBASSADOR, nested: &[] }];

pub const PAYOUT_PLAN: &[Expand] = &[Expand { spec: TO_ACCOUNT, nested: &[] }];

pub const ACCOUNT_PLAN: &[Expand] = &[];

/// Everything the ambassador views read, admin view included.
pub const AMBASSADOR_PLAN: &[Expand] = &[
    Expand { spec: OWNS_ACCOUNT, nested: ACCOUNT_PLAN },
    Expand { spec: CLAIMS, nested: TRIPLER_PLAN },
    Expand { spec: GETS_PAID, nested: PAYOUT_PLAN },
];

/// Hydration plan for a node label; unknown labels hydrate without edges.
pub fn plan_for(label_name: &str) -> &'static [Expand] {
    match label_name {
        label::AMBASSADOR => AMBASSADOR_PLAN,
        label::TRIPLER => TRIPLER_PLAN,
        label::PAYOUT => PAYOUT_PLAN,
        _ => ACCOUNT_PLAN,
    }
}
