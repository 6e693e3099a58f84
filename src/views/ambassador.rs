//! Ambassador views: the self/peer view and the admin view.

use serde::{Deserialize, Serialize};

use crate::decode::{self, Address, AddressFixup};
use crate::format::serialize_address;
use crate::fraud::FraudAssessor;
use crate::model::{Entity, Record, Value};
use crate::resolve;
use crate::schema::rel;
use crate::Result;
use super::{account, display_name, id_string, AccountView, PayoutView, Serializer, TriplerView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbassadorView {
    pub id: Option<String>,
    pub external_id: Option<String>,
    pub date_of_birth: serde_json::Value,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: serde_json::Value,
    pub signup_completed: Option<bool>,
    pub approved: Option<bool>,
    pub quiz_completed: Option<bool>,
    pub onboarding_completed: Option<bool>,
    pub payout_provider: Option<String>,
    pub payout_additional_data: serde_json::Value,
    pub admin: Option<bool>,
    pub has_w9: Option<bool>,
    pub paypal_approved: Option<bool>,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: String,
    /// CRM contact id as text, `""` when unset.
    pub hs_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_tripler_limit: Option<i64>,
    pub account: Option<AccountView>,
    pub locked: bool,
    pub claimees: Vec<TriplerView>,
}

/// Admin-only fields on top of [`AmbassadorView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbassadorAdminView {
    #[serde(flatten)]
    pub ambassador: AmbassadorView,
    pub verification: serde_json::Value,
    pub giftcard_completed: Option<bool>,
    pub trust_factors: serde_json::Value,
    /// Raw identity-verification report, `""` when none was run.
    pub ekata_report: String,
    pub admin_bonus: i64,
    pub payouts: Vec<PayoutView>,
}

impl<F: FraudAssessor> Serializer<F> {
    pub fn ambassador(&self, ambassador: &Entity) -> Result<AmbassadorView> {
        let address = decode::address(ambassador, AddressFixup::HashToNo)?;
        let claimees = self.claimees(ambassador)?;
        let locked = self.fraud().is_locked(ambassador)?;

        tracing::debug!(id = ambassador.get_str("id").unwrap_or_default(), claimees = claimees.len(), "ambassador view");

        Ok(AmbassadorView {
            id: id_string(ambassador, "id"),
            external_id: id_string(ambassador, "external_id"),
            date_of_birth: ambassador.get_json("date_of_birth"),
            first_name: ambassador.get_string("first_name"),
            last_name: ambassador.get_string("last_name"),
            phone: id_string(ambassador, "phone"),
            email: ambassador.get_string("email"),
            location: ambassador.get_json("location"),
            signup_completed: ambassador.get_bool("signup_completed"),
            approved: ambassador.get_bool("approved"),
            quiz_completed: ambassador.get_bool("quiz_completed"),
            onboarding_completed: ambassador.get_bool("onboarding_completed"),
            payout_provider: ambassador.get_string("payout_provider"),
            payout_additional_data: ambassador.get_json("payout_additional_data"),
            admin: ambassador.get_bool("admin"),
            has_w9: ambassador.get_bool("has_w9"),
            paypal_approved: ambassador.get_bool("paypal_approved"),
            display_address: address.as_ref().map(|a| serialize_address(Some(a))),
            address,
            display_name: display_name(ambassador),
            hs_id: ambassador
                .present("hs_id")
                .and_then(Value::to_id_string)
                .unwrap_or_default(),
            claim_tripler_limit: ambassador.present("claim_tripler_limit").and_then(Value::as_int),
            account: resolve::primary_account(ambassador).map(account),
            locked,
            claimees,
        })
    }

    pub fn ambassador_for_admin(&self, ambassador: &Entity) -> Result<AmbassadorAdminView> {
        let mut base = self.ambassador(ambassador)?;

        // Re-read from the node; identical to what the base view holds.
        base.quiz_completed = ambassador.get_bool("quiz_completed");
        base.onboarding_completed = ambassador.get_bool("onboarding_completed");
        base.signup_completed = ambassador.get_bool("signup_completed");
        base.payout_provider = ambassador.get_string("payout_provider");
        base.claimees = self.claimees(ambassador)?;

        Ok(AmbassadorAdminView {
            verification: ambassador.get_json("verification"),
            giftcard_completed: ambassador.get_bool("giftcard_completed"),
            trust_factors: self.fraud().trust_factors(ambassador)?,
            ekata_report: ambassador
                .present("ekata_report")
                .map(|report| report.as_str().map_or_else(|| report.to_json().to_string(), str::to_owned))
                .unwrap_or_default(),
            admin_bonus: ambassador
                .present("admin_bonus")
                .and_then(Value::as_int)
                .unwrap_or(0),
            payouts: resolve::map_far(ambassador, rel::GETS_PAID, |payout| self.payout(payout))?,
            ambassador: base,
        })
    }

    /// Claimed triplers in claim order.
    fn claimees(&self, ambassador: &Entity) -> Result<Vec<TriplerView>> {
        resolve::map_far(ambassador, rel::CLAIMS, |tripler| self.tripler(tripler))
    }
}
