//! Payout view.
//!
//! Amounts are integer minor units (cents). The stored amount is reduced to
//! its low 32-bit word before it is reported, which caps representable
//! payouts at ±2,147,483,647 cents; larger values wrap and are logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decode;
use crate::format;
use crate::fraud::FraudAssessor;
use crate::model::{Entity, Record, Value};
use crate::schema::rel;
use crate::{Error, Result};
use super::{account, id_string, AccountView, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutView {
    pub id: Option<String>,
    /// Minor units.
    pub amount: Option<i64>,
    pub status: serde_json::Value,
    pub disbursement_id: Option<String>,
    pub settlement_id: Option<String>,
    pub disbursed_at: Option<DateTime<Utc>>,
    pub settled_at: Option<DateTime<Utc>>,
    pub error: Option<serde_json::Value>,
    pub formatted_amount: Option<String>,
    pub formatted_disbursed_at: Option<String>,
    pub formatted_settled_at: Option<String>,
    pub account: Option<AccountView>,
}

impl<F: FraudAssessor> Serializer<F> {
    pub fn payout(&self, payout: &Entity) -> Result<PayoutView> {
        let amount = amount(payout);
        let disbursed_at = timestamp(payout, "disbursed_at")?;
        let settled_at = timestamp(payout, "settled_at")?;
        let pattern = self.config().date_format.as_str();

        Ok(PayoutView {
            id: id_string(payout, "id"),
            amount,
            status: payout.get_json("status"),
            disbursement_id: id_string(payout, "disbursement_id"),
            settlement_id: id_string(payout, "settlement_id"),
            disbursed_at,
            settled_at,
            error: decode::json_field(payout, "error")?,
            formatted_amount: amount.map(format::format_minor_units),
            formatted_disbursed_at: disbursed_at.map(|at| format::format_date(&at, pattern)),
            formatted_settled_at: settled_at.map(|at| format::format_date(&at, pattern)),
            account: payout.first(rel::TO_ACCOUNT).map(account),
        })
    }
}

/// Reported amount: the low 32-bit word of the stored integer.
fn amount(payout: &Entity) -> Option<i64> {
    let stored = payout.present("amount")?;
    let reported = stored.low_word()?;
    if stored.as_int() != Some(reported) {
        tracing::warn!(
            id = payout.get_str("id").unwrap_or_default(),
            stored = %stored,
            reported,
            "payout amount exceeds 32 bits and was truncated"
        );
    }
    Some(reported)
}

fn timestamp(payout: &Entity, key: &str) -> Result<Option<DateTime<Utc>>> {
    let Some(value) = payout.present(key) else {
        return Ok(None);
    };
    value.as_datetime().map(Some).ok_or_else(|| Error::TypeError {
        expected: format!("timestamp in `{key}`"),
        got: type_label(value),
    })
}

fn type_label(value: &Value) -> String {
    match value {
        Value::String(s) => format!("STRING {s:?}"),
        other => other.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::model::{Node, NodeId, RelId, Relationship};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    struct NoFraud;

    impl FraudAssessor for NoFraud {
        fn is_locked(&self, _: &Entity) -> Result<bool> { Ok(false) }
        fn trust_factors(&self, _: &Entity) -> Result<serde_json::Value> { Ok(json!({})) }
    }

    fn serializer() -> Serializer<NoFraud> {
        Serializer::new(ViewConfig::default(), NoFraud)
    }

    fn payout_node() -> Node {
        Node::new(NodeId(10)).with_labels(["Payout"]).with_property("id", "p-1")
    }

    #[test]
    fn test_full_payout() {
        let disbursed = Utc.with_ymd_and_hms(2020, 10, 28, 15, 4, 5).unwrap();
        let node = payout_node()
            .with_property("amount", 12345i64)
            .with_property("status", "settled")
            .with_property("disbursement_id", "d-9")
            .with_property("settlement_id", "s-9")
            .with_property("disbursed_at", disbursed)
            .with_property("settled_at", "2020-10-30T09:00:00Z")
            .with_property("error", r#"{"code":"R01","message":"insufficient funds"}"#);
        let acct = Node::new(NodeId(11))
            .with_labels(["Account"])
            .with_property("id", "acct-1")
            .with_property("account_type", "stripe");
        let entity = Entity::new(node).with_edge(
            rel::TO_ACCOUNT,
            Relationship::new(RelId(1), NodeId(10), NodeId(11), "TO_ACCOUNT"),
            acct.into(),
        );

        let view = serializer().payout(&entity).unwrap();
        assert_eq!(view.amount, Some(12345));
        assert_eq!(view.formatted_amount.as_deref(), Some("123.45"));
        assert_eq!(view.disbursed_at, Some(disbursed));
        assert_eq!(view.formatted_disbursed_at.as_deref(), Some("10/28/2020"));
        assert_eq!(view.formatted_settled_at.as_deref(), Some("10/30/2020"));
        assert_eq!(view.error, Some(json!({ "code": "R01", "message": "insufficient funds" })));
        assert_eq!(view.status, json!("settled"));
        assert_eq!(view.account.unwrap().id.as_deref(), Some("acct-1"));
    }

    #[test]
    fn test_sparse_payout_is_all_null() {
        let view = serializer().payout(&Entity::new(payout_node())).unwrap();
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": "p-1",
                "amount": null,
                "status": null,
                "disbursement_id": null,
                "settlement_id": null,
                "disbursed_at": null,
                "settled_at": null,
                "error": null,
                "formatted_amount": null,
                "formatted_disbursed_at": null,
                "formatted_settled_at": null,
                "account": null,
            })
        );
    }

    #[test]
    fn test_zero_amount_is_present() {
        let entity = Entity::new(payout_node().with_property("amount", 0i64));
        let view = serializer().payout(&entity).unwrap();
        assert_eq!(view.amount, Some(0));
        assert_eq!(view.formatted_amount.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_amount_beyond_32_bits_wraps() {
        let entity = Entity::new(payout_node().with_property("amount", (1i64 << 32) + 250));
        let view = serializer().payout(&entity).unwrap();
        assert_eq!(view.amount, Some(250));
        assert_eq!(view.formatted_amount.as_deref(), Some("2.50"));
    }

    #[test]
    fn test_bad_timestamp_and_error_json() {
        let entity = Entity::new(payout_node().with_property("settled_at", "yesterday"));
        assert!(matches!(serializer().payout(&entity), Err(Error::TypeError { .. })));

        let entity = Entity::new(payout_node().with_property("error", "{oops"));
        assert!(matches!(serializer().payout(&entity), Err(Error::MalformedField { .. })));
    }

    proptest! {
        #[test]
        fn prop_formatted_amount_iff_amount(amount in proptest::option::of(i32::MIN as i64..=i32::MAX as i64)) {
            let mut node = payout_node();
            if let Some(a) = amount {
                node = node.with_property("amount", a);
            }
            let view = serializer().payout(&Entity::new(node)).unwrap();
            prop_assert_eq!(view.amount, amount);
            prop_assert_eq!(view.formatted_amount.is_some(), amount.is_some());
            if let Some(a) = amount {
                prop_assert_eq!(view.formatted_amount.unwrap(), format::format_number(format::minor_to_major(a)));
            }
        }
    }
}
