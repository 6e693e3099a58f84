//! Tripler views: API, CSV export, and proximity-search rows.
//!
//! The API view applies the legacy `#` address fix-up; the CSV export and
//! proximity rows decode the stored address verbatim.

use serde::{Deserialize, Serialize};

use crate::decode::{self, Address, AddressFixup, Triplee};
use crate::format::serialize_address;
use crate::fraud::FraudAssessor;
use crate::model::{Entity, Record, Value};
use crate::schema::rel;
use crate::Result;
use super::{display_name, display_phone, id_string, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriplerView {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: serde_json::Value,
    pub phone: Option<String>,
    pub location: serde_json::Value,
    pub email: Option<String>,
    pub age_decade: serde_json::Value,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: String,
    pub display_phone: Option<String>,
    pub triplees: Option<Vec<Triplee>>,
    pub is_ambassador: bool,
    pub is_ambassador_and_has_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriplerCsvView {
    pub voter_id: Option<String>,
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: serde_json::Value,
    pub phone: Option<String>,
    pub location: serde_json::Value,
    pub email: Option<String>,
    pub verification: serde_json::Value,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: String,
    pub triplees: Option<Vec<Triplee>>,
    pub is_ambassador_and_has_confirmed: bool,
    pub is_ambassador: bool,
}

/// A tripler row from a proximity search: flat properties plus `distance`.
///
/// Rows carry no relationships, so the ambassador flags are not available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyTriplerView {
    pub distance: Option<f64>,
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: serde_json::Value,
    pub phone: Option<String>,
    pub location: serde_json::Value,
    pub email: Option<String>,
    pub age_decade: serde_json::Value,
    pub address: Option<Address>,
    pub display_address: Option<String>,
    pub display_name: String,
    pub display_phone: Option<String>,
    pub triplees: Option<Vec<Triplee>>,
}

impl<F: FraudAssessor> Serializer<F> {
    pub fn tripler(&self, tripler: &Entity) -> Result<TriplerView> {
        let address = decode::address(tripler, AddressFixup::HashToNo)?;
        Ok(TriplerView {
            id: id_string(tripler, "id"),
            first_name: tripler.get_string("first_name"),
            last_name: tripler.get_string("last_name"),
            status: tripler.get_json("status"),
            phone: id_string(tripler, "phone"),
            location: tripler.get_json("location"),
            email: tripler.get_string("email"),
            age_decade: tripler.get_json("age_decade"),
            display_address: address.as_ref().map(|a| serialize_address(Some(a))),
            address,
            display_name: display_name(tripler),
            display_phone: display_phone(tripler, self.config().phone_region),
            triplees: decode::triplees(tripler)?,
            is_ambassador: tripler.has_edge(rel::IS_AMBASSADOR),
            is_ambassador_and_has_confirmed: tripler.flag("is_ambassador_and_has_confirmed"),
        })
    }

    pub fn tripler_for_csv(&self, tripler: &Entity) -> Result<TriplerCsvView> {
        let address = decode::address(tripler, AddressFixup::Verbatim)?;
        Ok(TriplerCsvView {
            voter_id: id_string(tripler, "voter_id"),
            id: id_string(tripler, "id"),
            first_name: tripler.get_string("first_name"),
            last_name: tripler.get_string("last_name"),
            status: tripler.get_json("status"),
            phone: id_string(tripler, "phone"),
            location: tripler.get_json("location"),
            email: tripler.get_string("email"),
            verification: tripler.get_json("verification"),
            display_address: address.as_ref().map(|a| serialize_address(Some(a))),
            address,
            display_name: display_name(tripler),
            triplees: decode::triplees(tripler)?,
            is_ambassador_and_has_confirmed: tripler.flag("is_ambassador_and_has_confirmed"),
            is_ambassador: tripler.has_edge(rel::IS_AMBASSADOR),
        })
    }

    /// View of a flat proximity-search row.
    pub fn nearby_tripler<R: Record + ?Sized>(&self, row: &R) -> Result<NearbyTriplerView> {
        let address = decode::address(row, AddressFixup::Verbatim)?;
        Ok(NearbyTriplerView {
            distance: row.get("distance").and_then(Value::as_float),
            id: id_string(row, "id"),
            first_name: row.get_string("first_name"),
            last_name: row.get_string("last_name"),
            status: row.get_json("status"),
            phone: id_string(row, "phone"),
            location: row.get_json("location"),
            email: row.get_string("email"),
            age_decade: row.get_json("age_decade"),
            display_address: address.as_ref().map(|a| serialize_address(Some(a))),
            address,
            display_name: display_name(row),
            display_phone: display_phone(row, self.config().phone_region),
            triplees: decode::triplees(row)?,
        })
    }
}

/// `"first last"`. Missing parts render empty; no separator is dropped.
pub fn serialize_triplee(triplee: &Triplee) -> String {
    format!("{} {}", part(&triplee.first_name), part(&triplee.last_name))
}

/// `"first last - housemate"` for CSV export.
pub fn serialize_triplee_for_csv(triplee: &Triplee) -> String {
    format!(
        "{} {} - {}",
        part(&triplee.first_name),
        part(&triplee.last_name),
        part(&triplee.housemate)
    )
}

fn part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::model::{props, Node, NodeId, RelId, Relationship};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct NoFraud;

    impl FraudAssessor for NoFraud {
        fn is_locked(&self, _: &Entity) -> Result<bool> { Ok(false) }
        fn trust_factors(&self, _: &Entity) -> Result<serde_json::Value> { Ok(json!(null)) }
    }

    fn serializer() -> Serializer<NoFraud> {
        Serializer::new(ViewConfig::default(), NoFraud)
    }

    fn jane() -> Node {
        Node::new(NodeId(5))
            .with_labels(["Tripler"])
            .with_property("id", "t-5")
            .with_property("first_name", "Jane")
            .with_property("last_name", "Doe")
            .with_property("status", "confirmed")
            .with_property("phone", "+1 (773) 555-0199")
            .with_property("address", r##"{"address1":"#4 Lake St","city":"Chicago","state":"IL","zip":"60614"}"##)
            .with_property("triplees", r#"[{"first_name":"Ann","last_name":"Lee","housemate":"Yes"}]"#)
    }

    #[test]
    fn test_tripler_view() {
        let view = serializer().tripler(&Entity::new(jane())).unwrap();
        assert_eq!(view.display_name, "Jane Doe");
        assert!(!view.is_ambassador);
        assert!(!view.is_ambassador_and_has_confirmed);
        assert_eq!(view.display_phone.as_deref(), Some("(773) 555-0199"));
        assert_eq!(view.display_address.as_deref(), Some("no.4 Lake St, Chicago, IL, 60614"));
        assert_eq!(view.status, json!("confirmed"));
        assert_eq!(view.triplees.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_csv_view_keeps_hash() {
        let view = serializer().tripler_for_csv(&Entity::new(jane().with_property("voter_id", "IL-77"))).unwrap();
        assert_eq!(view.display_address.as_deref(), Some("#4 Lake St, Chicago, IL, 60614"));
        assert_eq!(view.voter_id.as_deref(), Some("IL-77"));
        assert_eq!(view.display_name, "Jane Doe");
    }

    #[test]
    fn test_ambassador_flags_are_independent() {
        let former = Node::new(NodeId(9)).with_labels(["Ambassador"]);
        let linked = Entity::new(jane()).with_edge(
            rel::IS_AMBASSADOR,
            Relationship::new(RelId(3), NodeId(9), NodeId(5), "WAS_ONCE"),
            former.into(),
        );
        let view = serializer().tripler(&linked).unwrap();
        assert!(view.is_ambassador);
        // copied from the stored flag, not derived from the edge
        assert!(!view.is_ambassador_and_has_confirmed);

        let confirmed = Entity::new(jane().with_property("is_ambassador_and_has_confirmed", true));
        let view = serializer().tripler_for_csv(&confirmed).unwrap();
        assert!(!view.is_ambassador);
        assert!(view.is_ambassador_and_has_confirmed);
    }

    #[test]
    fn test_sparse_tripler() {
        let view = serializer().tripler(&Entity::new(Node::new(NodeId(1)))).unwrap();
        assert_eq!(view.address, None);
        assert_eq!(view.display_address, None);
        assert_eq!(view.display_phone, None);
        assert_eq!(view.triplees, None);
        assert_eq!(view.display_name, "");
    }

    #[test]
    fn test_bad_phone_does_not_fail_view() {
        let view = serializer().tripler(&Entity::new(jane().with_property("phone", "call me"))).unwrap();
        assert_eq!(view.phone.as_deref(), Some("call me"));
        assert_eq!(view.display_phone, None);
    }

    #[test]
    fn test_nearby_tripler_row() {
        let row = props([
            ("distance", Value::Float(0.42)),
            ("id", Value::from("t-8")),
            ("first_name", Value::from("Sam")),
            ("phone", Value::from("3125550100")),
            ("address", Value::from(r##"{"address1":"#9 Elm"}"##)),
        ]);
        let view = serializer().nearby_tripler(&row).unwrap();
        assert_eq!(view.distance, Some(0.42));
        assert_eq!(view.display_name, "Sam");
        assert_eq!(view.display_phone.as_deref(), Some("(312) 555-0100"));
        assert_eq!(view.display_address.as_deref(), Some("#9 Elm"));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("is_ambassador").is_none());
    }

    #[test]
    fn test_triplee_strings() {
        let t = Triplee {
            first_name: Some("Ann".into()),
            last_name: Some("Lee".into()),
            housemate: Some("Yes".into()),
            ..Triplee::default()
        };
        assert_eq!(serialize_triplee(&t), "Ann Lee");
        assert_eq!(serialize_triplee_for_csv(&t), "Ann Lee - Yes");

        let partial = Triplee { first_name: Some("Ann".into()), ..Triplee::default() };
        assert_eq!(serialize_triplee(&partial), "Ann ");
        assert_eq!(serialize_triplee_for_csv(&partial), "Ann  - ");
    }

    #[test]
    fn test_loosely_typed_triplees_do_not_fail_views() {
        let tripler = jane().with_property(
            "triplees",
            r#"[{"first_name":"Ann","last_name":null,"housemate":"Yes"},{"first_name":"Bo","last_name":"Kim","housemate":true}]"#,
        );
        let view = serializer().tripler(&Entity::new(tripler.clone())).unwrap();
        let triplees = view.triplees.unwrap();
        assert_eq!(triplees[0].last_name, None);
        assert_eq!(serialize_triplee(&triplees[0]), "Ann ");

        let csv = serializer().tripler_for_csv(&Entity::new(tripler)).unwrap();
        assert_eq!(serialize_triplee_for_csv(&csv.triplees.unwrap()[1]), "Bo Kim - true");
    }
}
