//! Account view.

use serde::{Deserialize, Serialize};

use crate::model::Record;
use super::id_string;

/// A payout destination account.
///
/// `account_data` holds provider credentials on the node. The view only says
/// whether it is set; its contents are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Option<String>,
    pub account_id: Option<String>,
    pub account_type: Option<String>,
    pub account_data: bool,
}

pub fn account<R: Record + ?Sized>(account: &R) -> AccountView {
    AccountView {
        id: id_string(account, "id"),
        account_id: id_string(account, "account_id"),
        account_type: account.get_string("account_type"),
        account_data: account.flag("account_data"),
    }
}
