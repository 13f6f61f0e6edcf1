use serde::{Deserialize, Serialize};

use super::{StandardMenuItem, UserMenuItem};

/// Active standard menu configuration (`data` of
/// `GET /admin/menu-raw/configurations/active`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardMenuConfiguration {
    #[serde(default)]
    pub menu_tree: Vec<StandardMenuItem>,
}

/// Body of `POST /user/menu-preferences/custom-menu`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCustomMenuRequest {
    pub menu_items: Vec<UserMenuItem>,
}
