//! Response shapes of the m.weibo.cn mobile API.
//!
//! Every field is optional: the API omits or nulls fields freely depending on
//! post type, account type and client version. Unknown fields are ignored.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A value the API sends either as a JSON number or as a JSON string.
///
/// Serializes back in the variant it was read as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    String(String),
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOrString::Int(n) => write!(f, "{}", n),
            IntOrString::String(s) => f.write_str(s),
        }
    }
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_ok_flag(ok: Option<i64>) -> bool {
    ok == Some(1)
}

// -- container index ---------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIndex {
    pub ok: Option<i64>,
    pub data: Option<UserIndexData>,
}

impl UserIndex {
    pub fn is_ok(&self) -> bool {
        is_ok_flag(self.ok)
    }

    /// Container id of the tab whose key is `tab_key`.
    pub fn container_for(&self, tab_key: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .tabs_info
            .as_ref()?
            .tabs
            .iter()
            .find(|tab| tab.tab_key.as_deref() == Some(tab_key))
            .and_then(|tab| tab.containerid.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIndexData {
    #[serde(rename = "userInfo")]
    pub user_info: Option<User>,
    #[serde(rename = "tabsInfo")]
    pub tabs_info: Option<TabsInfo>,
    pub scheme: Option<String>,
    #[serde(rename = "showAppTips")]
    pub show_app_tips: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabsInfo {
    #[serde(rename = "selectedTab")]
    pub selected_tab: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tab {
    pub id: Option<i64>,
    #[serde(rename = "tabKey")]
    pub tab_key: Option<String>,
    pub title: Option<String>,
    pub tab_type: Option<String>,
    pub containerid: Option<String>,
    pub apipath: Option<String>,
    pub url: Option<String>,
}

// -- listing -----------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    pub ok: Option<i64>,
    pub data: Option<ListingData>,
}

impl ListingPage {
    pub fn is_ok(&self) -> bool {
        is_ok_flag(self.ok)
    }

    pub fn cards(&self) -> &[Card] {
        self.data.as_ref().map(|d| d.cards.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingData {
    #[serde(rename = "cardlistInfo")]
    pub cardlist_info: Option<CardlistInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardlistInfo {
    pub containerid: Option<String>,
    pub v_p: Option<i64>,
    pub show_style: Option<i64>,
    pub total: Option<i64>,
    pub since_id: Option<IntOrString>,
    pub page: Option<i64>,
}

/// One listing entry. Only cards carrying an `mblog` are posts; the rest are
/// navigation, recommendation or ad blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Card {
    pub card_type: Option<i64>,
    pub card_style: Option<i64>,
    pub itemid: Option<String>,
    pub scheme: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_group: Vec<CardGroup>,
    pub mblog: Option<Mblog>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardGroup {
    pub card_type: Option<i64>,
    pub desc: Option<String>,
    pub scheme: Option<String>,
    pub itemid: Option<String>,
    pub actionlog: Option<ActionLog>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionLog {
    pub act_code: Option<IntOrString>,
    pub cardid: Option<String>,
    pub oid: Option<String>,
    pub fid: Option<String>,
    pub ext: Option<String>,
}

// -- posts -------------------------------------------------------------------

/// A post. Listing cards and timeline statuses share this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mblog {
    pub created_at: Option<String>,
    pub id: Option<String>,
    pub mid: Option<String>,
    pub bid: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "textLength")]
    pub text_length: Option<i64>,
    pub source: Option<String>,
    #[serde(rename = "isLongText")]
    pub is_long_text: Option<bool>,
    pub user: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pic_ids: Vec<String>,
    pub pic_num: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pics: Vec<Pic>,
    pub thumbnail_pic: Option<String>,
    pub bmiddle_pic: Option<String>,
    pub original_pic: Option<String>,
    pub reposts_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub attitudes_count: Option<i64>,
    pub edit_count: Option<i64>,
    pub edit_at: Option<String>,
    pub page_info: Option<PageInfo>,
    pub retweeted_status: Option<Box<Mblog>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Option<IntOrString>,
    pub screen_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_url: Option<String>,
    pub statuses_count: Option<i64>,
    pub verified: Option<bool>,
    pub verified_reason: Option<String>,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub followers_count: Option<IntOrString>,
    pub follow_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pic {
    pub pid: Option<String>,
    pub url: Option<String>,
    pub size: Option<String>,
    pub large: Option<PicLarge>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PicLarge {
    pub size: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub object_type: Option<i64>,
    pub page_url: Option<String>,
    pub page_title: Option<String>,
    pub content1: Option<String>,
    pub content2: Option<String>,
    pub title: Option<String>,
}

// -- friends timeline --------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub ok: Option<i64>,
    pub http_code: Option<i64>,
    pub data: Option<TimelineData>,
}

impl Timeline {
    pub fn is_ok(&self) -> bool {
        is_ok_flag(self.ok)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub statuses: Vec<Mblog>,
    pub previous_cursor_str: Option<String>,
    pub next_cursor_str: Option<String>,
    pub since_id_str: Option<String>,
    pub max_id_str: Option<String>,
    pub total_number: Option<i64>,
    pub has_unread: Option<i64>,
}
