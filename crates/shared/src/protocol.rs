use serde::{Deserialize, Serialize};

use crate::domain::{Entry, EntryId};

/// One element of the remote user list.
///
/// The public endpoint returns more fields (address, company, website); only
/// the ones the directory shows are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<RemoteUser> for Entry {
    fn from(value: RemoteUser) -> Self {
        Self {
            id: EntryId(value.id),
            name: value.name,
            email: value.email,
            phone: value.phone,
            gender: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unknown_remote_fields() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "city": "Gwenborough"},
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org"
        }"#;
        let user: RemoteUser = serde_json::from_str(raw).expect("remote user");
        let entry = Entry::from(user);
        assert_eq!(entry.id, EntryId(1));
        assert_eq!(entry.phone, "1-770-736-8031 x56442");
        assert_eq!(entry.gender, None);
    }
}
