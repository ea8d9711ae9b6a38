use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsQuery {
    ///
    /// Id of the last notification from the previous page
    ///
    pub cursor: Option<String>,
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "de_flag::deserialize")]
    pub unread_only: bool,
}

mod de_flag {
    //!
    //! Query flags are enabled only by literal `true`.
    //! Any other value disables the flag instead of rejecting the request.
    //!

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Option::<String>::deserialize(d)?;

        Ok(value.as_deref() == Some("true"))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{extract::Query, http::Uri};

    fn parse(uri: &str) -> NotificationsQuery {
        let uri = uri.parse::<Uri>().unwrap();
        let Query(query) = Query::<NotificationsQuery>::try_from_uri(&uri).unwrap();

        query
    }

    #[test]
    fn empty_query_defaults() {
        let query = parse("/notifications");

        assert!(query.cursor.is_none());
        assert!(query.limit.is_none());
        assert!(!query.unread_only);
    }

    #[test]
    fn unread_only_true() {
        let query = parse("/notifications?unreadOnly=true&limit=5&cursor=abc");

        assert!(query.unread_only);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn unread_only_other_value_is_false() {
        let query = parse("/notifications?unreadOnly=yes");

        assert!(!query.unread_only);
    }
}
