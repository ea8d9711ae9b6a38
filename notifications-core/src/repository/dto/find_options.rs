use bson::oid::ObjectId;

#[derive(Debug, Clone, Copy)]
pub struct FindOptions {
    ///
    /// Id of the last notification seen by the caller.
    /// Only notifications created strictly before it are returned.
    ///
    pub cursor: Option<ObjectId>,
    pub limit: u32,
    pub unread_only: bool,
}
