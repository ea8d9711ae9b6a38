#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    ///
    /// Id of the last notification of the previous page.
    /// None requests the newest notifications.
    ///
    pub cursor: Option<String>,
    pub limit: u32,
    pub unread_only: bool,
}
