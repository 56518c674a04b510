use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketAction {
    Resolve,
    Close,
    Reopen,
}

#[derive(Clone, Debug, Default)]
pub struct TicketFilter {
    pub page: u32,
    pub size: u32,
    pub status: Option<String>,
    /// Free-text search over the ticket list.
    pub search: Option<String>,
}

impl TicketFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = page_query(self.page, self.size);
        for (key, value) in [("status", &self.status), ("search", &self.search)] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                q.push((key, v.to_string()));
            }
        }
        q
    }
}

/// One bar of the weekly ticket chart. `day` is a short weekday name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyTicketCount {
    pub day: String,

    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolutionRequest<'a> {
    resolution_note: &'a str,
}

impl Session {
    pub fn support_tickets(&self, filter: &TicketFilter) -> Result<Page<Ticket>, ApiError> {
        self.get_json_query("/api/support/tickets", &filter.query())
    }

    pub fn support_ticket(&self, ticket_id: i64) -> Result<Ticket, ApiError> {
        self.get_json(&format!("/api/support/tickets/{}", ticket_id))
    }

    pub fn support_weekly_stats(&self) -> Result<Vec<WeeklyTicketCount>, ApiError> {
        self.get_json("/api/support/tickets/weekly-stats")
    }

    /// Resolve and close take an optional note; reopen takes none.
    pub fn update_ticket(
        &self,
        ticket_id: i64,
        action: TicketAction,
        note: Option<&str>,
    ) -> Result<Ticket, ApiError> {
        let base = format!("/api/support/tickets/{}", ticket_id);
        let body = ResolutionRequest {
            resolution_note: note.unwrap_or_default(),
        };
        match action {
            TicketAction::Resolve => self.put_json(&format!("{}/resolve", base), Some(&body)),
            TicketAction::Close => self.put_json(&format!("{}/close", base), Some(&body)),
            TicketAction::Reopen => self.put_json::<(), _>(&format!("{}/reopen", base), None),
        }
    }
}
