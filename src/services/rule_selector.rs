use crate::models::{AutomationRule, TicketEvent, TriggerLocation};
use crate::services::keyword_matcher::keyword_matches;

/// Pick the rule that fires for a newly created ticket.
///
/// Rules are scanned in store order (creation time ascending); the first
/// enabled rule whose trigger matches the resolved text field wins, so at
/// most one rule fires per ticket-creation event. A rule targeting the
/// first message cannot match a ticket created without one. Side-effect
/// free.
pub fn select_rule<'a>(
    rules: &'a [AutomationRule],
    ticket: &TicketEvent,
) -> Option<&'a AutomationRule> {
    rules
        .iter()
        .filter(|rule| rule.enabled)
        .find(|rule| {
            let text = match rule.trigger.location {
                TriggerLocation::Title => Some(ticket.title.as_str()),
                TriggerLocation::Description => Some(ticket.description.as_str()),
                TriggerLocation::Message => ticket.message.as_deref(),
            };

            match text {
                Some(text) => keyword_matches(text, &rule.trigger.keyword),
                None => false,
            }
        })
}
